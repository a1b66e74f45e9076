use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, PanelContent};
use crate::geometry::Size;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::PanelEventKind;

/// Camera feeds the viewer can switch between.
pub const FEEDS: &[&str] = &["CAM-01 LOBBY", "CAM-02 LOADING BAY"];

const NOISE: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#'];

/// A looping surveillance feed.
///
/// Opening restarts playback from frame zero; closing pauses it. The frame
/// size is re-measured whenever the hosting panel is resized.
#[derive(Debug, Default)]
pub struct MediaView {
    feed: usize,
    position: u64,
    playing: bool,
    frame_size: Option<Size>,
}

impl MediaView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn feed(&self) -> &'static str {
        FEEDS[self.feed % FEEDS.len()]
    }

    /// Last size reported by a resize of the hosting panel.
    pub fn frame_size(&self) -> Option<Size> {
        self.frame_size
    }

    fn restart(&mut self) {
        self.position = 0;
        self.playing = true;
    }

    fn switch_feed(&mut self, feed: usize) {
        if feed < FEEDS.len() && feed != self.feed {
            self.feed = feed;
            self.restart();
        }
    }

    fn timestamp(&self) -> String {
        // ten ticks per second at the default tick rate
        let secs = self.position / 10;
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

impl PanelContent for MediaView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ContentContext<'_>) {
        if area.height == 0 {
            return;
        }
        let status = if self.playing { "● REC" } else { "❚❚ PAUSED" };
        let status_style = Style::default()
            .fg(if self.playing {
                theme::accent()
            } else {
                theme::warning()
            })
            .add_modifier(Modifier::BOLD);
        let header = format!("{} {} {}", status, self.feed(), self.timestamp());
        frame.set_string(area, area.x, area.y, &header, status_style);

        let noise_style = Style::default().fg(theme::primary());
        let seed = self.position.wrapping_mul(31).wrapping_add(self.feed as u64 * 7);
        for row in 1..area.height.saturating_sub(1) {
            let line: String = (0..area.width)
                .map(|col| {
                    let n = (col as u64)
                        .wrapping_mul(13)
                        .wrapping_add((row as u64).wrapping_mul(7))
                        .wrapping_add(seed);
                    NOISE[(n % NOISE.len() as u64) as usize]
                })
                .collect();
            frame.set_string(area, area.x, area.y + row, &line, noise_style);
        }

        if area.height > 1 {
            let footer = match self.frame_size {
                Some(size) => format!("[1] [2] feed · frame {}x{}", size.width, size.height),
                None => "[1] [2] feed".to_string(),
            };
            frame.set_string(
                area,
                area.x,
                area.y + area.height - 1,
                &footer,
                Style::default().fg(theme::panel_body_fg()),
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ContentContext<'_>) -> bool {
        match key.code {
            KeyCode::Char('1') => self.switch_feed(0),
            KeyCode::Char('2') => self.switch_feed(1),
            KeyCode::Char(' ') => self.playing = !self.playing,
            _ => return false,
        }
        true
    }

    fn on_panel_event(&mut self, event: &PanelEventKind) {
        match event {
            PanelEventKind::Opened => self.restart(),
            PanelEventKind::Closed => self.playing = false,
            PanelEventKind::Resized(size) => self.frame_size = Some(*size),
            PanelEventKind::Minimized | PanelEventKind::Fullscreen(_) => {}
        }
    }

    fn tick(&mut self, ctx: &ContentContext<'_>) {
        if self.playing && !ctx.reduce_motion() {
            self.position = self.position.wrapping_add(1);
        }
    }
}
