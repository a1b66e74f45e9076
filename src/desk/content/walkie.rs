use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, PanelContent};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::PanelEventKind;

pub const CHANNELS: &[&str] = &["CH 1 · DISPATCH", "CH 2 · PATROL", "CH 3 · MAINTENANCE"];

const BARS: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkieStatus {
    #[default]
    Idle,
    Playing,
    Stopped,
}

impl WalkieStatus {
    fn label(self) -> &'static str {
        match self {
            WalkieStatus::Idle => "Idle",
            WalkieStatus::Playing => "Playing",
            WalkieStatus::Stopped => "Stopped",
        }
    }
}

/// Radio channel picker with a fake level meter.
#[derive(Debug, Default)]
pub struct WalkieView {
    channel: usize,
    status: WalkieStatus,
    phase: u64,
}

impl WalkieView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> WalkieStatus {
        self.status
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    fn stop(&mut self) {
        self.status = WalkieStatus::Stopped;
        self.phase = 0;
    }

    fn meter(&self, width: u16) -> String {
        (0..width)
            .map(|i| {
                if self.status != WalkieStatus::Playing {
                    return BARS[0];
                }
                let n = (i as u64)
                    .wrapping_mul(5)
                    .wrapping_add(self.phase.wrapping_mul(3))
                    % 11;
                BARS[(n as usize).min(BARS.len() - 1)]
            })
            .collect()
    }
}

impl PanelContent for WalkieView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ContentContext<'_>) {
        let body = Style::default().fg(theme::panel_body_fg());
        for (idx, name) in CHANNELS.iter().enumerate() {
            let row = idx as u16;
            if row >= area.height {
                return;
            }
            let selected = idx == self.channel;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                body.fg(theme::primary()).add_modifier(Modifier::BOLD)
            } else {
                body
            };
            frame.set_string(area, area.x, area.y + row, &format!("{marker} {name}"), style);
        }
        let status_row = CHANNELS.len() as u16 + 1;
        if status_row < area.height {
            let text = format!("Status: {}", self.status.label());
            frame.set_string(area, area.x, area.y + status_row, &text, body);
        }
        if status_row + 1 < area.height {
            let meter = self.meter(area.width);
            frame.set_string(
                area,
                area.x,
                area.y + status_row + 1,
                &meter,
                body.fg(theme::success()),
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ContentContext<'_>) -> bool {
        match key.code {
            KeyCode::Up => self.channel = self.channel.saturating_sub(1),
            KeyCode::Down => self.channel = (self.channel + 1).min(CHANNELS.len() - 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.status = WalkieStatus::Playing,
            KeyCode::Char('s') => self.stop(),
            _ => return false,
        }
        true
    }

    fn on_panel_event(&mut self, event: &PanelEventKind) {
        match event {
            PanelEventKind::Opened => self.status = WalkieStatus::Idle,
            PanelEventKind::Closed => {
                self.stop();
                self.status = WalkieStatus::Idle;
            }
            _ => {}
        }
    }

    fn tick(&mut self, ctx: &ContentContext<'_>) {
        if self.status == WalkieStatus::Playing && !ctx.reduce_motion() {
            self.phase = self.phase.wrapping_add(1);
        }
    }
}
