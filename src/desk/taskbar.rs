use chrono::{DateTime, TimeZone};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, rect_contains, truncate_to_width};
use crate::window::PanelId;

const MAX_HOST_WIDTH: usize = 20;

/// One window-list button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: PanelId,
    pub label: String,
    pub focused: bool,
    pub minimized: bool,
}

#[derive(Debug, Clone)]
struct WindowHit {
    id: PanelId,
    rect: Rect,
}

/// Bottom status row: start label, window list, clock and host name.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    start_rect: Option<Rect>,
    window_hits: Vec<WindowHit>,
    hostname: Option<String>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Split the screen into the desktop and the one-row bar below it.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let bar_h = 1u16.min(area.height);
        let bar = Rect {
            x: area.x,
            y: area.y.saturating_add(area.height).saturating_sub(bar_h),
            width: area.width,
            height: bar_h,
        };
        let desktop = Rect {
            height: area.height.saturating_sub(bar_h),
            ..area
        };
        self.area = bar;
        (desktop, bar)
    }

    fn hostname(&mut self) -> &str {
        // cached; looking it up every frame is a syscall
        self.hostname.get_or_insert_with(|| {
            hostname::get()
                .ok()
                .and_then(|s| s.into_string().ok())
                .unwrap_or_else(|| "unknown-host".to_string())
        })
    }

    pub fn render<Tz>(&mut self, frame: &mut UiFrame<'_>, entries: &[TaskbarEntry], now: DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.start_rect = None;
        self.window_hits.clear();
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        frame.fill(area, base);

        let y = area.y;
        let max_x = area.x.saturating_add(area.width);

        let host = truncate_to_width(self.hostname(), MAX_HOST_WIDTH);
        let status = format!(" {} · {host} ", now.format("%H:%M:%S"));
        let status_width = status.chars().count() as u16;
        let status_x = max_x.saturating_sub(status_width).max(area.x);
        let list_end = status_x;

        let mut x = area.x;
        const START: &str = "≡ desk";
        let start_width = START.chars().count() as u16;
        if x.saturating_add(start_width) <= list_end {
            frame.set_string(area, x, y, START, base.add_modifier(Modifier::BOLD));
            self.start_rect = Some(Rect::new(x, y, start_width, 1));
            x = x.saturating_add(start_width + 1);
        }

        for entry in entries {
            let max_label = list_end.saturating_sub(x).saturating_sub(2) as usize;
            if max_label == 0 {
                break;
            }
            let label = truncate_to_width(&entry.label, max_label);
            let chunk = format!(" {label} ");
            let chunk_width = chunk.chars().count() as u16;
            if x.saturating_add(chunk_width) > list_end {
                break;
            }
            let style = if entry.focused {
                base.bg(theme::taskbar_active_bg())
                    .add_modifier(Modifier::BOLD)
            } else if entry.minimized {
                base.fg(theme::taskbar_minimized_fg())
                    .add_modifier(Modifier::ITALIC)
            } else {
                base
            };
            frame.set_string(area, x, y, &chunk, style);
            self.window_hits.push(WindowHit {
                id: entry.id.clone(),
                rect: Rect::new(x, y, chunk_width, 1),
            });
            x = x.saturating_add(chunk_width);
        }

        frame.set_string(area, status_x, y, &status, base);
    }

    pub fn hit_test_start(&self, column: u16, row: u16) -> bool {
        self.start_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn hit_test_window(&self, column: u16, row: u16) -> Option<&PanelId> {
        self.window_hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| &hit.id)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }
}
