use ratatui::style::{Modifier, Style};

use crate::geometry::{FloatRect, Point};
use crate::theme;
use crate::ui::UiFrame;

/// Width of the `[_][□][x]` control strip at the right of the header.
pub const CONTROLS_WIDTH: u32 = 9;

/// Per-frame inputs for drawing one panel's chrome.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub title: &'a str,
    pub focused: bool,
    /// Header carries drag region and window controls.
    pub header: bool,
    /// Bottom-right resize grip is shown.
    pub grip: bool,
}

/// Part of the chrome under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Minimize,
    ToggleFullscreen,
    Close,
    Resize,
    Body,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, rect: FloatRect, chrome: &Chrome<'_>);

    fn hit_test(&self, rect: FloatRect, point: Point, chrome: &Chrome<'_>)
    -> Option<HeaderAction>;

    /// Area left for panel content inside the chrome.
    fn content_rect(&self, rect: FloatRect) -> FloatRect {
        FloatRect::new(
            rect.x.saturating_add(1),
            rect.y.saturating_add(1),
            rect.width.saturating_sub(2),
            rect.height.saturating_sub(2),
        )
    }
}

#[derive(Debug, Default)]
pub struct DeskDecorator;

impl DeskDecorator {
    fn controls_visible(rect: FloatRect, chrome: &Chrome<'_>) -> bool {
        chrome.header && rect.width >= CONTROLS_WIDTH + 2
    }
}

fn put(frame: &mut UiFrame<'_>, x: i64, y: i64, symbol: &str, style: Style) {
    let area = frame.area();
    if x < area.x as i64
        || y < area.y as i64
        || x >= area.x as i64 + area.width as i64
        || y >= area.y as i64 + area.height as i64
    {
        return;
    }
    if let Some(cell) = frame.buffer_mut().cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn put_str(frame: &mut UiFrame<'_>, x: i64, y: i64, max_x: i64, text: &str, style: Style) {
    for (idx, ch) in text.chars().enumerate() {
        let cx = x + idx as i64;
        if cx >= max_x {
            break;
        }
        let mut buf = [0u8; 4];
        put(frame, cx, y, ch.encode_utf8(&mut buf), style);
    }
}

impl WindowDecorator for DeskDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, rect: FloatRect, chrome: &Chrome<'_>) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let header_style = Style::default()
            .bg(theme::decorator_header_bg(chrome.focused))
            .fg(theme::decorator_header_fg())
            .add_modifier(if chrome.focused {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let border_style = Style::default()
            .fg(theme::decorator_border(chrome.focused))
            .bg(theme::panel_body_bg());

        let left = rect.x as i64;
        let top = rect.y as i64;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        // Body
        if let Some(body) = frame.visible(self.content_rect(rect)) {
            frame.fill(
                body,
                Style::default()
                    .bg(theme::panel_body_bg())
                    .fg(theme::panel_body_fg()),
            );
        }

        // Header bar
        for x in left..=right {
            put(frame, x, top, " ", header_style);
        }
        let controls = Self::controls_visible(rect, chrome);
        let title_end = if controls {
            right + 1 - CONTROLS_WIDTH as i64
        } else {
            right
        };
        put_str(frame, left + 1, top, title_end, chrome.title, header_style);
        if controls {
            let start = right + 1 - CONTROLS_WIDTH as i64;
            put_str(frame, start, top, right + 1, "[_][□]", header_style);
            let close_style = header_style.fg(theme::decorator_close());
            put_str(frame, start + 6, top, right + 1, "[x]", close_style);
        }

        // Sides
        for y in (top + 1)..bottom {
            put(frame, left, y, "│", border_style);
            put(frame, right, y, "│", border_style);
        }

        // Bottom edge
        for x in left..=right {
            let symbol = if x == left {
                "└"
            } else if x == right {
                if chrome.grip { "◢" } else { "┘" }
            } else {
                "─"
            };
            put(frame, x, bottom, symbol, border_style);
        }
    }

    fn hit_test(
        &self,
        rect: FloatRect,
        point: Point,
        chrome: &Chrome<'_>,
    ) -> Option<HeaderAction> {
        if !rect.contains(point) {
            return None;
        }
        let px = point.x as i64;
        let py = point.y as i64;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        if py == rect.y as i64 {
            if !chrome.header {
                return Some(HeaderAction::Body);
            }
            if Self::controls_visible(rect, chrome) {
                let start = right + 1 - CONTROLS_WIDTH as i64;
                if px >= start {
                    return Some(match (px - start) / 3 {
                        0 => HeaderAction::Minimize,
                        1 => HeaderAction::ToggleFullscreen,
                        _ => HeaderAction::Close,
                    });
                }
            }
            return Some(HeaderAction::Drag);
        }
        if chrome.grip && py == bottom && px >= right - 1 {
            return Some(HeaderAction::Resize);
        }
        Some(HeaderAction::Body)
    }
}
