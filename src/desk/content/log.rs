use ratatui::layout::Rect;
use ratatui::style::Style;

use super::{ContentContext, PanelContent};
use crate::log_buffer::LogHandle;
use crate::theme;
use crate::ui::UiFrame;

/// Live tail of the in-memory tracing buffer.
#[derive(Debug)]
pub struct LogView {
    handle: LogHandle,
}

impl LogView {
    pub fn new(handle: LogHandle) -> Self {
        Self { handle }
    }
}

impl PanelContent for LogView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ContentContext<'_>) {
        if self.handle.is_empty() {
            frame.set_string(
                area,
                area.x,
                area.y,
                "(no log output yet)",
                Style::default().fg(theme::panel_body_fg()),
            );
            return;
        }
        let lines = self.handle.tail(area.height as usize);
        let style = Style::default().fg(theme::panel_body_fg());
        super::render_lines(frame, area, lines.iter().map(|l| (l.as_str(), style)));
    }
}
