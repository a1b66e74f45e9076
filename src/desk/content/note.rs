use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, PanelContent};
use crate::theme;
use crate::ui::UiFrame;

/// Scratch pad spawned at runtime. Text survives close and reopen.
#[derive(Debug, Default)]
pub struct NoteView {
    text: String,
}

impl NoteView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PanelContent for NoteView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ContentContext<'_>) {
        let style = Style::default().fg(theme::panel_body_fg());
        let mut rows: Vec<String> = self.text.split('\n').map(str::to_string).collect();
        if ctx.focused()
            && let Some(last) = rows.last_mut()
        {
            last.push('▏');
        }
        // keep the caret line visible
        let skip = rows.len().saturating_sub(area.height as usize);
        for (row, line) in rows.iter().skip(skip).enumerate() {
            frame.set_string(area, area.x, area.y + row as u16, line, style);
        }
        if self.text.is_empty() && !ctx.focused() {
            frame.set_string(
                area,
                area.x,
                area.y,
                "Type to take notes.",
                style.add_modifier(Modifier::DIM),
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ContentContext<'_>) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.text.push(c),
            KeyCode::Enter => self.text.push('\n'),
            KeyCode::Backspace => {
                self.text.pop();
            }
            _ => return false,
        }
        true
    }
}
