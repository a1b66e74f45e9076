use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, ContentRequest, PanelContent};
use crate::constants::ACCESS_CODE;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::PanelEventKind;

const MAX_INPUT: usize = 8;

/// Start-up overlay asking for the access code it displays.
#[derive(Debug, Default)]
pub struct AccessGate {
    input: String,
    rejected: bool,
    request: Option<ContentRequest>,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn rejected(&self) -> bool {
        self.rejected
    }

    fn submit(&mut self) {
        if self.input.trim() == ACCESS_CODE {
            self.request = Some(ContentRequest::Dismiss);
            self.rejected = false;
        } else {
            tracing::debug!("access code rejected");
            self.rejected = true;
        }
        self.input.clear();
    }
}

impl PanelContent for AccessGate {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ContentContext<'_>) {
        let body = Style::default().fg(theme::panel_body_fg());
        let title = body.fg(theme::primary()).add_modifier(Modifier::BOLD);
        let masked: String = "•".repeat(self.input.chars().count());
        let field = format!("> {masked}▏");
        let mut lines: Vec<(String, Style)> = vec![
            ("RESTRICTED TERMINAL".to_string(), title),
            (format!("Access code: {ACCESS_CODE}"), body),
            (field, body.fg(theme::primary())),
        ];
        if self.rejected {
            let warning = if ctx.settings().advanced_warnings {
                "Invalid code. This attempt has been recorded."
            } else {
                "Invalid code."
            };
            lines.push((warning.to_string(), body.fg(theme::warning())));
        }
        lines.push((
            "Enter submit · Esc clear".to_string(),
            body.add_modifier(Modifier::DIM),
        ));
        super::render_lines(frame, area, lines.iter().map(|(t, s)| (t.as_str(), *s)));
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ContentContext<'_>) -> bool {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.input.len() < MAX_INPUT {
                    self.input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.input.clear();
                self.rejected = false;
            }
            _ => return false,
        }
        true
    }

    fn on_panel_event(&mut self, event: &PanelEventKind) {
        if matches!(event, PanelEventKind::Opened | PanelEventKind::Closed) {
            self.input.clear();
            self.rejected = false;
        }
    }

    fn take_request(&mut self) -> Option<ContentRequest> {
        self.request.take()
    }
}
