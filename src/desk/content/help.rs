use crossterm::event::{KeyCode, KeyEvent};
use pulldown_cmark::{Event as MdEvent, Parser, Tag, TagEnd};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, PanelContent};
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Heading,
    Text,
    Code,
}

/// Scrollable, read-only view of the bundled help document.
#[derive(Debug)]
pub struct HelpView {
    lines: Vec<(String, LineKind)>,
    updated: Option<String>,
    scroll: usize,
    page: usize,
}

impl HelpView {
    pub fn new(markdown: &str, modified_rfc3339: &str) -> Self {
        let updated = chrono::DateTime::parse_from_rfc3339(modified_rfc3339)
            .ok()
            .map(|dt| dt.format("%Y-%m-%d").to_string());
        Self {
            lines: flatten_markdown(markdown),
            updated,
            scroll: 0,
            page: 1,
        }
    }

    pub fn from_embedded() -> Self {
        let manual = crate::DESK_MANUAL;
        Self::new(manual.markdown, manual.modified_rfc3339)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.page)
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll as isize + delta;
        self.scroll = next.clamp(0, self.max_scroll() as isize) as usize;
    }
}

fn flatten_markdown(markdown: &str) -> Vec<(String, LineKind)> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut kind = LineKind::Text;
    let mut list_depth = 0usize;
    let mut in_code = false;

    for ev in Parser::new(markdown) {
        match ev {
            MdEvent::Start(Tag::Heading { .. }) => kind = LineKind::Heading,
            MdEvent::Start(Tag::CodeBlock(_)) => in_code = true,
            MdEvent::Start(Tag::List(_)) => list_depth += 1,
            MdEvent::Start(Tag::Item) => {
                current.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                current.push_str("- ");
            }
            MdEvent::End(TagEnd::Heading(_)) => {
                lines.push((std::mem::take(&mut current), LineKind::Heading));
                lines.push((String::new(), LineKind::Text));
                kind = LineKind::Text;
            }
            MdEvent::End(TagEnd::Paragraph) => {
                lines.push((std::mem::take(&mut current), kind));
                if list_depth == 0 {
                    lines.push((String::new(), LineKind::Text));
                }
            }
            MdEvent::End(TagEnd::Item) => {
                if !current.is_empty() {
                    lines.push((std::mem::take(&mut current), kind));
                }
            }
            MdEvent::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    lines.push((String::new(), LineKind::Text));
                }
            }
            MdEvent::End(TagEnd::CodeBlock) => {
                in_code = false;
                if !current.is_empty() {
                    lines.push((std::mem::take(&mut current), LineKind::Code));
                }
            }
            MdEvent::Text(text) if in_code => {
                for (idx, part) in text.split('\n').enumerate() {
                    if idx > 0 {
                        lines.push((std::mem::take(&mut current), LineKind::Code));
                    }
                    current.push_str(part);
                }
            }
            MdEvent::Text(text) => current.push_str(&text),
            MdEvent::Code(text) => {
                current.push('`');
                current.push_str(&text);
                current.push('`');
            }
            MdEvent::SoftBreak => current.push(' '),
            MdEvent::HardBreak => lines.push((std::mem::take(&mut current), kind)),
            MdEvent::Rule => lines.push(("─".repeat(20), LineKind::Text)),
            _ => {}
        }
    }
    if !current.is_empty() {
        lines.push((current, kind));
    }
    while lines.last().is_some_and(|(text, _)| text.is_empty()) {
        lines.pop();
    }
    lines
}

impl PanelContent for HelpView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ContentContext<'_>) {
        if area.height == 0 {
            return;
        }
        let footer_rows = usize::from(self.updated.is_some());
        self.page = (area.height as usize).saturating_sub(footer_rows).max(1);
        self.scroll = self.scroll.min(self.max_scroll());

        let body = Style::default().fg(theme::panel_body_fg());
        for (row, (text, kind)) in self.lines.iter().skip(self.scroll).take(self.page).enumerate() {
            let style = match kind {
                LineKind::Heading => body.fg(theme::primary()).add_modifier(Modifier::BOLD),
                LineKind::Code => body.fg(theme::warning()),
                LineKind::Text => body,
            };
            frame.set_string(area, area.x, area.y + row as u16, text, style);
        }
        if let Some(updated) = &self.updated {
            let footer = format!("Updated {updated}");
            frame.set_string(
                area,
                area.x,
                area.y + area.height - 1,
                &footer,
                body.add_modifier(Modifier::DIM),
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ContentContext<'_>) -> bool {
        let page = self.page as isize;
        match key.code {
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::content::test_support::render_to_string;
    use crate::settings::DesktopSettings;
    use crossterm::event::KeyModifiers;
    use indoc::indoc;

    const DOC: &str = indoc! {"
        # Desk

        Drag a panel by its header.

        - one
        - two

        ```
        cargo run
        ```
    "};

    #[test]
    fn flattens_headings_lists_and_code() {
        let lines = flatten_markdown(DOC);
        let texts: Vec<&str> = lines.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Desk",
                "",
                "Drag a panel by its header.",
                "",
                "- one",
                "- two",
                "",
                "cargo run",
            ]
        );
        assert_eq!(lines[0].1, LineKind::Heading);
        assert_eq!(lines[7].1, LineKind::Code);
    }

    #[test]
    fn shows_update_date_and_scrolls() {
        let mut view = HelpView::new(DOC, "2026-01-02T03:04:05+00:00");
        let out = render_to_string(&mut view, 30, 3);
        assert!(out.contains("Updated 2026-01-02"));
        let settings = DesktopSettings::default();
        let ctx = ContentContext::new(&settings);
        view.handle_key(&KeyEvent::new(KeyCode::End, KeyModifiers::NONE), &ctx);
        assert_eq!(view.scroll(), view.line_count() - 2);
        view.handle_key(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), &ctx);
        assert_eq!(view.scroll(), view.line_count() - 3);
    }

    #[test]
    fn bad_timestamp_hides_footer() {
        let mut view = HelpView::new("hello", "");
        let out = render_to_string(&mut view, 10, 2);
        assert!(out.starts_with("hello"));
        assert!(!out.contains("Updated"));
    }

    #[test]
    fn embedded_manual_is_bundled() {
        let mut view = HelpView::from_embedded();
        assert!(view.line_count() > 10);
        let out = render_to_string(&mut view, 40, 4);
        assert!(out.starts_with(crate::DESK_MANUAL.title));
        assert_eq!(crate::DESK_MANUAL.title, "Faux Desk");
    }
}
