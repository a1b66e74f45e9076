use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, PanelContent};
use crate::constants::BLANK_EMBED_SOURCE;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::PanelEventKind;

/// An embedded remote page. The terminal cannot render it, so it shows the
/// source it would be displaying.
#[derive(Debug)]
pub struct EmbedView {
    home: String,
    source: String,
    loads: usize,
}

impl EmbedView {
    pub fn new(home: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            source: BLANK_EMBED_SOURCE.to_string(),
            loads: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// How many times the source has been (re)loaded.
    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn is_blank(&self) -> bool {
        self.source == BLANK_EMBED_SOURCE
    }
}

impl PanelContent for EmbedView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ContentContext<'_>) {
        let bar = format!("⟳ {}", self.source);
        frame.set_string(
            area,
            area.x,
            area.y,
            &bar,
            Style::default()
                .fg(theme::primary())
                .add_modifier(Modifier::UNDERLINED),
        );
        let body = if self.is_blank() {
            "(nothing loaded)"
        } else {
            "Streaming in an external frame."
        };
        frame.set_string(
            area,
            area.x,
            area.y.saturating_add(2),
            body,
            Style::default().fg(theme::panel_body_fg()),
        );
    }

    fn on_panel_event(&mut self, event: &PanelEventKind) {
        match event {
            PanelEventKind::Opened => {
                self.source = self.home.clone();
                self.loads += 1;
            }
            // blanking the source stops playback inside the frame
            PanelEventKind::Closed => self.source = BLANK_EMBED_SOURCE.to_string(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::content::test_support::render_to_string;

    #[test]
    fn open_loads_and_close_blanks() {
        let mut view = EmbedView::new("https://example.test/");
        assert!(view.is_blank());
        view.on_panel_event(&PanelEventKind::Opened);
        assert_eq!(view.source(), "https://example.test/");
        view.on_panel_event(&PanelEventKind::Closed);
        assert_eq!(view.source(), BLANK_EMBED_SOURCE);
        view.on_panel_event(&PanelEventKind::Opened);
        assert_eq!(view.loads(), 2);
    }

    #[test]
    fn renders_current_source() {
        let mut view = EmbedView::new("https://example.test/");
        view.on_panel_event(&PanelEventKind::Opened);
        let out = render_to_string(&mut view, 40, 3);
        assert!(out.contains("https://example.test/"));
    }
}
