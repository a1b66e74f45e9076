use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::window::{ElementId, PanelId};

const ICON_WIDTH: u16 = 10;
const ICON_HEIGHT: u16 = 2;
const ICON_GAP: u16 = 1;

/// A desktop shortcut. Activating it opens `panel` through the trigger
/// binding registered under `element`.
#[derive(Debug, Clone)]
pub struct DesktopIcon {
    pub element: ElementId,
    pub panel: PanelId,
    pub glyph: &'static str,
    pub label: &'static str,
}

impl DesktopIcon {
    pub fn new(panel: &str, glyph: &'static str, label: &'static str) -> Self {
        Self {
            element: ElementId::new(format!("{panel}-app-trigger")),
            panel: PanelId::new(panel),
            glyph,
            label,
        }
    }
}

/// Column of shortcuts along the left edge of the desktop.
#[derive(Debug, Default)]
pub struct DesktopIcons {
    icons: Vec<DesktopIcon>,
    hits: Vec<(usize, Rect)>,
}

impl DesktopIcons {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            hits: Vec::new(),
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn get(&self, index: usize) -> Option<&DesktopIcon> {
        self.icons.get(index)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, desktop: Rect) {
        self.hits.clear();
        let glyph_style = Style::default()
            .fg(theme::primary())
            .bg(theme::desktop_bg())
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(theme::icon_fg()).bg(theme::desktop_bg());
        let x = desktop.x.saturating_add(1);
        for (idx, icon) in self.icons.iter().enumerate() {
            let y = desktop
                .y
                .saturating_add(1 + idx as u16 * (ICON_HEIGHT + ICON_GAP));
            if y.saturating_add(ICON_HEIGHT) > desktop.y.saturating_add(desktop.height) {
                break;
            }
            let rect = Rect::new(x, y, ICON_WIDTH.min(desktop.width), ICON_HEIGHT);
            frame.set_string(rect, x, y, &format!(" {} ", icon.glyph), glyph_style);
            frame.set_string(rect, x, y + 1, icon.label, label_style);
            self.hits.push((idx, rect));
        }
    }

    /// Trigger element under the given cell, from the last render.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&DesktopIcon> {
        self.hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .and_then(|(idx, _)| self.icons.get(*idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn element_ids_follow_trigger_naming() {
        let icon = DesktopIcon::new("cameras", "◉", "Cameras");
        assert_eq!(icon.element.as_str(), "cameras-app-trigger");
        assert_eq!(icon.panel.as_str(), "cameras");
    }

    #[test]
    fn hit_test_uses_rendered_layout() {
        let mut icons = DesktopIcons::new(vec![
            DesktopIcon::new("cameras", "◉", "Cameras"),
            DesktopIcon::new("movies", "▶", "Movies"),
        ]);
        assert!(icons.hit_test(1, 1).is_none());

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        icons.render(&mut frame, area);

        assert_eq!(icons.hit_test(2, 1).map(|i| i.label), Some("Cameras"));
        assert_eq!(icons.hit_test(3, 5).map(|i| i.label), Some("Movies"));
        assert!(icons.hit_test(20, 1).is_none());
        assert!(icons.hit_test(2, 3).is_none());
    }

    #[test]
    fn icons_that_do_not_fit_are_skipped() {
        let mut icons = DesktopIcons::new(vec![
            DesktopIcon::new("a", "a", "A"),
            DesktopIcon::new("b", "b", "B"),
        ]);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        icons.render(&mut frame, area);
        assert!(icons.hit_test(1, 1).is_some());
        assert!(icons.hit_test(1, 4).is_none());
    }
}
