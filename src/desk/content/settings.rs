use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{ContentContext, ContentRequest, PanelContent};
use crate::settings::DesktopSettings;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::PanelEventKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Language,
    Display,
    Security,
}

impl SettingsTab {
    const ALL: [SettingsTab; 3] = [
        SettingsTab::Language,
        SettingsTab::Display,
        SettingsTab::Security,
    ];

    fn label(self) -> &'static str {
        match self {
            SettingsTab::Language => "Language",
            SettingsTab::Display => "Display",
            SettingsTab::Security => "Security",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn items(self) -> &'static [Item] {
        match self {
            SettingsTab::Language => &[Item::Language],
            SettingsTab::Display => &[Item::Sound, Item::HighContrast, Item::ReduceMotion],
            SettingsTab::Security => &[
                Item::AdvancedWarnings,
                Item::RequireAccess,
                Item::AutoLockSecret,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Language,
    Sound,
    HighContrast,
    ReduceMotion,
    AdvancedWarnings,
    RequireAccess,
    AutoLockSecret,
}

impl Item {
    fn label(self) -> &'static str {
        match self {
            Item::Language => "Interface language",
            Item::Sound => "Click sounds",
            Item::HighContrast => "High contrast",
            Item::ReduceMotion => "Reduce motion",
            Item::AdvancedWarnings => "Advanced warnings",
            Item::RequireAccess => "Require access code",
            Item::AutoLockSecret => "Auto-lock secret folder",
        }
    }

    fn flag(self, settings: &mut DesktopSettings) -> Option<&mut bool> {
        match self {
            Item::Language => None,
            Item::Sound => Some(&mut settings.sound),
            Item::HighContrast => Some(&mut settings.high_contrast),
            Item::ReduceMotion => Some(&mut settings.reduce_motion),
            Item::AdvancedWarnings => Some(&mut settings.advanced_warnings),
            Item::RequireAccess => Some(&mut settings.require_access),
            Item::AutoLockSecret => Some(&mut settings.auto_lock_secret),
        }
    }

    fn value(self, settings: &DesktopSettings) -> String {
        let mut copy = settings.clone();
        match self.flag(&mut copy) {
            Some(on) => (if *on { "[x]" } else { "[ ]" }).to_string(),
            None => format!("< {} >", settings.language_label()),
        }
    }
}

/// Preferences editor. Every change is sent to the desk as a whole new
/// record, which applies and persists it.
#[derive(Debug, Default)]
pub struct SettingsView {
    tab: SettingsTab,
    row: usize,
    request: Option<ContentRequest>,
}

impl SettingsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> SettingsTab {
        self.tab
    }

    pub fn activate_tab(&mut self, tab: SettingsTab) {
        self.tab = tab;
        self.row = 0;
    }

    fn step_tab(&mut self, forward: bool) {
        let len = SettingsTab::ALL.len();
        let idx = self.tab.index();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.activate_tab(SettingsTab::ALL[next]);
    }

    fn toggle(&mut self, current: &DesktopSettings) {
        let Some(item) = self.tab.items().get(self.row).copied() else {
            return;
        };
        let mut next = current.clone();
        match item.flag(&mut next) {
            Some(flag) => *flag = !*flag,
            None => next.cycle_language(),
        }
        self.request = Some(ContentRequest::SaveSettings(next));
    }
}

impl PanelContent for SettingsView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ContentContext<'_>) {
        let body = Style::default().fg(theme::panel_body_fg());
        let mut x = area.x;
        for tab in SettingsTab::ALL {
            let label = format!(" {} ", tab.label());
            let style = if tab == self.tab {
                body.fg(theme::primary())
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                body
            };
            frame.set_string(area, x, area.y, &label, style);
            x = x.saturating_add(label.chars().count() as u16 + 1);
        }

        let settings = ctx.settings();
        for (idx, item) in self.tab.items().iter().enumerate() {
            let y = area.y.saturating_add(2 + idx as u16);
            let selected = idx == self.row;
            let style = if selected && ctx.focused() {
                body.fg(theme::primary()).add_modifier(Modifier::BOLD)
            } else {
                body
            };
            let marker = if selected { ">" } else { " " };
            let line = format!("{marker} {} {}", item.value(settings), item.label());
            frame.set_string(area, area.x, y, &line, style);
        }

        if self.tab == SettingsTab::Security && settings.advanced_warnings {
            let y = area.y.saturating_add(2 + self.tab.items().len() as u16 + 1);
            frame.set_string(
                area,
                area.x,
                y,
                "! Changes apply to this device only.",
                body.fg(theme::warning()),
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &ContentContext<'_>) -> bool {
        let rows = self.tab.items().len();
        match key.code {
            KeyCode::Left => self.step_tab(false),
            KeyCode::Right => self.step_tab(true),
            KeyCode::Up => self.row = self.row.saturating_sub(1),
            KeyCode::Down => self.row = (self.row + 1).min(rows.saturating_sub(1)),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(ctx.settings()),
            _ => return false,
        }
        true
    }

    fn on_panel_event(&mut self, event: &PanelEventKind) {
        if *event == PanelEventKind::Opened {
            self.activate_tab(SettingsTab::Language);
        }
    }

    fn take_request(&mut self) -> Option<ContentRequest> {
        self.request.take()
    }
}
