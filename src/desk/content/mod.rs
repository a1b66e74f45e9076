//! What lives inside each panel.
//!
//! The window manager only knows rectangles and lifecycle. Everything drawn
//! inside the chrome is a [`PanelContent`], which receives the lifecycle
//! notifications drained from the window manager and applies its own side
//! effects (restart playback, blank an embedded source, and so on).

use std::any::Any;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::settings::DesktopSettings;
use crate::ui::UiFrame;
use crate::window::PanelEventKind;

pub mod embed;
pub mod gate;
pub mod help;
pub mod log;
pub mod media;
pub mod note;
pub mod settings;
pub mod walkie;

pub use embed::EmbedView;
pub use gate::AccessGate;
pub use help::HelpView;
pub use log::LogView;
pub use media::MediaView;
pub use note::NoteView;
pub use settings::SettingsView;
pub use walkie::WalkieView;

/// UI state handed to content on every call.
#[derive(Debug, Clone, Copy)]
pub struct ContentContext<'a> {
    focused: bool,
    settings: &'a DesktopSettings,
}

impl<'a> ContentContext<'a> {
    pub const fn new(settings: &'a DesktopSettings) -> Self {
        Self {
            focused: false,
            settings,
        }
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn settings(&self) -> &'a DesktopSettings {
        self.settings
    }

    /// Animations freeze on their current frame.
    pub fn reduce_motion(&self) -> bool {
        self.settings.reduce_motion
    }
}

/// Something content asks of the desk after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    /// Replace and persist the desktop preferences.
    SaveSettings(DesktopSettings),
    /// Close the panel hosting this content.
    Dismiss,
}

/// Downcasting support so the desk can hand out concrete views.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub trait PanelContent: std::fmt::Debug + AsAny {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ContentContext<'_>);

    /// Returns `true` when the key was consumed.
    fn handle_key(&mut self, _key: &KeyEvent, _ctx: &ContentContext<'_>) -> bool {
        false
    }

    /// Lifecycle notification for the hosting panel.
    fn on_panel_event(&mut self, _event: &PanelEventKind) {}

    /// Advance animations by one frame.
    fn tick(&mut self, _ctx: &ContentContext<'_>) {}

    fn take_request(&mut self) -> Option<ContentRequest> {
        None
    }
}

/// Draw one line of text per row, top to bottom, clipped to `area`.
pub(crate) fn render_lines<'s>(
    frame: &mut UiFrame<'_>,
    area: Rect,
    lines: impl IntoIterator<Item = (&'s str, ratatui::style::Style)>,
) {
    for (row, (text, style)) in lines.into_iter().enumerate() {
        if row as u16 >= area.height {
            break;
        }
        frame.set_string(area, area.x, area.y + row as u16, text, style);
    }
}
