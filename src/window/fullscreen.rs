//! Host fullscreen capability.
//!
//! The platform may refuse a request (unsupported terminal, denied by the
//! user). The window manager never surfaces that refusal; it switches the
//! panel to [`FullscreenMode::Inset`], which fills the desktop area instead.

use thiserror::Error;

use super::PanelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenMode {
    #[default]
    Windowed,
    /// The platform granted fullscreen presentation.
    Native,
    /// Fallback: the panel fills the desktop area.
    Inset,
}

impl FullscreenMode {
    pub fn is_fullscreen(self) -> bool {
        self != FullscreenMode::Windowed
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FullscreenError {
    #[error("fullscreen is not supported by this host")]
    Unsupported,
    #[error("fullscreen request for `{0}` was denied")]
    Denied(PanelId),
}

pub trait FullscreenPlatform: std::fmt::Debug {
    fn request(&mut self, id: &PanelId) -> Result<(), FullscreenError>;
    fn exit(&mut self, id: &PanelId);
}

/// Grants every request; used by hosts that can take over the whole screen.
#[derive(Debug, Default)]
pub struct GrantingPlatform;

impl FullscreenPlatform for GrantingPlatform {
    fn request(&mut self, _id: &PanelId) -> Result<(), FullscreenError> {
        Ok(())
    }

    fn exit(&mut self, _id: &PanelId) {}
}

/// Refuses every request, forcing the inset fallback.
#[derive(Debug, Default)]
pub struct UnsupportedPlatform;

impl FullscreenPlatform for UnsupportedPlatform {
    fn request(&mut self, _id: &PanelId) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }

    fn exit(&mut self, _id: &PanelId) {}
}
