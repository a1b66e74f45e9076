//! Window-manager tuning knobs.

use crate::constants::{
    MIN_PANEL_HEIGHT, MIN_PANEL_WIDTH, TERMINAL_MIN_PANEL_HEIGHT, TERMINAL_MIN_PANEL_WIDTH,
    TERMINAL_VIEWPORT_MARGIN, VIEWPORT_MARGIN,
};
use crate::geometry::Size;

/// Size limits applied to every resizable panel.
///
/// `Default` carries the reference values in logical pixels; the terminal
/// front end uses [`WindowConfig::terminal`], which is scaled to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub min_width: u32,
    pub min_height: u32,
    pub viewport_margin: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_PANEL_WIDTH,
            min_height: MIN_PANEL_HEIGHT,
            viewport_margin: VIEWPORT_MARGIN,
        }
    }
}

impl WindowConfig {
    pub const fn terminal() -> Self {
        Self {
            min_width: TERMINAL_MIN_PANEL_WIDTH,
            min_height: TERMINAL_MIN_PANEL_HEIGHT,
            viewport_margin: TERMINAL_VIEWPORT_MARGIN,
        }
    }

    pub const fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Largest size a panel may take inside `viewport`.
    ///
    /// Never smaller than the minimum, so a tiny viewport cannot invert the
    /// clamp interval.
    pub fn max_size(&self, viewport: Size) -> Size {
        Size::new(
            viewport
                .width
                .saturating_sub(self.viewport_margin)
                .max(self.min_width),
            viewport
                .height
                .saturating_sub(self.viewport_margin)
                .max(self.min_height),
        )
    }
}
