//! Shared crate-wide constants.

/// Minimum panel width enforced by the resize clamp, in logical pixels.
pub const MIN_PANEL_WIDTH: u32 = 220;

/// Minimum panel height enforced by the resize clamp, in logical pixels.
pub const MIN_PANEL_HEIGHT: u32 = 120;

/// Distance a resized panel must keep from the viewport edge.
///
/// A panel can never grow wider than `viewport.width - VIEWPORT_MARGIN` nor
/// taller than `viewport.height - VIEWPORT_MARGIN`.
pub const VIEWPORT_MARGIN: u32 = 40;

/// Minimum panel width for the terminal profile, in cells.
pub const TERMINAL_MIN_PANEL_WIDTH: u32 = 22;

/// Minimum panel height for the terminal profile, in cells.
///
/// Border, header and one row of content need at least this much.
pub const TERMINAL_MIN_PANEL_HEIGHT: u32 = 5;

/// Viewport margin for the terminal profile, in cells.
pub const TERMINAL_VIEWPORT_MARGIN: u32 = 2;

/// Storage key for persisted desktop preferences.
pub const SETTINGS_KEY: &str = "axl_settings_v1";

/// Source shown by an embed panel after it has been closed.
pub const BLANK_EMBED_SOURCE: &str = "about:blank";

/// Viewport assumed until the host reports its real size.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Code printed on the access gate; the gate is a prop, not a lock.
pub const ACCESS_CODE: &str = "1324";
