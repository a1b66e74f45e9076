//! A fake desktop of floating panels.
//!
//! The window-manager core under [`window`] is headless: it owns the logical
//! state of every panel (offset, size, visibility, fullscreen, z-order) and is
//! driven by pointer gestures and lifecycle calls. The [`desk`] module projects
//! that state onto a terminal through ratatui.

pub mod config;
pub mod constants;
pub mod desk;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod log_buffer;
pub mod runner;
pub mod settings;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

mod manual {
    include!(concat!(env!("OUT_DIR"), "/desk_manual.rs"));
}

pub use manual::{DESK_MANUAL, DeskManual};
