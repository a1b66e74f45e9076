use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::style::Color;

// Centralized theme colors. The desk reads them every frame, so flipping
// high-contrast mode takes effect on the next draw.

static HIGH_CONTRAST: AtomicBool = AtomicBool::new(false);

pub const CYBER_PRIMARY_RGB: (u8, u8, u8) = (0, 255, 255);
pub const CYBER_ACCENT_RGB: (u8, u8, u8) = (255, 0, 128);
pub const CYBER_SURFACE_RGB: (u8, u8, u8) = (8, 16, 24);
pub const CYBER_BORDER_RGB: (u8, u8, u8) = (0, 110, 130);

pub fn set_high_contrast(enabled: bool) {
    HIGH_CONTRAST.store(enabled, Ordering::Relaxed);
}

pub fn high_contrast() -> bool {
    HIGH_CONTRAST.load(Ordering::Relaxed)
}

/// Map an RGB triple to truecolor when `COLORTERM` advertises it, otherwise
/// to the nearest entry of the xterm 6x6x6 cube.
pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    if let Ok(var) = std::env::var("COLORTERM") {
        let var = var.to_lowercase();
        if var.contains("truecolor") || var.contains("24bit") {
            return Color::Rgb(rgb.0, rgb.1, rgb.2);
        }
    }
    Color::Indexed(xterm_cube_index(rgb))
}

fn xterm_cube_index((r, g, b): (u8, u8, u8)) -> u8 {
    let level = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

pub fn primary() -> Color {
    if high_contrast() {
        Color::White
    } else {
        rgb_to_color(CYBER_PRIMARY_RGB)
    }
}

pub fn accent() -> Color {
    if high_contrast() {
        Color::Yellow
    } else {
        rgb_to_color(CYBER_ACCENT_RGB)
    }
}

// Desktop
pub fn desktop_bg() -> Color {
    if high_contrast() {
        Color::Black
    } else {
        rgb_to_color(CYBER_SURFACE_RGB)
    }
}
pub fn desktop_grid() -> Color {
    if high_contrast() {
        Color::Black
    } else {
        rgb_to_color((0, 40, 48))
    }
}
pub fn icon_fg() -> Color {
    primary()
}

// Decorator
pub fn decorator_header_bg(focused: bool) -> Color {
    match (high_contrast(), focused) {
        (true, true) => Color::White,
        (true, false) => Color::Gray,
        (false, true) => rgb_to_color(CYBER_BORDER_RGB),
        (false, false) => Color::DarkGray,
    }
}
pub fn decorator_header_fg() -> Color {
    if high_contrast() {
        Color::Black
    } else {
        Color::White
    }
}
pub fn decorator_border(focused: bool) -> Color {
    if focused { primary() } else { Color::DarkGray }
}
pub fn decorator_close() -> Color {
    if high_contrast() {
        Color::Black
    } else {
        Color::LightRed
    }
}
pub fn panel_body_bg() -> Color {
    Color::Black
}
pub fn panel_body_fg() -> Color {
    if high_contrast() {
        Color::White
    } else {
        Color::Gray
    }
}

// Taskbar
pub fn taskbar_bg() -> Color {
    if high_contrast() {
        Color::White
    } else {
        Color::DarkGray
    }
}
pub fn taskbar_fg() -> Color {
    Color::Black
}
pub fn taskbar_active_bg() -> Color {
    primary()
}
pub fn taskbar_minimized_fg() -> Color {
    if high_contrast() {
        Color::DarkGray
    } else {
        Color::Gray
    }
}

// Status / indicator
pub fn success() -> Color {
    Color::Green
}
pub fn warning() -> Color {
    if high_contrast() {
        Color::Yellow
    } else {
        accent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_index_covers_corners() {
        assert_eq!(xterm_cube_index((0, 0, 0)), 16);
        assert_eq!(xterm_cube_index((255, 255, 255)), 231);
        assert_eq!(xterm_cube_index((0, 255, 255)), 16 + 6 * 5 + 5);
    }

    #[test]
    fn primary_returns_a_color_variant() {
        match rgb_to_color(CYBER_PRIMARY_RGB) {
            Color::Rgb(_, _, _) | Color::Indexed(_) => {}
            other => panic!("unexpected color variant {other:?}"),
        }
    }
}
