//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Panels live in signed desktop coordinates and are routinely dragged
//! partly off screen. Every draw call made by the desk goes through this
//! type, which clips to the frame so nothing writes outside the buffer.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::geometry::FloatRect;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    /// Visible part of a signed rectangle, in buffer coordinates.
    pub fn visible(&self, rect: FloatRect) -> Option<Rect> {
        let bounds = FloatRect::new(
            self.area.x as i32,
            self.area.y as i32,
            self.area.width as u32,
            self.area.height as u32,
        );
        let clipped = rect.intersection(bounds)?;
        Some(Rect::new(
            clipped.x as u16,
            clipped.y as u16,
            clipped.width as u16,
            clipped.height as u16,
        ))
    }

    /// Paint every cell of `area` with a blank symbol in `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(area) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Write `text` at (`x`, `y`), clipped to both `bounds` and the frame.
    pub fn set_string(&mut self, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
        let Some(bounds) = self.clip_rect(bounds) else {
            return;
        };
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Signed rectangle covering the same cells as `rect`.
pub fn float_rect(rect: Rect) -> FloatRect {
    FloatRect::new(
        rect.x as i32,
        rect.y as i32,
        rect.width as u32,
        rect.height as u32,
    )
}

/// Terminal cell containing `(column, row)`.
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(""))
            .collect()
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn set_string_clips_to_bounds() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.set_string(Rect::new(2, 0, 3, 1), 2, 0, "hello", Style::default());
        // outside bounds is ignored
        ui.set_string(area, 100, 0, "x", Style::default());
        assert_eq!(row(&buf, 0), "  hel     ");
    }

    #[test]
    fn visible_clips_negative_origin() {
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);
        let ui = UiFrame::from_parts(area, &mut buf);
        assert_eq!(
            ui.visible(FloatRect::new(-3, 1, 6, 10)),
            Some(Rect::new(0, 1, 3, 3))
        );
        assert_eq!(ui.visible(FloatRect::new(20, 0, 2, 2)), None);
    }

    #[test]
    fn fill_stays_inside_frame() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.fill(Rect::new(2, 1, 10, 10), Style::default().bg(ratatui::style::Color::Red));
        let inside = buf.cell((3, 1)).map(|c| c.style().bg);
        let outside = buf.cell((1, 1)).map(|c| c.style().bg);
        assert_eq!(inside, Some(Some(ratatui::style::Color::Red)));
        assert_ne!(outside, inside);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(1, 1, 2, 2);
        assert!(rect_contains(r, 1, 1));
        assert!(rect_contains(r, 2, 2));
        assert!(!rect_contains(r, 3, 1));
    }
}
