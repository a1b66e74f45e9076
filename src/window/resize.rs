use crate::config::WindowConfig;
use crate::geometry::{Point, Size, clamp_span};

use super::PanelId;

/// Reference captured when the corner grip is grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub start_pointer: Point,
    pub start_size: Size,
}

/// Closed interval every resized dimension is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeLimits {
    pub min: Size,
    pub max: Size,
}

impl ResizeLimits {
    pub fn new(config: &WindowConfig, viewport: Size) -> Self {
        Self {
            min: config.min_size(),
            max: config.max_size(viewport),
        }
    }
}

/// Size resulting from dragging the bottom-right grip from `start_pointer`
/// to `pointer`, clamped to `limits`.
pub fn apply_resize_drag(
    start_size: Size,
    start_pointer: Point,
    pointer: Point,
    limits: ResizeLimits,
) -> Size {
    let dx = pointer.x as i64 - start_pointer.x as i64;
    let dy = pointer.y as i64 - start_pointer.y as i64;
    Size::new(
        clamp_span(
            start_size.width as i64 + dx,
            limits.min.width,
            limits.max.width,
        ),
        clamp_span(
            start_size.height as i64 + dy,
            limits.min.height,
            limits.max.height,
        ),
    )
}

/// Drives the bottom-right resize grip of one panel.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    session: Option<ResizeDrag>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<ResizeDrag> {
        self.session
    }

    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    /// Start resizing from the panel's currently rendered size.
    pub fn begin(&mut self, pointer: Point, rendered: Size) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(ResizeDrag {
            start_pointer: pointer,
            start_size: rendered,
        });
        true
    }

    pub fn update(&mut self, pointer: Point, limits: ResizeLimits) -> Option<Size> {
        let drag = self.session?;
        Some(apply_resize_drag(
            drag.start_size,
            drag.start_pointer,
            pointer,
            limits,
        ))
    }

    pub fn end(&mut self) -> bool {
        self.session.take().is_some()
    }
}

/// What kind of node appeared in the desktop tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A floating application panel; gets a resize grip.
    Panel,
    /// Full-screen overlays such as the access gate; never resizable.
    Overlay,
}

/// A node reported to the structural observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedNode {
    pub id: PanelId,
    pub kind: NodeKind,
}

impl AddedNode {
    pub fn panel(id: impl Into<PanelId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Panel,
        }
    }

    pub fn overlay(id: impl Into<PanelId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Overlay,
        }
    }

    pub fn is_resizable(&self) -> bool {
        self.kind == NodeKind::Panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(viewport: Size) -> ResizeLimits {
        ResizeLimits::new(&WindowConfig::default(), viewport)
    }

    #[test]
    fn grows_by_pointer_delta() {
        let size = apply_resize_drag(
            Size::new(400, 300),
            Point::new(400, 300),
            Point::new(500, 340),
            limits(Size::new(1280, 800)),
        );
        assert_eq!(size, Size::new(500, 340));
    }

    #[test]
    fn clamps_to_viewport_minus_margin() {
        let size = apply_resize_drag(
            Size::new(400, 300),
            Point::new(0, 0),
            Point::new(10_000, 10_000),
            limits(Size::new(1280, 800)),
        );
        assert_eq!(size, Size::new(1240, 760));
    }

    #[test]
    fn clamps_to_minimum() {
        let size = apply_resize_drag(
            Size::new(400, 300),
            Point::new(0, 0),
            Point::new(-10_000, -10_000),
            limits(Size::new(1280, 800)),
        );
        assert_eq!(size, Size::new(220, 120));
    }

    #[test]
    fn controller_ignores_second_begin() {
        let mut resize = ResizeController::new();
        assert!(resize.begin(Point::new(10, 10), Size::new(300, 200)));
        assert!(!resize.begin(Point::new(90, 90), Size::new(999, 999)));
        let drag = resize.session().expect("active");
        assert_eq!(drag.start_size, Size::new(300, 200));
        assert!(resize.end());
        assert!(!resize.is_resizing());
        assert_eq!(
            resize.update(Point::new(0, 0), limits(Size::new(800, 600))),
            None
        );
    }

    #[test]
    fn overlays_are_not_resizable() {
        assert!(AddedNode::panel("notes").is_resizable());
        assert!(!AddedNode::overlay("access-modal").is_resizable());
    }
}
