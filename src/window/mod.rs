pub mod decorator;
pub mod drag;
pub mod fullscreen;
pub mod registry;
pub mod resize;

mod window_manager;

use std::borrow::Borrow;
use std::fmt;

use crate::geometry::{FloatRect, Offset, Point, Size};

pub use drag::{DragController, HeaderDrag};
pub use fullscreen::{
    FullscreenError, FullscreenMode, FullscreenPlatform, GrantingPlatform, UnsupportedPlatform,
};
pub use registry::PanelRegistry;
pub use resize::{AddedNode, NodeKind, ResizeController, ResizeDrag, ResizeLimits};
pub use window_manager::{PointerTarget, WindowManager};

/// Stable identifier of a panel, e.g. `"cameras"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(String);

/// Identifier of a trigger or control element owned by the host page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&$ty> for $ty {
            fn from(value: &$ty) -> Self {
                value.clone()
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PanelId);
string_id!(ElementId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
    /// Hidden without teardown; `open` brings it back.
    Minimized,
}

/// What a bound control does to its panel when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Close,
    Minimize,
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEventKind {
    /// Emitted once per `open` call; the host restarts media and the like.
    Opened,
    /// The host runs teardown (pause media, blank embedded sources).
    Closed,
    Minimized,
    /// Emitted after every applied resize so embedded content can re-measure.
    Resized(Size),
    Fullscreen(FullscreenMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEvent {
    pub id: PanelId,
    pub kind: PanelEventKind,
}

impl PanelEvent {
    pub fn new(id: PanelId, kind: PanelEventKind) -> Self {
        Self { id, kind }
    }
}

/// Registration parameters for a panel.
#[derive(Debug, Clone)]
pub struct PanelSpec {
    pub id: PanelId,
    pub title: String,
    pub anchor: Point,
    pub size: Size,
    pub max_size: Option<Size>,
    pub header: bool,
    pub kind: NodeKind,
    pub open: bool,
}

impl PanelSpec {
    pub fn new(id: impl Into<PanelId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            anchor: Point::default(),
            size: Size::new(400, 300),
            max_size: None,
            header: true,
            kind: NodeKind::Panel,
            open: false,
        }
    }

    pub fn with_anchor(mut self, x: i32, y: i32) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Styling constraint that caps the natural size until the panel is
    /// resized by hand.
    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_size = Some(Size::new(width, height));
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    pub fn overlay(mut self) -> Self {
        self.kind = NodeKind::Overlay;
        self
    }

    pub fn initially_open(mut self) -> Self {
        self.open = true;
        self
    }
}

/// Logical state of one panel. Rendering is a projection of this record.
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    title: String,
    kind: NodeKind,
    visibility: Visibility,
    fullscreen: FullscreenMode,
    anchor: Point,
    natural_size: Size,
    max_size: Option<Size>,
    explicit_size: Option<Size>,
    drag: Option<DragController>,
    resize: Option<ResizeController>,
    creation_order: usize,
}

impl Panel {
    fn from_spec(spec: PanelSpec, creation_order: usize) -> Self {
        Self {
            id: spec.id,
            title: spec.title,
            kind: spec.kind,
            visibility: if spec.open {
                Visibility::Open
            } else {
                Visibility::Closed
            },
            fullscreen: FullscreenMode::Windowed,
            anchor: spec.anchor,
            natural_size: spec.size,
            max_size: spec.max_size,
            explicit_size: None,
            drag: spec.header.then(DragController::new),
            resize: None,
            creation_order,
        }
    }

    pub fn id(&self) -> &PanelId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn is_minimized(&self) -> bool {
        self.visibility == Visibility::Minimized
    }

    pub fn fullscreen(&self) -> FullscreenMode {
        self.fullscreen
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn offset(&self) -> Offset {
        self.drag
            .as_ref()
            .map(DragController::offset)
            .unwrap_or_default()
    }

    pub fn has_header(&self) -> bool {
        self.drag.is_some()
    }

    pub fn has_resize_handle(&self) -> bool {
        self.resize.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(DragController::is_dragging)
    }

    pub fn is_resizing(&self) -> bool {
        self.resize
            .as_ref()
            .is_some_and(ResizeController::is_resizing)
    }

    pub fn drag_session(&self) -> Option<HeaderDrag> {
        self.drag.as_ref().and_then(DragController::session)
    }

    pub fn resize_session(&self) -> Option<ResizeDrag> {
        self.resize.as_ref().and_then(ResizeController::session)
    }

    pub fn max_size(&self) -> Option<Size> {
        self.max_size
    }

    pub fn explicit_size(&self) -> Option<Size> {
        self.explicit_size
    }

    pub fn creation_order(&self) -> usize {
        self.creation_order
    }

    /// Size the panel occupies when windowed.
    ///
    /// An explicit size set by a resize wins; otherwise the natural size is
    /// limited by the max-size constraint.
    pub fn rendered_size(&self) -> Size {
        if let Some(size) = self.explicit_size {
            return size;
        }
        match self.max_size {
            Some(max) => self.natural_size.min(max),
            None => self.natural_size,
        }
    }

    /// Windowed rectangle: anchor translated by the drag offset.
    pub fn rect(&self) -> FloatRect {
        FloatRect::from_origin(self.anchor + self.offset(), self.rendered_size())
    }

    /// Fix the panel at `size` and drop the max-size constraint so explicit
    /// sizing takes effect.
    fn pin_size(&mut self, size: Size) {
        self.explicit_size = Some(size);
        self.max_size = None;
    }
}
