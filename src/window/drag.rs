use crate::geometry::{Offset, Point};

/// Reference point captured when a header drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub start_pointer: Point,
    pub start_offset: Offset,
}

/// Moves a panel by translating it relative to its anchor.
///
/// The controller owns the panel's offset. A drag only ever changes the
/// offset, never the size, so moving a panel does not relayout its content.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    offset: Offset,
    session: Option<HeaderDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn session(&self) -> Option<HeaderDrag> {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag at `pointer`. Returns `false` when a drag is already in
    /// progress; the running session keeps its original reference point.
    pub fn begin(&mut self, pointer: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(HeaderDrag {
            start_pointer: pointer,
            start_offset: self.offset,
        });
        true
    }

    /// Follow the pointer. Returns the new offset, or `None` when idle.
    pub fn update(&mut self, pointer: Point) -> Option<Offset> {
        let drag = self.session?;
        self.offset = drag.start_offset + (pointer - drag.start_pointer);
        Some(self.offset)
    }

    /// Finish the drag; the current offset becomes the next baseline.
    pub fn end(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Return the panel to its anchor and drop any running session.
    pub fn reset(&mut self) {
        self.offset = Offset::ZERO;
        self.session = None;
    }
}
