//! Pointer event types delivered to processors.
//!
//! A raw platform event is resolved to a target element exactly once,
//! upstream of all processors; what processors see is this wrapper.

use crate::element::ElementId;
use crate::geometry::Point;
use std::time::Instant;

/// Platform pointer identity, used by the capture mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The primary pointer (mouse, or first touch).
    pub const PRIMARY: PointerId = PointerId(1);
}

/// What happened. `LongPress` and `Unselect` are engine-synthesized:
/// the first when the long-press deadline passes, the second when the
/// singular selection moves away from an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    /// The pointer left the drawing surface; treated as a normal terminal
    /// transition, never as an abort channel.
    CanvasLeave,
    LongPress,
    Unselect,
}

/// A raw pointer event with its resolved target element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    /// The element the pointer logically addresses.
    pub target: ElementId,
    /// Raw client coordinates, in view space.
    pub client: Point,
    pub pointer_id: PointerId,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(kind: EventKind, target: ElementId, client: Point, time: Instant) -> Self {
        Self {
            kind,
            target,
            client,
            pointer_id: PointerId::PRIMARY,
            time,
        }
    }

    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}
