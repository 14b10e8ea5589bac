//! Shape move primitive - shared drag-translation logic.
//!
//! Used by every processor that drags something: canvas pans, single and
//! group shape moves. The delta is measured against the last processed
//! pointer position for that element, not the original down position, so
//! sub-pixel coalesced events cannot drift and a repeated event
//! contributes a zero delta.

use crate::diagram::Diagram;
use crate::element::{ElementId, UpdatePatch};
use crate::geometry::Point;
use crate::input::event::PointerEvent;
use std::collections::HashMap;

/// Per-gesture drag bookkeeping, keyed by element identity.
#[derive(Debug, Default)]
pub struct DragState {
    /// Pointer position at gesture start; baseline for an element's
    /// first move.
    origin: Option<Point>,
    /// Last processed pointer position per dragged element.
    last: HashMap<ElementId, Point>,
}

impl DragState {
    /// Record the gesture's down point.
    pub fn begin(&mut self, origin: Point) {
        self.origin = Some(origin);
    }

    /// The gesture's down point, if a gesture is underway.
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Advance an element's drag to `client`, returning the delta since
    /// its last processed position. Idempotent: the same position twice
    /// yields a zero delta.
    fn advance(&mut self, id: ElementId, client: Point) -> Point {
        let baseline = self.last.get(&id).copied().or(self.origin).unwrap_or(client);
        self.last.insert(id, client);
        client - baseline
    }

    /// Drop an element's bookkeeping. Returns whether any existed.
    fn end(&mut self, id: ElementId) -> bool {
        self.last.remove(&id).is_some()
    }

    pub fn is_dragging(&self, id: ElementId) -> bool {
        self.last.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.last.clear();
    }

    pub fn is_clear(&self) -> bool {
        self.origin.is_none() && self.last.is_empty()
    }
}

/// Translate an element by the pointer's movement since the last
/// processed event, applying it as a position update.
pub fn shape_move(drag: &mut DragState, diagram: &mut Diagram, id: ElementId, evt: &PointerEvent) {
    let delta = drag.advance(id, evt.client);
    if delta == Point::ZERO {
        return;
    }
    let Some(position) = diagram.position_get(id) else {
        tracing::warn!(element = ?id, "shape_move on unknown element");
        return;
    };
    // position_get succeeded, so update cannot miss
    let _ = diagram.update(id, &UpdatePatch::position(position + delta));
}

/// Finalize a drag: clear the transient bookkeeping and leave the
/// element at its last applied position. Calling this without a
/// preceding move is harmless (a plain click ends this way too).
pub fn shape_move_end(drag: &mut DragState, id: ElementId) {
    if !drag.end(id) {
        tracing::trace!(element = ?id, "move end without move");
    }
}
