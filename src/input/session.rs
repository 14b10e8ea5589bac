//! Per-gesture session state.
//!
//! Created at pointer-down, fully cleared at pointer-up/leave/cancel;
//! nothing in here survives across gestures. The session is owned by the
//! dispatcher and passed by reference into whichever processor is active,
//! so "session fully reset" is verifiable in one place.

use crate::constants::LONG_PRESS_MS;
use crate::element::ElementId;
use crate::geometry::{Point, Rect};
use crate::input::shape_move::DragState;
use std::time::{Duration, Instant};

/// Cancellable long-press deadline. At most one is live per session;
/// every transition that supersedes it must cancel it before proceeding.
#[derive(Debug, Default)]
pub struct LongPressTimer {
    deadline: Option<Instant>,
}

impl LongPressTimer {
    /// Arm the timer at `now`. Re-arming while live is a programming
    /// error; the stale deadline is replaced so it can never fire after
    /// its gesture ended.
    pub fn arm(&mut self, now: Instant) {
        debug_assert!(self.deadline.is_none(), "long-press timer armed while live");
        if self.deadline.is_some() {
            tracing::warn!("long-press timer re-armed while live; replacing deadline");
        }
        self.deadline = Some(now + Duration::from_millis(LONG_PRESS_MS));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Consume the deadline if it has passed. Returns whether it fired.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.expired(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

/// Live rubber-band rectangle: anchor at the down point, current corner
/// tracking the pointer.
#[derive(Debug, Clone, Copy)]
pub struct SelectRect {
    pub anchor: Point,
    pub current: Point,
}

impl SelectRect {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    /// Currently rendered bounds, with the anchor corner flipped on
    /// negative deltas.
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.anchor, self.current)
    }
}

/// Transient per-gesture state.
#[derive(Debug, Default)]
pub struct InteractionSession {
    /// Element the gesture went down on; cleared by the first move, so a
    /// surviving value at pointer-up means "this was a plain click".
    pub down_elem: Option<ElementId>,
    /// Whether the press began on a shape in the current selection set.
    pub is_down_on_selected_shape: bool,
    /// Live rubber-band rectangle, if rect-select is active.
    pub select_rect: Option<SelectRect>,
    pub long_press: LongPressTimer,
    /// Per-element drag bookkeeping for the move primitive.
    pub drag: DragState,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything; called after every terminal transition.
    pub fn reset(&mut self) {
        self.down_elem = None;
        self.is_down_on_selected_shape = false;
        self.select_rect = None;
        self.long_press.cancel();
        self.drag.clear();
    }

    /// True when no gesture state is held, for invariant checks in tests.
    pub fn is_clear(&self) -> bool {
        self.down_elem.is_none()
            && !self.is_down_on_selected_shape
            && self.select_rect.is_none()
            && !self.long_press.is_armed()
            && self.drag.is_clear()
    }
}
