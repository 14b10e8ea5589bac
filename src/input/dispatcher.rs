//! Event dispatcher - routes each pointer event to exactly one processor.
//!
//! Processors are tried in a fixed priority order; the first whose
//! `can_process` accepts the target element receives the event.
//! `can_process` must be side-effect-free except for the documented
//! deselect-on-reject behavior of the canvas/selection processor.
//!
//! The dispatcher also owns the interaction session, synthesizes
//! `LongPress` deliveries when the armed deadline passes, and drains the
//! diagram's queued notifications (add/del/move/unselect) after each
//! delivery.

use crate::diagram::{Diagram, DiagramNotice};
use crate::element::ElementId;
use crate::geometry::Point;
use crate::input::canvas_select::CanvasSelectProcessor;
use crate::input::event::{EventKind, PointerEvent, PointerId};
use crate::input::path::PathProcessor;
use crate::input::session::InteractionSession;
use crate::profile_scope;
use crate::spatial::HitTester;
use std::time::Instant;

/// A gesture processor: a pure strategy over the element union, selected
/// by an ordered predicate list.
pub trait EventProcessor {
    /// Whether this processor handles events addressed at `elem`.
    fn can_process(&mut self, diagram: &mut Diagram, elem: ElementId) -> bool;

    /// Handle an event. Only called after `can_process` accepted `elem`.
    fn process(
        &mut self,
        diagram: &mut Diagram,
        session: &mut InteractionSession,
        elem: ElementId,
        evt: &PointerEvent,
    );

    /// Observe element lifecycle notifications.
    fn notice(&mut self, diagram: &Diagram, notice: &DiagramNotice) {
        let _ = (diagram, notice);
    }
}

/// Owns the diagram, the session and the ordered processor list.
pub struct Dispatcher {
    diagram: Diagram,
    session: InteractionSession,
    processors: Vec<Box<dyn EventProcessor>>,
    hit: HitTester,
}

impl Dispatcher {
    /// Dispatcher with no processors installed.
    pub fn new(diagram: Diagram) -> Self {
        Self {
            diagram,
            session: InteractionSession::new(),
            processors: Vec::new(),
            hit: HitTester::new(),
        }
    }

    /// Dispatcher with the standard processor set: canvas/selection
    /// first (its rejection side effect implements click-to-deselect),
    /// then paths.
    pub fn standard(diagram: Diagram) -> Self {
        let mut dispatcher = Self::new(diagram);
        dispatcher.processor_add(Box::new(CanvasSelectProcessor::new()));
        dispatcher.processor_add(Box::new(PathProcessor::new()));
        dispatcher
    }

    /// Append a processor at the lowest priority.
    pub fn processor_add(&mut self, processor: Box<dyn EventProcessor>) {
        self.processors.push(processor);
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    /// Deliver an already-resolved event.
    pub fn dispatch(&mut self, evt: PointerEvent) {
        profile_scope!("dispatch");
        self.fire_long_press(evt.time);
        self.route(&evt);
        self.drain(evt.time);
    }

    /// Resolve raw client coordinates to a target element and dispatch.
    /// A miss degrades to the canvas itself.
    pub fn pointer_input(
        &mut self,
        kind: EventKind,
        client: Point,
        pointer_id: PointerId,
        time: Instant,
    ) -> ElementId {
        profile_scope!("pointer_input");
        // Entries live in canvas-local space
        let canvas_pos = self
            .diagram
            .position_get(self.diagram.canvas_id())
            .unwrap_or(Point::ZERO);
        let target = self
            .hit
            .topmost_at(client - canvas_pos)
            .unwrap_or(self.diagram.canvas_id());
        self.dispatch(PointerEvent::new(kind, target, client, time).with_pointer_id(pointer_id));
        target
    }

    /// Advance the long-press clock. Hosts call this from their frame
    /// loop; `dispatch` also checks on every incoming event.
    pub fn tick(&mut self, now: Instant) {
        self.fire_long_press(now);
        self.drain(now);
    }

    /// Apply pending diagram notifications without delivering an event.
    /// Useful after bulk setup through `diagram_mut`.
    pub fn flush(&mut self) {
        self.drain(Instant::now());
    }

    fn fire_long_press(&mut self, now: Instant) {
        if self.session.long_press.fire(now) {
            let anchor = self.session.drag.origin().unwrap_or(Point::ZERO);
            let evt = PointerEvent::new(EventKind::LongPress, self.diagram.canvas_id(), anchor, now);
            self.route(&evt);
            self.drain(now);
        }
    }

    fn route(&mut self, evt: &PointerEvent) {
        for processor in self.processors.iter_mut() {
            if processor.can_process(&mut self.diagram, evt.target) {
                processor.process(&mut self.diagram, &mut self.session, evt.target, evt);
                return;
            }
        }
        tracing::trace!(target = ?evt.target, kind = ?evt.kind, "no processor accepted event");
    }

    fn drain(&mut self, time: Instant) {
        while let Some(notice) = self.diagram.pop_notice() {
            match notice {
                DiagramNotice::Added(id) => {
                    if let Some(element) = self.diagram.element(id) {
                        self.hit.insert(id, element.position_get(), element.size());
                    }
                    for processor in self.processors.iter_mut() {
                        processor.notice(&self.diagram, &notice);
                    }
                }
                DiagramNotice::Removed(id) => {
                    self.hit.remove(id);
                    for processor in self.processors.iter_mut() {
                        processor.notice(&self.diagram, &notice);
                    }
                }
                DiagramNotice::Moved(id) => {
                    if let Some(element) = self.diagram.element(id) {
                        self.hit.update(id, element.position_get(), element.size());
                    }
                }
                DiagramNotice::Unselect(id) => {
                    let evt = PointerEvent::new(EventKind::Unselect, id, Point::ZERO, time);
                    self.route(&evt);
                }
            }
        }
    }
}
