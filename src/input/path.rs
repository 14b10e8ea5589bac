//! Path processor - minimal handling for edge-like elements.
//!
//! Select on release, clear on deselect. No timers, no observable
//! failure modes.

use crate::diagram::Diagram;
use crate::element::{ElementId, ElementKind, StateFlag};
use crate::input::dispatcher::EventProcessor;
use crate::input::event::{EventKind, PointerEvent};
use crate::input::session::InteractionSession;

#[derive(Debug, Default)]
pub struct PathProcessor;

impl PathProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl EventProcessor for PathProcessor {
    fn can_process(&mut self, diagram: &mut Diagram, elem: ElementId) -> bool {
        diagram.kind_of(elem) == Some(ElementKind::Path)
    }

    fn process(
        &mut self,
        diagram: &mut Diagram,
        _session: &mut InteractionSession,
        elem: ElementId,
        evt: &PointerEvent,
    ) {
        match evt.kind {
            EventKind::PointerUp => {
                // Ownership of "currently selected single element" is
                // global and singular; the setter displaces the old one.
                diagram.select(Some(elem));
            }
            EventKind::Unselect => {
                diagram.state_set(elem, StateFlag::Selected, false);
            }
            _ => {}
        }
    }
}
