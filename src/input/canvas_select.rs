//! Canvas/selection processor - the central gesture state machine.
//!
//! One processor disambiguates four intents that share the same raw
//! signal (pointer down, then movement):
//!
//! ```text
//! Idle -> Panning          (move before the long-press deadline, on canvas)
//! Idle -> GroupMoving      (move before the deadline, press began on a selected shape)
//! Idle -> RectSelecting    (500ms hold uninterrupted by movement)
//! Idle -> Click            (up with no intervening move)
//! Any  -> Idle             (pointer up / canvas leave)
//! ```
//!
//! The fixed 500ms hold is the load-bearing mechanism distinguishing
//! "drag" from "hold-to-select"; every transition that supersedes it
//! cancels the deadline first.

use crate::diagram::{Diagram, DiagramNotice};
use crate::element::{ElementId, ElementKind, StateFlag};
use crate::geometry::{Point, Rect};
use crate::input::dispatcher::EventProcessor;
use crate::input::event::{EventKind, PointerEvent};
use crate::input::session::{InteractionSession, SelectRect};
use crate::input::shape_move::{shape_move, shape_move_end};
use crate::profile_scope;
use std::collections::{BTreeSet, HashMap};

/// Hook invoked when a click lands on a shape while a selection may be
/// active. The default behavior (no hook installed) clears the selection.
pub type ShapeClickHook = Box<dyn FnMut(&mut Diagram, ElementId)>;

pub struct CanvasSelectProcessor {
    /// Tracked shape set, mirrored from add/del notifications.
    shapes: BTreeSet<ElementId>,
    /// Selection set: `Some` is always non-empty; an empty rectangle
    /// result clears it entirely.
    selection: Option<BTreeSet<ElementId>>,
    /// Local anchor offset per shape, computed at most once per instance.
    inner_centers: HashMap<ElementId, Point>,
    /// Absolute shape centers snapshotted when rect-select activates.
    centers: HashMap<ElementId, Point>,
    on_shape_click: Option<ShapeClickHook>,
}

impl CanvasSelectProcessor {
    pub fn new() -> Self {
        Self {
            shapes: BTreeSet::new(),
            selection: None,
            inner_centers: HashMap::new(),
            centers: HashMap::new(),
            on_shape_click: None,
        }
    }

    /// Override the click-on-shape behavior.
    pub fn on_shape_click_set(&mut self, hook: ShapeClickHook) {
        self.on_shape_click = Some(hook);
    }

    /// Current selection set, if one survives from a completed
    /// rubber-band drag.
    pub fn selection(&self) -> Option<&BTreeSet<ElementId>> {
        self.selection.as_ref()
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.as_ref().is_some_and(|s| s.contains(&id))
    }

    fn selected_clean(&mut self, diagram: &mut Diagram) {
        if let Some(selection) = self.selection.take() {
            for id in selection {
                diagram.state_set(id, StateFlag::Highlighted, false);
            }
        }
    }

    /// Toggle `highlighted` on every tracked shape by whether its
    /// snapshotted center falls under `bounds`. With `collect`, returns
    /// the in-rect set, or `None` when it is empty.
    fn highlight_in_rect(
        &mut self,
        diagram: &mut Diagram,
        bounds: Rect,
        collect: bool,
    ) -> Option<BTreeSet<ElementId>> {
        let mut found = BTreeSet::new();
        let ids: Vec<ElementId> = self.shapes.iter().copied().collect();
        for id in ids {
            let in_rect = self.centers.get(&id).is_some_and(|c| bounds.contains(*c));
            diagram.state_set(id, StateFlag::Highlighted, in_rect);
            if collect && in_rect {
                found.insert(id);
            }
        }
        if collect && !found.is_empty() { Some(found) } else { None }
    }

    /// Snapshot every tracked shape's absolute center: canvas position +
    /// shape position + cached inner-anchor offset.
    fn snapshot_centers(&mut self, diagram: &mut Diagram) {
        let canvas_pos = diagram
            .position_get(diagram.canvas_id())
            .unwrap_or(Point::ZERO);
        self.centers.clear();
        let ids: Vec<ElementId> = self.shapes.iter().copied().collect();
        for id in ids {
            let inner = match self.inner_centers.get(&id) {
                Some(p) => *p,
                None => {
                    let p = diagram.inner_center(id);
                    self.inner_centers.insert(id, p);
                    p
                }
            };
            let Some(position) = diagram.position_get(id) else {
                continue;
            };
            self.centers.insert(id, position + inner + canvas_pos);
        }
    }

    fn selection_ids(&self) -> Vec<ElementId> {
        self.selection.iter().flatten().copied().collect()
    }
}

impl Default for CanvasSelectProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl EventProcessor for CanvasSelectProcessor {
    fn can_process(&mut self, diagram: &mut Diagram, elem: ElementId) -> bool {
        let accept = elem == diagram.canvas_id() || self.is_selected(elem);
        if !accept {
            // clicking elsewhere always deselects
            self.selected_clean(diagram);
        }
        accept
    }

    fn process(
        &mut self,
        diagram: &mut Diagram,
        session: &mut InteractionSession,
        elem: ElementId,
        evt: &PointerEvent,
    ) {
        match evt.kind {
            EventKind::PointerDown => {
                diagram.select(None);
                session.down_elem = Some(evt.target);
                session.is_down_on_selected_shape = self.is_selected(evt.target);
                session.drag.begin(evt.client);

                // Only a press on the canvas itself can become a
                // rubber-band select
                if diagram.kind_of(elem) == Some(ElementKind::Canvas) {
                    session.long_press.arm(evt.time);
                }
            }

            EventKind::PointerMove => {
                profile_scope!("canvas_select_move");
                session.long_press.cancel();
                session.down_elem = None;

                // Rubber-band redraw + highlight refresh
                if let Some(rect) = session.select_rect.as_mut() {
                    rect.current = evt.client;
                    let bounds = rect.bounds();
                    self.highlight_in_rect(diagram, bounds, false);
                    diagram.presenter_mut().rect_draw(bounds);
                    return;
                }

                // Batch move of the selection set
                if session.is_down_on_selected_shape {
                    for id in self.selection_ids() {
                        shape_move(&mut session.drag, diagram, id, evt);
                    }
                    return;
                }

                // Plain canvas pan; only the canvas can reach this arm
                shape_move(&mut session.drag, diagram, elem, evt);
            }

            EventKind::LongPress => {
                // Rect-select supersedes the pending click
                session.down_elem = None;
                self.selected_clean(diagram);
                self.snapshot_centers(diagram);
                session.select_rect = Some(SelectRect::new(evt.client));
                diagram.presenter_mut().rect_create(evt.client);
                tracing::trace!(anchor = ?evt.client, "rect-select activated");
            }

            EventKind::PointerUp | EventKind::CanvasLeave => {
                diagram.active_element_set(None); // for canvas leave
                session.long_press.cancel();

                if session.down_elem.take().is_some() {
                    // Plain click: down and up without becoming a drag
                    if diagram.kind_of(evt.target) == Some(ElementKind::Canvas) {
                        self.selected_clean(diagram);
                    } else if let Some(hook) = self.on_shape_click.as_mut() {
                        hook(diagram, evt.target);
                    } else {
                        self.selected_clean(diagram);
                    }
                } else if let Some(rect) = session.select_rect.take() {
                    // Finalize rect-select: promote the highlighted set
                    self.selection = self.highlight_in_rect(diagram, rect.bounds(), true);
                    diagram.presenter_mut().rect_del();
                } else if session.is_down_on_selected_shape {
                    for id in self.selection_ids() {
                        shape_move_end(&mut session.drag, id);
                    }
                } else {
                    shape_move_end(&mut session.drag, elem);
                }

                session.reset();
            }

            EventKind::Unselect => {}
        }
    }

    fn notice(&mut self, diagram: &Diagram, notice: &DiagramNotice) {
        match notice {
            DiagramNotice::Added(id) => {
                if diagram.kind_of(*id) == Some(ElementKind::Shape) {
                    self.shapes.insert(*id);
                }
            }
            DiagramNotice::Removed(id) => {
                self.shapes.remove(id);
                self.inner_centers.remove(id);
                self.centers.remove(id);
                if let Some(selection) = self.selection.as_mut() {
                    selection.remove(id);
                    if selection.is_empty() {
                        self.selection = None;
                    }
                }
            }
            _ => {}
        }
    }
}
