//! Diagram session object: element ownership, singular selection and
//! add/del notifications.
//!
//! The diagram owns every element plus the presenter that draws them.
//! Mutations queue [`DiagramNotice`]s which the dispatcher drains after
//! each delivery, so processors observe shape add/del and selection
//! handover without holding references into the diagram.

use crate::constants::{DEFAULT_SHAPE_TITLE, TEXT_CONTENT_ATTR, TITLE_SUB_KEY};
use crate::element::{Element, ElementId, ElementKind, PropMap, StateFlag, StateSet, UpdatePatch};
use crate::error::{EngineError, EngineResult};
use crate::geometry::Point;
use crate::presenter::Presenter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Notification queued by diagram mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramNotice {
    /// A shape or path entered the tracked set
    Added(ElementId),
    /// An element left the tracked set
    Removed(ElementId),
    /// An element's position changed (canvas pans excluded; target
    /// resolution works in canvas-local space)
    Moved(ElementId),
    /// The singular selection moved away from this element
    Unselect(ElementId),
}

/// Shape-creation request committed by a palette drag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeAddRequest {
    pub template_key: String,
    /// Release point, in view coordinates
    pub position: Point,
    pub props: PropMap,
}

impl ShapeAddRequest {
    pub fn new(template_key: impl Into<String>, position: Point) -> Self {
        Self {
            template_key: template_key.into(),
            position,
            props: PropMap::new(),
        }
    }

    /// Request carrying the default title text for text-bearing templates.
    pub fn with_default_title(template_key: impl Into<String>, position: Point) -> Self {
        let mut attrs = BTreeMap::new();
        attrs.insert(
            TEXT_CONTENT_ATTR.to_string(),
            Value::String(DEFAULT_SHAPE_TITLE.to_string()),
        );
        let mut props = PropMap::new();
        props.insert(TITLE_SUB_KEY.to_string(), attrs);
        Self {
            template_key: template_key.into(),
            position,
            props,
        }
    }
}

/// The diagram session: elements, singular selection, active element.
pub struct Diagram {
    elements: HashMap<ElementId, Element>,
    canvas: ElementId,
    selected: Option<ElementId>,
    active_element: Option<ElementId>,
    next_id: u64,
    pending: VecDeque<DiagramNotice>,
    presenter: Box<dyn Presenter>,
}

impl Diagram {
    /// Create a diagram with its canvas element at the view origin.
    pub fn new(presenter: Box<dyn Presenter>) -> Self {
        let canvas = ElementId(0);
        let mut elements = HashMap::new();
        elements.insert(canvas, Element::new(ElementKind::Canvas, Point::ZERO, (0.0, 0.0)));
        Self {
            elements,
            canvas,
            selected: None,
            active_element: None,
            next_id: 1,
            pending: VecDeque::new(),
            presenter,
        }
    }

    pub fn canvas_id(&self) -> ElementId {
        self.canvas
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().map(|(id, e)| (*id, e))
    }

    /// Ids of all tracked shapes.
    pub fn shapes(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .filter(|(_, e)| e.kind() == ElementKind::Shape)
            .map(|(id, _)| *id)
    }

    pub fn kind_of(&self, id: ElementId) -> Option<ElementKind> {
        self.elements.get(&id).map(|e| e.kind())
    }

    pub fn position_get(&self, id: ElementId) -> Option<Point> {
        self.elements.get(&id).map(|e| e.position_get())
    }

    pub fn state_has(&self, id: ElementId, flag: StateFlag) -> bool {
        self.elements.get(&id).is_some_and(|e| e.state_has(flag))
    }

    // ------------------------------------------------------------------
    // Element lifecycle
    // ------------------------------------------------------------------

    fn insert(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        self.pending.push_back(DiagramNotice::Added(id));
        id
    }

    /// Add a shape with known geometry.
    pub fn shape_add(&mut self, position: Point, size: (f32, f32)) -> ElementId {
        self.insert(Element::new(ElementKind::Shape, position, size))
    }

    /// Add an edge-like element.
    pub fn path_add(&mut self, position: Point, size: (f32, f32)) -> ElementId {
        self.insert(Element::new(ElementKind::Path, position, size))
    }

    /// Add a pre-built element (e.g. a shape with connectors).
    pub fn element_add(&mut self, element: Element) -> EngineResult<ElementId> {
        if element.kind() == ElementKind::Canvas {
            return Err(EngineError::WrongKind {
                id: self.canvas,
                actual: ElementKind::Canvas,
                expected: ElementKind::Shape,
            });
        }
        Ok(self.insert(element))
    }

    /// Instantiate a template through the presenter, add the resulting
    /// shape and mark it active. This is the consumer of a palette
    /// [`ShapeAddRequest`].
    pub fn shape_active_add(&mut self, request: &ShapeAddRequest) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let size = self
            .presenter
            .create_from_template(id, &request.template_key, request.position);
        self.elements.insert(
            id,
            Element::new(ElementKind::Shape, request.position, size)
                .with_template_key(request.template_key.clone()),
        );
        self.pending.push_back(DiagramNotice::Added(id));

        if !request.props.is_empty() {
            let patch = UpdatePatch {
                props: Some(request.props.clone()),
                ..Default::default()
            };
            // The element was just inserted; apply cannot miss.
            if let Some(element) = self.elements.get_mut(&id) {
                element.apply(id, &patch, self.presenter.as_mut());
            }
        }

        self.active_element = Some(id);
        id
    }

    /// Remove an element and its visual representation.
    pub fn element_del(&mut self, id: ElementId) -> EngineResult<()> {
        if id == self.canvas {
            return Err(EngineError::WrongKind {
                id,
                actual: ElementKind::Canvas,
                expected: ElementKind::Shape,
            });
        }
        if self.elements.remove(&id).is_none() {
            return Err(EngineError::UnknownElement(id));
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.active_element == Some(id) {
            self.active_element = None;
        }
        self.presenter.element_del(id);
        self.pending.push_back(DiagramNotice::Removed(id));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// The single mutation path for element state, position, props and
    /// connectors. Syncs the presenter as a side effect.
    pub fn update(&mut self, id: ElementId, patch: &UpdatePatch) -> EngineResult<()> {
        let Some(element) = self.elements.get_mut(&id) else {
            return Err(EngineError::UnknownElement(id));
        };
        let kind = element.kind();
        element.apply(id, patch, self.presenter.as_mut());
        if patch.position.is_some() && kind != ElementKind::Canvas {
            self.pending.push_back(DiagramNotice::Moved(id));
        }
        Ok(())
    }

    /// Toggle a single flag, going through the full `update` path so the
    /// visual sync and hover cascade apply. No-op when already in the
    /// requested state or when the element is unknown.
    pub fn state_set(&mut self, id: ElementId, flag: StateFlag, on: bool) {
        let Some(element) = self.elements.get(&id) else {
            tracing::warn!(element = ?id, "state change for unknown element");
            return;
        };
        if element.state_has(flag) == on {
            return;
        }
        let mut state = element.state_get();
        if on {
            state.insert(flag);
        } else {
            state.remove(flag);
        }
        // The id was just checked; update cannot miss.
        let _ = self.update(id, &UpdatePatch::state(state));
    }

    /// Toggle a single flag on one of a shape's connectors.
    pub fn connector_state_set(&mut self, id: ElementId, key: &str, flag: StateFlag, on: bool) {
        let Some(element) = self.elements.get_mut(&id) else {
            tracing::warn!(element = ?id, "connector state change for unknown element");
            return;
        };
        element.connector_state_set(id, key, flag, on, self.presenter.as_mut());
    }

    // ------------------------------------------------------------------
    // Singular selection / active element
    // ------------------------------------------------------------------

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Retarget the singular selection. The displaced holder is notified
    /// through an `Unselect` delivery; the new holder gets its `selected`
    /// flag in the same call.
    pub fn select(&mut self, target: Option<ElementId>) {
        if self.selected == target {
            return;
        }
        if let Some(old) = self.selected.take() {
            self.pending.push_back(DiagramNotice::Unselect(old));
        }
        self.selected = target;
        if let Some(new) = target {
            self.state_set(new, StateFlag::Selected, true);
        }
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.active_element
    }

    pub fn active_element_set(&mut self, target: Option<ElementId>) {
        self.active_element = target;
    }

    // ------------------------------------------------------------------
    // Collaborator access
    // ------------------------------------------------------------------

    /// Cached-once-per-shape anchor offset lives with the caller; this is
    /// the raw presenter query.
    pub fn inner_center(&self, id: ElementId) -> Point {
        self.presenter.inner_center(id)
    }

    pub fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    pub fn presenter_mut(&mut self) -> &mut dyn Presenter {
        self.presenter.as_mut()
    }

    pub(crate) fn pop_notice(&mut self) -> Option<DiagramNotice> {
        self.pending.pop_front()
    }

    /// Replace the whole flag set of an element. Convenience wrapper used
    /// by tests and hosts; equivalent to `update` with only `state`.
    pub fn state_replace(&mut self, id: ElementId, state: StateSet) -> EngineResult<()> {
        self.update(id, &UpdatePatch::state(state))
    }
}
