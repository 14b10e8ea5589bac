//! Test helpers: a call-recording presenter and pointer event builders.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};
use wireboard::element::{ElementId, StateFlag};
use wireboard::geometry::{Point, Rect};
use wireboard::input::event::{EventKind, PointerEvent};
use wireboard::presenter::{Presenter, TextParams};

/// One recorded presenter invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    PositionSet(ElementId, Point),
    StateSync {
        id: ElementId,
        sub: Option<String>,
        flag: StateFlag,
        on: bool,
    },
    AttrSet {
        id: ElementId,
        sub: String,
        attr: String,
        value: Value,
    },
    TextDraw {
        id: ElementId,
        sub: String,
        text: String,
    },
    TemplateCreate {
        id: ElementId,
        template_key: String,
        position: Point,
    },
    ElementDel(ElementId),
    RectCreate(Point),
    RectDraw(Rect),
    RectDel,
}

/// Shared log handle; clone it before boxing the presenter into a diagram.
pub type CallLog = Rc<RefCell<Vec<PresenterCall>>>;

/// Presenter double that records every call. Inner centers and template
/// sizes are configurable per test.
pub struct RecordingPresenter {
    pub calls: CallLog,
    pub inner_centers: HashMap<ElementId, Point>,
    pub template_size: (f32, f32),
}

impl RecordingPresenter {
    pub fn new() -> (Self, CallLog) {
        let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                calls: calls.clone(),
                inner_centers: HashMap::new(),
                template_size: (40.0, 40.0),
            },
            calls,
        )
    }
}

impl Presenter for RecordingPresenter {
    fn position_set(&mut self, id: ElementId, position: Point) {
        self.calls.borrow_mut().push(PresenterCall::PositionSet(id, position));
    }

    fn state_sync(&mut self, id: ElementId, sub: Option<&str>, flag: StateFlag, on: bool) {
        self.calls.borrow_mut().push(PresenterCall::StateSync {
            id,
            sub: sub.map(str::to_string),
            flag,
            on,
        });
    }

    fn attr_set(&mut self, id: ElementId, sub: &str, attr: &str, value: &Value) {
        self.calls.borrow_mut().push(PresenterCall::AttrSet {
            id,
            sub: sub.to_string(),
            attr: attr.to_string(),
            value: value.clone(),
        });
    }

    fn text_draw(&mut self, id: ElementId, sub: &str, text: &str, _params: TextParams) {
        self.calls.borrow_mut().push(PresenterCall::TextDraw {
            id,
            sub: sub.to_string(),
            text: text.to_string(),
        });
    }

    fn inner_center(&self, id: ElementId) -> Point {
        self.inner_centers.get(&id).copied().unwrap_or(Point::ZERO)
    }

    fn create_from_template(&mut self, id: ElementId, template_key: &str, position: Point) -> (f32, f32) {
        self.calls.borrow_mut().push(PresenterCall::TemplateCreate {
            id,
            template_key: template_key.to_string(),
            position,
        });
        self.template_size
    }

    fn element_del(&mut self, id: ElementId) {
        self.calls.borrow_mut().push(PresenterCall::ElementDel(id));
    }

    fn rect_create(&mut self, origin: Point) {
        self.calls.borrow_mut().push(PresenterCall::RectCreate(origin));
    }

    fn rect_draw(&mut self, bounds: Rect) {
        self.calls.borrow_mut().push(PresenterCall::RectDraw(bounds));
    }

    fn rect_del(&mut self) {
        self.calls.borrow_mut().push(PresenterCall::RectDel);
    }
}

// ============================================================================
// Event builders
// ============================================================================

/// Route engine tracing to the test's captured output. Controlled by
/// `RUST_LOG`; calling it more than once is fine.
pub fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Offset a base instant by milliseconds.
pub fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

pub fn ev(kind: EventKind, target: ElementId, x: f32, y: f32, time: Instant) -> PointerEvent {
    PointerEvent::new(kind, target, Point::new(x, y), time)
}

pub fn down(target: ElementId, x: f32, y: f32, time: Instant) -> PointerEvent {
    ev(EventKind::PointerDown, target, x, y, time)
}

pub fn mv(target: ElementId, x: f32, y: f32, time: Instant) -> PointerEvent {
    ev(EventKind::PointerMove, target, x, y, time)
}

pub fn up(target: ElementId, x: f32, y: f32, time: Instant) -> PointerEvent {
    ev(EventKind::PointerUp, target, x, y, time)
}
