//! Collaborator interfaces to the rendering/presentation layer.
//!
//! The engine is headless: it never draws. Everything visual goes through
//! [`Presenter`], a narrow contract implemented by whatever turns shape
//! templates into drawn primitives. The engine only requires that the
//! presenter reflect the most recent call for each element.

use crate::element::{ElementId, StateFlag};
use crate::geometry::{Point, Rect};
use serde_json::Value;

/// Text layout parameters, read from the target's own declared attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextParams {
    pub line_height: f32,
    /// Vertical-centering hint; `None` means top-aligned flow.
    pub vertical_middle: Option<f32>,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            line_height: crate::constants::DEFAULT_LINE_HEIGHT,
            vertical_middle: None,
        }
    }
}

/// Rendering/presentation collaborator.
///
/// `rect_*` drive the rubber-band selection rectangle overlay. The
/// presenter may show a start marker after `rect_create` and is expected
/// to drop it on the first `rect_draw`.
pub trait Presenter {
    /// Move an element's drawn primitive.
    fn position_set(&mut self, id: ElementId, position: Point);

    /// Sync one state flag to the element's visual, or to one of its
    /// connectors when `sub` is given.
    fn state_sync(&mut self, id: ElementId, sub: Option<&str>, flag: StateFlag, on: bool);

    /// Raw attribute write on a sub-element.
    fn attr_set(&mut self, id: ElementId, sub: &str, attr: &str, value: &Value);

    /// Render multi-line text into the bounded region of a sub-element.
    /// This is the only path the reserved `textContent` attribute takes.
    fn text_draw(&mut self, id: ElementId, sub: &str, text: &str, params: TextParams);

    /// Text layout parameters declared by the sub-element itself.
    fn text_params(&self, id: ElementId, sub: &str) -> TextParams {
        let _ = (id, sub);
        TextParams::default()
    }

    /// Local anchor offset of a shape's center within its own bounds.
    /// Queried at most once per shape instance; the engine caches it.
    fn inner_center(&self, id: ElementId) -> Point;

    /// Produce a drawn primitive for a template key and report its size.
    fn create_from_template(&mut self, id: ElementId, template_key: &str, position: Point) -> (f32, f32);

    /// Drop an element's drawn primitive.
    fn element_del(&mut self, id: ElementId);

    /// Show the selection rectangle anchored at `origin`.
    fn rect_create(&mut self, origin: Point);

    /// Resize/reposition the selection rectangle.
    fn rect_draw(&mut self, bounds: Rect);

    /// Remove the selection rectangle's visual representation.
    fn rect_del(&mut self);
}

/// Presenter that draws nothing. Useful for hosts that render from the
/// model on their own schedule, and as a base for tests.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn position_set(&mut self, _id: ElementId, _position: Point) {}

    fn state_sync(&mut self, _id: ElementId, _sub: Option<&str>, _flag: StateFlag, _on: bool) {}

    fn attr_set(&mut self, _id: ElementId, _sub: &str, _attr: &str, _value: &Value) {}

    fn text_draw(&mut self, _id: ElementId, _sub: &str, _text: &str, _params: TextParams) {}

    fn inner_center(&self, _id: ElementId) -> Point {
        Point::ZERO
    }

    fn create_from_template(&mut self, _id: ElementId, _template_key: &str, _position: Point) -> (f32, f32) {
        (0.0, 0.0)
    }

    fn element_del(&mut self, _id: ElementId) {}

    fn rect_create(&mut self, _origin: Point) {}

    fn rect_draw(&mut self, _bounds: Rect) {}

    fn rect_del(&mut self) {}
}
