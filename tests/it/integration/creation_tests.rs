//! Palette-to-engine shape creation, end to end.

use crate::helpers::{PresenterCall, RecordingPresenter, at, down, mv};
use std::time::Instant;
use wireboard::diagram::Diagram;
use wireboard::geometry::Point;
use wireboard::input::Dispatcher;
use wireboard::input::event::{EventKind, PointerEvent, PointerId};
use wireboard::palette::{PaletteController, PaletteEvent, PaletteSurface, SurfaceNode};

/// Two-region surface: anything with x < 100 is the palette panel.
struct SplitSurface {
    captured: Vec<PointerId>,
}

const PANEL: SurfaceNode = SurfaceNode(1);
const PAGE: SurfaceNode = SurfaceNode(2);

impl PaletteSurface for SplitSurface {
    fn element_from_point(&self, point: Point) -> Option<SurfaceNode> {
        Some(if point.x < 100.0 { PANEL } else { PAGE })
    }

    fn set_pointer_capture(&mut self, pointer: PointerId) {
        self.captured.push(pointer);
    }
}

#[test]
fn test_palette_drag_creates_an_active_titled_shape() {
    let (presenter, calls) = RecordingPresenter::new();
    let diagram = Diagram::new(Box::new(presenter));
    let mut engine = Dispatcher::standard(diagram);

    let mut surface = SplitSurface { captured: Vec::new() };
    let mut palette = PaletteController::new();

    // Press on a palette icon, drag across the panel boundary
    assert!(
        palette
            .handle(
                &PaletteEvent::PointerDown {
                    template_key: "rect".to_string(),
                    point: Point::new(50.0, 50.0),
                },
                &mut surface,
            )
            .is_none()
    );
    assert!(
        palette
            .handle(
                &PaletteEvent::PointerMove {
                    point: Point::new(150.0, 60.0),
                    pointer: PointerId::PRIMARY,
                },
                &mut surface,
            )
            .is_none()
    );
    assert_eq!(surface.captured, vec![PointerId::PRIMARY]);

    // The genuine leave commits the request at the leave point
    let request = palette
        .handle(&PaletteEvent::PointerLeave { point: Point::new(200.0, 80.0) }, &mut surface)
        .expect("drag out of the panel commits");
    assert!(palette.is_idle());

    let id = engine.diagram_mut().shape_active_add(&request);
    engine.flush();

    assert_eq!(engine.diagram().active_element(), Some(id));
    assert_eq!(engine.diagram().position_get(id), Some(Point::new(200.0, 80.0)));

    let log = calls.borrow();
    assert!(log.contains(&PresenterCall::TemplateCreate {
        id,
        template_key: "rect".to_string(),
        position: Point::new(200.0, 80.0),
    }));
    // The default title goes through text layout, not raw attributes
    assert!(log.contains(&PresenterCall::TextDraw {
        id,
        sub: "text".to_string(),
        text: "Title".to_string(),
    }));
    drop(log);

    // The new shape is immediately resolvable: the template reported a
    // 40x40 footprint at (200, 80)
    let target = engine.pointer_input(
        EventKind::PointerUp,
        Point::new(210.0, 90.0),
        PointerId::PRIMARY,
        Instant::now(),
    );
    assert_eq!(target, id);
}

#[test]
fn test_release_inside_panel_creates_nothing() {
    let (presenter, _calls) = RecordingPresenter::new();
    let diagram = Diagram::new(Box::new(presenter));
    let mut engine = Dispatcher::standard(diagram);

    let mut surface = SplitSurface { captured: Vec::new() };
    let mut palette = PaletteController::new();

    palette.handle(
        &PaletteEvent::PointerDown {
            template_key: "circle".to_string(),
            point: Point::new(10.0, 10.0),
        },
        &mut surface,
    );
    assert!(palette.handle(&PaletteEvent::PointerUp, &mut surface).is_none());
    assert!(palette.is_idle());
    assert_eq!(engine.diagram().shapes().count(), 0);
}

#[test]
fn test_created_shape_joins_rect_selection() {
    let (presenter, _calls) = RecordingPresenter::new();
    let diagram = Diagram::new(Box::new(presenter));
    let mut engine = Dispatcher::standard(diagram);
    let canvas = engine.diagram().canvas_id();

    // Shape dropped at (110, 110); template size is 40x40 and the
    // recording presenter reports a zero inner center
    let request =
        wireboard::diagram::ShapeAddRequest::new("rect", Point::new(110.0, 110.0));
    let id = engine.diagram_mut().shape_active_add(&request);
    engine.flush();

    let t0 = Instant::now();
    engine.dispatch(down(canvas, 100.0, 100.0, t0));
    engine.tick(at(t0, 600));
    engine.dispatch(mv(canvas, 130.0, 130.0, at(t0, 650)));
    engine.dispatch(PointerEvent::new(
        EventKind::PointerUp,
        canvas,
        Point::new(130.0, 130.0),
        at(t0, 700),
    ));

    // The freshly created shape is now part of the selection set and
    // moves with it
    engine.dispatch(down(id, 120.0, 120.0, at(t0, 800)));
    engine.dispatch(mv(id, 130.0, 125.0, at(t0, 820)));
    assert_eq!(engine.diagram().position_get(id), Some(Point::new(120.0, 115.0)));
}
