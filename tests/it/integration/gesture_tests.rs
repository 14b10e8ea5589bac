//! Full-dispatcher gesture workflows: pan, rubber-band select, group
//! move, click-to-deselect, path selection handover.

use crate::helpers::{CallLog, PresenterCall, RecordingPresenter, at, down, mv, trace_init, up};
use std::time::Instant;
use wireboard::diagram::Diagram;
use wireboard::element::{ElementId, StateFlag};
use wireboard::geometry::{Point, Rect};
use wireboard::input::Dispatcher;
use wireboard::input::event::{EventKind, PointerEvent, PointerId};

fn engine_with_shapes(positions: &[(f32, f32)]) -> (Dispatcher, Vec<ElementId>, CallLog) {
    trace_init();
    let (presenter, calls) = RecordingPresenter::new();
    let diagram = Diagram::new(Box::new(presenter));
    let mut dispatcher = Dispatcher::standard(diagram);
    let ids = positions
        .iter()
        .map(|&(x, y)| dispatcher.diagram_mut().shape_add(Point::new(x, y), (20.0, 20.0)))
        .collect();
    dispatcher.flush();
    (dispatcher, ids, calls)
}

fn rect_created(calls: &CallLog) -> bool {
    calls
        .borrow()
        .iter()
        .any(|c| matches!(c, PresenterCall::RectCreate(_)))
}

#[test]
fn test_hold_select_group_move_then_click_deselects() {
    // Three shapes; the recording presenter reports zero inner centers,
    // so each absolute center equals the shape position.
    let (mut engine, ids, calls) =
        engine_with_shapes(&[(110.0, 110.0), (500.0, 500.0), (120.0, 105.0)]);
    let (s1, s2, s3) = (ids[0], ids[1], ids[2]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    // Hold 500ms uninterrupted: rubber band activates at the down point
    engine.dispatch(down(canvas, 100.0, 100.0, t0));
    engine.tick(at(t0, 600));
    assert!(
        calls
            .borrow()
            .contains(&PresenterCall::RectCreate(Point::new(100.0, 100.0)))
    );

    // Drag the rectangle: the two nearby centers highlight, the far one
    // does not
    engine.dispatch(mv(canvas, 130.0, 130.0, at(t0, 650)));
    assert!(engine.diagram().state_has(s1, StateFlag::Highlighted));
    assert!(!engine.diagram().state_has(s2, StateFlag::Highlighted));
    assert!(engine.diagram().state_has(s3, StateFlag::Highlighted));
    assert!(
        calls
            .borrow()
            .contains(&PresenterCall::RectDraw(Rect::new(100.0, 100.0, 30.0, 30.0)))
    );

    // Release commits the selection and removes the rectangle visual
    engine.dispatch(up(canvas, 130.0, 130.0, at(t0, 700)));
    assert!(calls.borrow().contains(&PresenterCall::RectDel));
    assert!(engine.session().is_clear());

    // A drag that begins on a selected shape moves the whole set
    engine.dispatch(down(s1, 120.0, 120.0, at(t0, 800)));
    engine.dispatch(mv(s1, 125.0, 125.0, at(t0, 820)));
    engine.dispatch(up(s1, 125.0, 125.0, at(t0, 840)));

    assert_eq!(engine.diagram().position_get(s1), Some(Point::new(115.0, 115.0)));
    assert_eq!(engine.diagram().position_get(s3), Some(Point::new(125.0, 110.0)));
    assert_eq!(engine.diagram().position_get(s2), Some(Point::new(500.0, 500.0)));

    // A plain click on the canvas clears the selection
    engine.dispatch(down(canvas, 300.0, 300.0, at(t0, 1000)));
    engine.dispatch(up(canvas, 300.0, 300.0, at(t0, 1010)));
    assert!(!engine.diagram().state_has(s1, StateFlag::Highlighted));
    assert!(!engine.diagram().state_has(s3, StateFlag::Highlighted));

    // With the selection gone, dragging the shape no longer moves it
    engine.dispatch(down(s1, 115.0, 115.0, at(t0, 1100)));
    engine.dispatch(mv(s1, 150.0, 150.0, at(t0, 1120)));
    assert_eq!(engine.diagram().position_get(s1), Some(Point::new(115.0, 115.0)));
}

#[test]
fn test_move_before_deadline_pans_instead_of_selecting() {
    let (mut engine, ids, calls) = engine_with_shapes(&[(50.0, 50.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    engine.dispatch(down(canvas, 0.0, 0.0, t0));
    engine.dispatch(mv(canvas, 10.0, 5.0, at(t0, 100)));

    // The deadline passes, but the timer was cancelled by the move
    engine.tick(at(t0, 700));
    assert!(!rect_created(&calls));

    engine.dispatch(mv(canvas, 20.0, 10.0, at(t0, 750)));
    assert_eq!(engine.diagram().position_get(canvas), Some(Point::new(20.0, 10.0)));

    // The shape itself stayed put; only the canvas panned
    assert_eq!(engine.diagram().position_get(ids[0]), Some(Point::new(50.0, 50.0)));

    engine.dispatch(up(canvas, 20.0, 10.0, at(t0, 800)));
    assert!(engine.session().is_clear());
    assert!(!rect_created(&calls));
}

#[test]
fn test_empty_rectangle_promotes_no_selection() {
    let (mut engine, ids, calls) = engine_with_shapes(&[(500.0, 500.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    engine.dispatch(down(canvas, 0.0, 0.0, t0));
    engine.tick(at(t0, 600));
    engine.dispatch(mv(canvas, 30.0, 30.0, at(t0, 650)));
    engine.dispatch(up(canvas, 30.0, 30.0, at(t0, 700)));

    assert!(calls.borrow().contains(&PresenterCall::RectDel));
    assert!(!engine.diagram().state_has(ids[0], StateFlag::Highlighted));
    // No selection survives: a drag on the shape goes unhandled
    engine.dispatch(down(ids[0], 505.0, 505.0, at(t0, 800)));
    engine.dispatch(mv(ids[0], 520.0, 520.0, at(t0, 820)));
    assert_eq!(engine.diagram().position_get(ids[0]), Some(Point::new(500.0, 500.0)));
}

#[test]
fn test_rectangle_tracks_negative_drag_by_flipping_anchor() {
    let (mut engine, ids, _calls) = engine_with_shapes(&[(80.0, 80.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    engine.dispatch(down(canvas, 100.0, 100.0, t0));
    engine.tick(at(t0, 600));
    // Dragging up-left still covers the shape at (80, 80)
    engine.dispatch(mv(canvas, 70.0, 70.0, at(t0, 650)));
    assert!(engine.diagram().state_has(ids[0], StateFlag::Highlighted));
}

#[test]
fn test_canvas_leave_ends_the_gesture_like_pointer_up() {
    let (mut engine, ids, _calls) = engine_with_shapes(&[(110.0, 110.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    // Build a selection around the shape
    engine.dispatch(down(canvas, 100.0, 100.0, t0));
    engine.tick(at(t0, 600));
    engine.dispatch(mv(canvas, 130.0, 130.0, at(t0, 650)));
    engine.dispatch(up(canvas, 130.0, 130.0, at(t0, 700)));

    // Start a group move, then lose the pointer mid-drag
    engine.dispatch(down(ids[0], 115.0, 115.0, at(t0, 800)));
    engine.dispatch(mv(ids[0], 135.0, 115.0, at(t0, 820)));
    engine.dispatch(PointerEvent::new(
        EventKind::CanvasLeave,
        canvas,
        Point::new(135.0, 115.0),
        at(t0, 840),
    ));

    // Best-effort drag: the shape keeps its last applied position
    assert_eq!(engine.diagram().position_get(ids[0]), Some(Point::new(130.0, 110.0)));
    assert!(engine.session().is_clear());
    assert_eq!(engine.diagram().active_element(), None);
}

#[test]
fn test_path_selection_handover_and_deselect() {
    let (presenter, _calls) = RecordingPresenter::new();
    let diagram = Diagram::new(Box::new(presenter));
    let mut engine = Dispatcher::standard(diagram);
    let p1 = engine.diagram_mut().path_add(Point::new(0.0, 0.0), (40.0, 4.0));
    let p2 = engine.diagram_mut().path_add(Point::new(0.0, 50.0), (40.0, 4.0));
    engine.flush();
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    engine.dispatch(up(p1, 10.0, 2.0, t0));
    assert_eq!(engine.diagram().selected(), Some(p1));
    assert!(engine.diagram().state_has(p1, StateFlag::Selected));

    // Selecting the second path displaces the first through `unselect`
    engine.dispatch(up(p2, 10.0, 52.0, at(t0, 100)));
    assert_eq!(engine.diagram().selected(), Some(p2));
    assert!(!engine.diagram().state_has(p1, StateFlag::Selected));
    assert!(engine.diagram().state_has(p2, StateFlag::Selected));

    // Pointer-down on the canvas clears the singular selection
    engine.dispatch(down(canvas, 200.0, 200.0, at(t0, 200)));
    assert_eq!(engine.diagram().selected(), None);
    assert!(!engine.diagram().state_has(p2, StateFlag::Selected));
    engine.dispatch(up(canvas, 200.0, 200.0, at(t0, 210)));
}

#[test]
fn test_pointer_input_resolves_targets_through_hit_tester() {
    let (mut engine, ids, _calls) = engine_with_shapes(&[(10.0, 10.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    let target = engine.pointer_input(
        EventKind::PointerDown,
        Point::new(15.0, 15.0),
        PointerId::PRIMARY,
        t0,
    );
    assert_eq!(target, ids[0]);
    let target = engine.pointer_input(
        EventKind::PointerUp,
        Point::new(800.0, 800.0),
        PointerId::PRIMARY,
        at(t0, 50),
    );
    assert_eq!(target, canvas);
}

#[test]
fn test_pointer_input_accounts_for_canvas_pan() {
    let (mut engine, ids, _calls) = engine_with_shapes(&[(10.0, 10.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    // Pan the canvas 100px right
    engine.dispatch(down(canvas, 0.0, 0.0, t0));
    engine.dispatch(mv(canvas, 100.0, 0.0, at(t0, 50)));
    engine.dispatch(up(canvas, 100.0, 0.0, at(t0, 100)));

    // The shape now sits at view (110..130, 10..30)
    let target = engine.pointer_input(
        EventKind::PointerDown,
        Point::new(115.0, 15.0),
        PointerId::PRIMARY,
        at(t0, 200),
    );
    assert_eq!(target, ids[0]);
    let miss = engine.pointer_input(
        EventKind::PointerUp,
        Point::new(15.0, 15.0),
        PointerId::PRIMARY,
        at(t0, 300),
    );
    assert_eq!(miss, canvas);
}

#[test]
fn test_stale_deadline_never_fires_across_gestures() {
    let (mut engine, _ids, calls) = engine_with_shapes(&[(50.0, 50.0)]);
    let canvas = engine.diagram().canvas_id();
    let t0 = Instant::now();

    // Click quickly: down at t0, up at t0+100
    engine.dispatch(down(canvas, 0.0, 0.0, t0));
    engine.dispatch(up(canvas, 0.0, 0.0, at(t0, 100)));

    // Well past the original deadline, nothing fires
    engine.tick(at(t0, 1000));
    assert!(!rect_created(&calls));
    assert!(engine.session().is_clear());
}
