//! Connection drawing and re-routing gestures.

use flowcanvas::input::{HandlerKind, PortRef};
use flowcanvas::overlay::Overlay;
use flowcanvas::{CanvasEvent, Point, PortDirection};

use crate::helpers::{TestDocumentBuilder, at, mounted_canvas};

/// `src/out` sits at page (100, 20), `dst/in` at (200, 20) and `other/in`
/// at (200, 120).
fn flow() -> TestDocumentBuilder {
    TestDocumentBuilder::new()
        .with_action("src", (0.0, 0.0))
        .with_action("dst", (200.0, 0.0))
        .with_action("other", (200.0, 100.0))
}

#[test]
fn test_connect_output_to_input() {
    let (mut canvas, names) = flow().build().into_canvas();
    let (src, dst) = (names.id("src"), names.id("dst"));

    canvas.pointer_down(at(100.0, 20.0, 0.0));
    assert_eq!(canvas.active_handler(), Some(HandlerKind::ConnectFromOutput));
    assert_eq!(canvas.cursor(), "crosshair");

    canvas.pointer_move(at(200.0, 20.0, 100.0));
    let overlays = canvas.overlays();
    let Some(Overlay::Connection(preview)) = overlays.first() else {
        panic!("expected a connection preview, got {overlays:?}");
    };
    assert!(preview.connected);
    assert_eq!(preview.start, Point::new(500.0, 320.0));
    assert_eq!(preview.end, Point::new(600.0, 320.0));

    let events = canvas.pointer_up(at(200.0, 20.0, 100.0));
    assert!(events.is_empty());
    assert_eq!(canvas.document().connection_lines().len(), 1);
    assert!(canvas.document().connection_exists(src, "out", dst, "in"));
    assert!(!canvas.document().in_transaction());

    assert!(canvas.undo());
    assert!(canvas.document().connection_lines().is_empty());
    assert!(!canvas.document().can_undo());
}

#[test]
fn test_connect_from_input_side() {
    let (mut canvas, names) = flow().build().into_canvas();

    canvas.pointer_down(at(200.0, 20.0, 0.0));
    assert_eq!(canvas.active_handler(), Some(HandlerKind::ConnectFromInput));
    canvas.pointer_move(at(100.0, 20.0, 100.0));
    canvas.pointer_up(at(100.0, 20.0, 100.0));

    assert!(canvas
        .document()
        .connection_exists(names.id("src"), "out", names.id("dst"), "in"));
}

#[test]
fn test_existing_connection_is_not_a_candidate() {
    let (mut canvas, names) = flow().build().into_canvas();

    canvas.pointer_down(at(100.0, 20.0, 0.0));
    canvas.pointer_move(at(200.0, 20.0, 100.0));
    canvas.pointer_up(at(200.0, 20.0, 100.0));

    canvas.pointer_down(at(100.0, 20.0, 1000.0));
    canvas.pointer_move(at(200.0, 20.0, 1100.0));
    let overlays = canvas.overlays();
    assert!(matches!(overlays.first(), Some(Overlay::Connection(preview)) if !preview.connected));

    let events = canvas.pointer_up(at(200.0, 20.0, 1100.0));
    assert_eq!(canvas.document().connection_lines().len(), 1);
    assert_eq!(
        events,
        vec![CanvasEvent::ConnectToNewTarget(flowcanvas::input::NewTargetRequest {
            anchor: PortRef::new(names.id("src"), "out"),
            direction: PortDirection::Output,
            page_point: Point::new(200.0, 20.0),
        })]
    );
}

#[test]
fn test_short_drop_on_empty_canvas_does_nothing() {
    let (mut canvas, _) = flow().build().into_canvas();

    canvas.pointer_down(at(100.0, 20.0, 0.0));
    canvas.pointer_move(at(115.0, 20.0, 100.0));
    let events = canvas.pointer_up(at(115.0, 20.0, 100.0));

    assert!(events.is_empty());
    assert!(canvas.document().connection_lines().is_empty());
    assert!(!canvas.document().can_undo());
}

#[test]
fn test_far_drop_on_empty_canvas_requests_new_target() {
    let (mut canvas, names) = flow().build().into_canvas();

    canvas.pointer_down(at(100.0, 20.0, 0.0));
    canvas.pointer_move(at(100.0, 150.0, 100.0));
    let events = canvas.pointer_up(at(100.0, 150.0, 100.0));

    let [CanvasEvent::ConnectToNewTarget(request)] = events.as_slice() else {
        panic!("expected a new-target request, got {events:?}");
    };
    assert_eq!(request.anchor.object, names.id("src"));
    assert_eq!(request.direction, PortDirection::Output);
    assert_eq!(request.page_point, Point::new(100.0, 150.0));
    assert!(canvas.document().connection_lines().is_empty());
}

#[test]
fn test_interrupted_connect_is_discarded() {
    let (mut canvas, _) = flow().build().into_canvas();

    canvas.pointer_down(at(100.0, 20.0, 0.0));
    canvas.pointer_move(at(200.0, 20.0, 100.0));
    canvas.unmount();

    assert!(canvas.document().connection_lines().is_empty());
    assert!(!canvas.document().in_transaction());
}

// ============================================================================
// Re-routing
// ============================================================================

#[test]
fn test_shift_drag_reroutes_input_end() {
    let mut fixture = flow().build();
    let (src, dst, other) = (fixture.id("src"), fixture.id("dst"), fixture.id("other"));
    fixture.doc.connect(src, "out", dst, "in").unwrap();
    fixture.doc.clear_history();
    let mut canvas = mounted_canvas(fixture.doc);

    canvas.pointer_down(at(200.0, 20.0, 0.0).with_shift());
    assert_eq!(canvas.active_handler(), Some(HandlerKind::RerouteInput));

    canvas.pointer_move(at(200.0, 120.0, 100.0).with_shift());
    let overlays = canvas.overlays();
    let Some(Overlay::Reroute(previews)) = overlays.first() else {
        panic!("expected reroute previews, got {overlays:?}");
    };
    assert_eq!(previews.len(), 1);
    assert!(previews[0].connected);
    assert_eq!(previews[0].end, Point::new(600.0, 420.0));

    canvas.pointer_up(at(200.0, 120.0, 100.0));

    let doc = canvas.document();
    assert_eq!(doc.connection_lines().len(), 1);
    assert!(doc.connection_exists(src, "out", other, "in"));
    assert!(!doc.connection_exists(src, "out", dst, "in"));
    assert!(canvas.view().selected_objects().is_empty());

    assert!(canvas.undo());
    assert!(canvas.document().connection_exists(src, "out", dst, "in"));
}

#[test]
fn test_reroute_onto_existing_connection_deletes_duplicate() {
    let mut fixture = flow().build();
    let (src, dst, other) = (fixture.id("src"), fixture.id("dst"), fixture.id("other"));
    fixture.doc.connect(src, "out", dst, "in").unwrap();
    fixture.doc.connect(src, "out", other, "in").unwrap();
    let mut canvas = mounted_canvas(fixture.doc);

    canvas.pointer_down(at(200.0, 20.0, 0.0).with_shift());
    canvas.pointer_move(at(200.0, 120.0, 100.0).with_shift());
    canvas.pointer_up(at(200.0, 120.0, 100.0));

    let doc = canvas.document();
    assert_eq!(doc.connection_lines().len(), 1);
    assert!(doc.connection_exists(src, "out", other, "in"));
}

#[test]
fn test_reroute_released_on_same_port_changes_nothing() {
    let mut fixture = flow().build();
    let (src, dst) = (fixture.id("src"), fixture.id("dst"));
    fixture.doc.connect(src, "out", dst, "in").unwrap();
    fixture.doc.clear_history();
    let mut canvas = mounted_canvas(fixture.doc);

    canvas.pointer_down(at(200.0, 20.0, 0.0).with_shift());
    canvas.pointer_move(at(201.0, 20.0, 100.0).with_shift());
    canvas.pointer_up(at(201.0, 20.0, 100.0));

    assert!(canvas.document().connection_exists(src, "out", dst, "in"));
    assert!(!canvas.document().can_undo());
}
