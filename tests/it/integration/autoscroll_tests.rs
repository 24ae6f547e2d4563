//! Auto-scroll while a gesture holds the pointer near a viewport edge.

use flowcanvas::input::{PointerButton, PointerEvent};
use flowcanvas::{Point, Rect};

use crate::helpers::{TestDocumentBuilder, at};

#[test]
fn test_no_scroll_away_from_edges() {
    let (mut canvas, _) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (100.0, 50.0))
        .build()
        .into_canvas();

    canvas.pointer_down(at(10.0, 10.0, 0.0));
    assert!(canvas.wants_animation_frames());
    canvas.pointer_move(at(60.0, 10.0, 100.0).with_movement(50.0, 0.0));

    assert!(!canvas.animation_frame(1000.0));
    assert!(!canvas.animation_frame(1016.0));
    assert_eq!(canvas.view().transform().translate, Point::ZERO);
}

#[test]
fn test_drag_near_edge_scrolls_and_keeps_object_under_pointer() {
    let (mut canvas, names) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (100.0, 50.0))
        .build()
        .into_canvas();

    canvas.pointer_down(at(10.0, 10.0, 0.0));
    canvas.pointer_move(PointerEvent::new(795.0, 310.0, 100.0).with_movement(385.0, 0.0));
    assert_eq!(canvas.view().drag_offset(), Some(Point::new(385.0, 0.0)));

    // first frame in the zone only starts the clock
    assert!(!canvas.animation_frame(1000.0));
    assert!(canvas.animation_frame(1016.0));

    assert_eq!(canvas.view().transform().translate, Point::new(-2.0, 0.0));
    assert_eq!(canvas.view().drag_offset(), Some(Point::new(387.0, 0.0)));

    canvas.pointer_up(PointerEvent::new(795.0, 310.0, 1020.0));
    assert!(!canvas.wants_animation_frames());
    assert_eq!(
        canvas.document().object(names.id("a")).unwrap().rect,
        Rect::new(387.0, 0.0, 100.0, 50.0)
    );
}

#[test]
fn test_pan_does_not_auto_scroll() {
    let (mut canvas, _) = TestDocumentBuilder::new().build().into_canvas();

    canvas.pointer_down(at(0.0, 0.0, 0.0).with_button(PointerButton::Secondary));
    assert!(!canvas.wants_animation_frames());
    assert!(!canvas.animation_frame(16.0));
}

#[test]
fn test_unmount_stops_auto_scroll() {
    let (mut canvas, _) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (100.0, 50.0))
        .build()
        .into_canvas();

    canvas.pointer_down(at(10.0, 10.0, 0.0));
    canvas.pointer_move(PointerEvent::new(795.0, 310.0, 100.0).with_movement(385.0, 0.0));
    canvas.animation_frame(1000.0);

    canvas.unmount();
    assert!(!canvas.is_mounted());
    assert!(!canvas.wants_animation_frames());
    assert!(!canvas.animation_frame(1016.0));
    assert_eq!(canvas.view().transform().translate, Point::ZERO);
}
