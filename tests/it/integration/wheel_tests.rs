//! Wheel zoom and wheel panning.

use flowcanvas::input::{PointerButton, WheelEvent};
use flowcanvas::Point;

use crate::helpers::{TestDocumentBuilder, at};

fn assert_close(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn test_ctrl_wheel_zooms_in_steps_around_pointer() {
    let (mut canvas, _) = TestDocumentBuilder::new().build().into_canvas();
    let client = Point::new(600.0, 400.0);
    let page_before = canvas.view().transform().client_to_page_point(client);
    assert_eq!(page_before, Point::new(200.0, 100.0));

    canvas.wheel(WheelEvent::new(600.0, 400.0, 0.0, -5.0).with_ctrl());
    assert_eq!(canvas.view().transform().scale, 1.0);

    canvas.wheel(WheelEvent::new(600.0, 400.0, 0.0, -10.0).with_ctrl());
    let transform = canvas.view().transform();
    assert_eq!(transform.scale, 1.1);
    assert_close(transform.client_to_page_point(client), page_before);

    canvas.wheel(WheelEvent::new(600.0, 400.0, 0.0, 20.0).with_ctrl());
    assert_eq!(canvas.view().transform().scale, 1.0);
    assert_close(canvas.view().transform().translate, Point::ZERO);
    canvas.wheel(WheelEvent::new(600.0, 400.0, 0.0, 20.0).with_ctrl());
    assert_eq!(canvas.view().transform().scale, 0.9);
    assert_close(canvas.view().transform().client_to_page_point(client), page_before);
}

#[test]
fn test_plain_wheel_pans() {
    let (mut canvas, _) = TestDocumentBuilder::new().build().into_canvas();

    canvas.wheel(WheelEvent::new(400.0, 300.0, 10.0, 20.0));
    assert_eq!(canvas.view().transform().translate, Point::new(-10.0, -20.0));
}

#[test]
fn test_shift_wheel_swaps_axes() {
    let (mut canvas, _) = TestDocumentBuilder::new().build().into_canvas();

    canvas.wheel(WheelEvent::new(400.0, 300.0, 10.0, 20.0).with_shift());
    assert_eq!(canvas.view().transform().translate, Point::new(-20.0, -10.0));
}

#[test]
fn test_wheel_ignored_while_panning() {
    let (mut canvas, _) = TestDocumentBuilder::new().build().into_canvas();

    canvas.pointer_down(at(0.0, 0.0, 0.0).with_button(PointerButton::Secondary));
    canvas.wheel(WheelEvent::new(400.0, 300.0, 10.0, 20.0));
    canvas.wheel(WheelEvent::new(400.0, 300.0, 0.0, -50.0).with_ctrl());

    let transform = canvas.view().transform();
    assert_eq!(transform.translate, Point::ZERO);
    assert_eq!(transform.scale, 1.0);
}

#[test]
fn test_wheel_during_drag_keeps_object_under_pointer() {
    let (mut canvas, _) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (50.0, 50.0))
        .build()
        .into_canvas();

    canvas.pointer_down(at(10.0, 10.0, 0.0));
    canvas.pointer_move(at(40.0, 10.0, 100.0));
    assert_eq!(canvas.view().drag_offset(), Some(Point::new(30.0, 0.0)));

    canvas.wheel(WheelEvent::new(440.0, 310.0, 10.0, 0.0).at(150.0));
    assert_eq!(canvas.view().transform().translate, Point::new(-10.0, 0.0));
    assert_eq!(canvas.view().drag_offset(), Some(Point::new(40.0, 0.0)));
}
