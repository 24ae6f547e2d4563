//! Mount, unmount, undo and keyboard nudges through the canvas.

use std::cell::RefCell;
use std::rc::Rc;

use flowcanvas::view_state::ViewChange;
use flowcanvas::{Canvas, CanvasConfig, Document, MoveDirection, Point, Rect};

use crate::helpers::{TestDocumentBuilder, VIEWPORT, at, click};

#[test]
fn test_new_canvas_rejects_invalid_config() {
    let config = CanvasConfig {
        snap_tolerance: 0.0,
        ..CanvasConfig::default()
    };
    assert!(Canvas::new(Document::new(), config).is_err());
}

#[test]
fn test_mount_sets_client_rect() {
    let mut canvas = Canvas::new(Document::new(), CanvasConfig::default()).unwrap();
    assert!(!canvas.is_mounted());
    assert!(!canvas.wants_animation_frames());

    canvas.mount(VIEWPORT);
    assert!(canvas.is_mounted());
    assert_eq!(canvas.view().transform().client_rect, VIEWPORT);

    let moved = Rect::new(100.0, 50.0, 800.0, 600.0);
    canvas.set_client_rect(moved);
    assert_eq!(canvas.view().transform().client_to_page_point(Point::new(500.0, 350.0)), Point::ZERO);
}

#[test]
fn test_unmount_finishes_gesture_and_closes_transactions() {
    let (mut canvas, names) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (50.0, 50.0))
        .build()
        .into_canvas();

    canvas.pointer_down(at(10.0, 10.0, 0.0));
    canvas.pointer_move(at(40.0, 10.0, 100.0));
    canvas.document_mut().begin_transaction();

    canvas.unmount();
    assert_eq!(canvas.active_handler(), None);
    assert!(!canvas.document().in_transaction());
    assert_eq!(canvas.view().drag_offset(), None);
    assert_eq!(canvas.document().object(names.id("a")).unwrap().rect.left, 30.0);
}

#[test]
fn test_undo_is_refused_during_gesture() {
    let (mut canvas, _) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (50.0, 50.0))
        .build()
        .into_canvas();
    assert!(!canvas.document().can_undo());

    click(&mut canvas, 10.0, 10.0, 0.0);
    canvas.move_selection(MoveDirection::Right).unwrap();
    assert!(canvas.document().can_undo());

    canvas.pointer_down(at(11.0, 10.0, 1000.0));
    assert!(!canvas.undo());
    canvas.pointer_up(at(11.0, 10.0, 1000.0));
    assert!(canvas.undo());
}

#[test]
fn test_move_selection_nudges_by_one() {
    let (mut canvas, names) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (50.0, 50.0))
        .build()
        .into_canvas();
    let a = names.id("a");

    click(&mut canvas, 10.0, 10.0, 0.0);
    canvas.move_selection(MoveDirection::Right).unwrap();
    canvas.move_selection(MoveDirection::DownRight).unwrap();

    assert_eq!(canvas.document().object(a).unwrap().rect, Rect::new(2.0, 1.0, 50.0, 50.0));
}

#[test]
fn test_undo_prunes_selection() {
    let (mut canvas, _) = TestDocumentBuilder::new().build().into_canvas();
    let id = canvas
        .document_mut()
        .add_object(None, &flowcanvas::ObjectTemplate::new(flowcanvas::ObjectKind::Widget, 10.0, 10.0), 0.0, 0.0)
        .unwrap();
    canvas.view_mut().select_object(id);

    assert!(canvas.undo());
    assert!(canvas.view().selected_objects().is_empty());
    assert!(canvas.redo());
    assert!(canvas.view().selected_objects().is_empty());
}

#[test]
fn test_view_listeners_see_selection_and_transform_changes() {
    let (mut canvas, _) = TestDocumentBuilder::new()
        .with_widget("a", None, (0.0, 0.0), (50.0, 50.0))
        .build()
        .into_canvas();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    canvas.view_mut().on_change(move |change| sink.borrow_mut().push(change));

    click(&mut canvas, 10.0, 10.0, 0.0);
    canvas.wheel(flowcanvas::input::WheelEvent::new(400.0, 300.0, 5.0, 0.0));

    assert_eq!(*seen.borrow(), vec![ViewChange::Selection, ViewChange::Transform]);
}
