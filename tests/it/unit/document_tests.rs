//! Unit tests for the document model.

use flowcanvas::{CanvasError, ObjectId, PortDirection, Rect};

use crate::helpers::TestDocumentBuilder;

#[test]
fn test_port_position_is_absolute() {
    let fixture = TestDocumentBuilder::new()
        .with_page("page", 400.0, 300.0)
        .with_object("act", Some("page"), crate::helpers::action_template(), (50.0, 60.0))
        .build();

    let position = fixture.doc.port_position(fixture.id("act"), PortDirection::Output, "out");
    assert_eq!(position, Some(flowcanvas::Point::new(150.0, 80.0)));
    assert_eq!(fixture.doc.port_position(fixture.id("act"), PortDirection::Output, "in"), None);
}

#[test]
fn test_connections_at_port() {
    let mut fixture = TestDocumentBuilder::new()
        .with_action("a", (0.0, 0.0))
        .with_action("b", (200.0, 0.0))
        .with_action("c", (200.0, 100.0))
        .build();
    let (a, b, c) = (fixture.id("a"), fixture.id("b"), fixture.id("c"));

    assert!(fixture.doc.connect(a, "out", b, "in").unwrap());
    assert!(fixture.doc.connect(a, "out", c, "in").unwrap());
    assert!(!fixture.doc.connect(a, "out", c, "in").unwrap());

    assert_eq!(fixture.doc.connections_at(a, PortDirection::Output, "out").len(), 2);
    assert_eq!(fixture.doc.connections_at(b, PortDirection::Input, "in").len(), 1);
    assert!(fixture.doc.connections_at(b, PortDirection::Output, "out").is_empty());
}

#[test]
fn test_reroute_moves_one_end() {
    let mut fixture = TestDocumentBuilder::new()
        .with_action("a", (0.0, 0.0))
        .with_action("b", (200.0, 0.0))
        .with_action("c", (200.0, 100.0))
        .build();
    let (a, b, c) = (fixture.id("a"), fixture.id("b"), fixture.id("c"));
    fixture.doc.connect(a, "out", b, "in").unwrap();
    let line = fixture.doc.connection_lines()[0].clone();

    assert!(fixture.doc.reroute_connection(&line, PortDirection::Input, c, "in").unwrap());
    assert!(fixture.doc.connection_exists(a, "out", c, "in"));
    assert_eq!(fixture.doc.line_endpoints(&fixture.doc.connection_lines()[0]), Some((a, c)));

    let rerouted = fixture.doc.connection_lines()[0].clone();
    let err = fixture
        .doc
        .reroute_connection(&rerouted, PortDirection::Input, c, "missing")
        .unwrap_err();
    assert!(matches!(err, CanvasError::UnknownPort { .. }));
}

#[test]
fn test_deleting_object_leaves_no_dangling_lines() {
    let mut fixture = TestDocumentBuilder::new()
        .with_action("a", (0.0, 0.0))
        .with_action("b", (200.0, 0.0))
        .build();
    let (a, b) = (fixture.id("a"), fixture.id("b"));
    fixture.doc.connect(a, "out", b, "in").unwrap();

    fixture.doc.delete_object(b).unwrap();
    assert!(fixture.doc.connection_lines().is_empty());
    assert!(fixture.doc.dangling_connections().is_empty());
}

#[test]
fn test_unknown_object_errors() {
    let mut fixture = TestDocumentBuilder::new().build();
    let err = fixture
        .doc
        .update_rect(ObjectId(99), Rect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, CanvasError::UnknownObject(ObjectId(99))));
}
