//! Unit tests for config loading.

use flowcanvas::{CanvasConfig, CanvasError, Document};
use std::fs;
use tempfile::tempdir;

use crate::helpers::{TestDocumentBuilder, click, mounted_canvas_with};

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("canvas.json");
    fs::write(&path, r#"{ "snap_tolerance": 12, "zoom_steps": [0.5, 1.0, 2.0] }"#).unwrap();

    let config = CanvasConfig::load(&path).unwrap();
    assert_eq!(config.snap_tolerance, 12.0);
    assert_eq!(config.zoom_steps, vec![0.5, 1.0, 2.0]);
    assert_eq!(config.drag_start_distance, CanvasConfig::default().drag_start_distance);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = CanvasConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CanvasError::Io(_)));
}

#[test]
fn test_invalid_values_are_rejected() {
    for json in [
        r#"{ "zoom_steps": [] }"#,
        r#"{ "scroll_min_speed": 900 }"#,
        r#"{ "double_click_time_ms": 0 }"#,
    ] {
        let err = CanvasConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidConfig(_)), "{json}");
    }
}

#[test]
fn test_unknown_field_type_is_json_error() {
    let err = CanvasConfig::from_json_str(r#"{ "snap_tolerance": "wide" }"#).unwrap_err();
    assert!(matches!(err, CanvasError::Json(_)));
}

#[test]
fn test_double_click_time_comes_from_config() {
    let config = CanvasConfig {
        double_click_time_ms: 100.0,
        ..CanvasConfig::default()
    };
    let mut canvas = mounted_canvas_with(Document::new(), config);

    click(&mut canvas, 0.0, 0.0, 0.0);
    assert!(click(&mut canvas, 0.0, 0.0, 200.0).is_empty());
}

#[test]
fn test_zoom_steps_come_from_config() {
    let config = CanvasConfig {
        zoom_steps: vec![0.5, 1.0, 3.0],
        ..CanvasConfig::default()
    };
    let doc = TestDocumentBuilder::new().build().doc;
    let mut canvas = mounted_canvas_with(doc, config);

    canvas.wheel(flowcanvas::input::WheelEvent::new(400.0, 300.0, 0.0, -20.0).with_ctrl());
    assert_eq!(canvas.view().transform().scale, 3.0);
}

#[test]
fn test_default_config_format() {
    let json = serde_json::to_string_pretty(&CanvasConfig::default()).unwrap();
    insta::assert_snapshot!("default_config", json);
}
