//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestDocumentBuilder` - Builder pattern for documents with named objects
//! - `mounted_canvas()` - A canvas mounted on an 800x600 viewport at the origin
//! - `at()` - Pointer events addressed in page coordinates

use std::collections::HashMap;

use flowcanvas::input::PointerEvent;
use flowcanvas::{Canvas, CanvasConfig, Document, ObjectId, ObjectKind, ObjectTemplate, Port, Rect};

/// Viewport used by `mounted_canvas`. With the default transform, page
/// `(0, 0)` sits at client `(400, 300)`.
pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

// ============================================================================
// TestDocumentBuilder - Builder pattern for creating test documents
// ============================================================================

struct PendingObject {
    name: &'static str,
    parent: Option<&'static str>,
    template: ObjectTemplate,
    left: f64,
    top: f64,
}

/// Builder for documents whose objects are looked up by name.
///
/// # Example
/// ```ignore
/// let fixture = TestDocumentBuilder::new()
///     .with_page("page", 400.0, 300.0)
///     .with_widget("button", Some("page"), (10.0, 10.0), (80.0, 30.0))
///     .build();
/// let button = fixture.id("button");
/// ```
#[derive(Default)]
pub struct TestDocumentBuilder {
    pending: Vec<PendingObject>,
}

impl TestDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(
        mut self,
        name: &'static str,
        parent: Option<&'static str>,
        template: ObjectTemplate,
        pos: (f64, f64),
    ) -> Self {
        self.pending.push(PendingObject {
            name,
            parent,
            template,
            left: pos.0,
            top: pos.1,
        });
        self
    }

    /// Root page at the origin.
    pub fn with_page(self, name: &'static str, width: f64, height: f64) -> Self {
        let template = ObjectTemplate::new(ObjectKind::Page, width, height);
        self.with_object(name, None, template, (0.0, 0.0))
    }

    pub fn with_widget(
        self,
        name: &'static str,
        parent: Option<&'static str>,
        pos: (f64, f64),
        size: (f64, f64),
    ) -> Self {
        let template = ObjectTemplate::new(ObjectKind::Widget, size.0, size.1);
        self.with_object(name, parent, template, pos)
    }

    pub fn with_locked_widget(
        self,
        name: &'static str,
        parent: Option<&'static str>,
        pos: (f64, f64),
        size: (f64, f64),
    ) -> Self {
        let template = ObjectTemplate::new(ObjectKind::Widget, size.0, size.1).locked();
        self.with_object(name, parent, template, pos)
    }

    /// 100x40 action with input `in` at its left middle and output `out` at
    /// its right middle.
    pub fn with_action(self, name: &'static str, pos: (f64, f64)) -> Self {
        self.with_object(name, None, action_template(), pos)
    }

    pub fn build(self) -> TestDocument {
        let mut doc = Document::new();
        let mut ids = HashMap::new();
        for spec in self.pending {
            let parent = spec.parent.map(|name| ids[name]);
            let id = doc
                .add_object(parent, &spec.template, spec.left, spec.top)
                .expect("parent is added before its children");
            ids.insert(spec.name, id);
        }
        doc.clear_history();
        TestDocument { doc, ids }
    }
}

pub fn action_template() -> ObjectTemplate {
    ObjectTemplate::new(ObjectKind::Action, 100.0, 40.0)
        .with_input(Port::new("in", 0.0, 20.0))
        .with_output(Port::new("out", 100.0, 20.0))
}

pub struct TestDocument {
    pub doc: Document,
    ids: HashMap<&'static str, ObjectId>,
}

impl TestDocument {
    pub fn id(&self, name: &str) -> ObjectId {
        self.ids[name]
    }

    /// Consumes the fixture into a mounted canvas, keeping the name lookup.
    pub fn into_canvas(self) -> (Canvas, Names) {
        let canvas = mounted_canvas(self.doc);
        (canvas, Names { ids: self.ids })
    }
}

pub struct Names {
    ids: HashMap<&'static str, ObjectId>,
}

impl Names {
    pub fn id(&self, name: &str) -> ObjectId {
        self.ids[name]
    }
}

// ============================================================================
// Canvas fixtures
// ============================================================================

pub fn mounted_canvas(doc: Document) -> Canvas {
    mounted_canvas_with(doc, CanvasConfig::default())
}

pub fn mounted_canvas_with(doc: Document, config: CanvasConfig) -> Canvas {
    let mut canvas = Canvas::new(doc, config).expect("valid config");
    canvas.mount(VIEWPORT);
    canvas
}

/// Pointer event at page `(x, y)` under the default transform.
pub fn at(x: f64, y: f64, time_stamp: f64) -> PointerEvent {
    PointerEvent::new(x + VIEWPORT.width / 2.0, y + VIEWPORT.height / 2.0, time_stamp)
}

/// Full primary-button click at page `(x, y)`.
pub fn click(canvas: &mut Canvas, x: f64, y: f64, time_stamp: f64) -> Vec<flowcanvas::CanvasEvent> {
    canvas.pointer_down(at(x, y, time_stamp));
    canvas.pointer_up(at(x, y, time_stamp))
}
