//! Interaction engine for page and flow design canvases.
//!
//! A [`Canvas`] turns pointer, wheel and animation-frame events into edits of
//! a [`Document`]: selection, drag-move with snap lines, resize, rubber-band
//! selection, panning, discrete zoom, connection drawing and re-routing, and
//! auto-scroll while dragging near the viewport edge.
//!
//! Three coordinate spaces are in play:
//!
//! - client: pixels of the host window
//! - offset: pixels relative to the canvas' client rect
//! - page: document units, independent of pan and zoom
//!
//! [`Transform`] converts between them.

pub mod autoscroll;
pub mod canvas;
pub mod config;
pub mod constants;
pub mod dnd;
pub mod document;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod perf;
pub mod persistence;
pub mod snap;
pub mod spatial_index;
pub mod transform;
pub mod view_state;

pub use canvas::{Canvas, CanvasEvent, EditorContext};
pub use config::CanvasConfig;
pub use document::{ConnectionLine, DesignObject, Document, ObjectId, ObjectKind, ObjectTemplate, Port, PortDirection};
pub use error::{CanvasError, CanvasResult};
pub use geometry::{Point, Rect};
pub use transform::Transform;
pub use view_state::{ListenerId, MoveDirection, ViewState};
