//! Mouse and wheel input handling for the canvas.
//!
//! This module implements all pointer interaction logic: selection, drag-move,
//! resize, rubber-band, panning, connection drawing and re-routing.
//!
//! ## Architecture
//!
//! Every gesture is one [`HandlerSession`] wrapping a [`MouseHandler`] enum.
//! The canvas holds at most one session; a new pointer-down always finishes
//! the old one before starting the next, so handlers are mutually exclusive.
//!
//! ## State Transitions
//!
//! ```text
//!                pointer_down
//!   Idle ───────────────────────────▶ Pan | Resize | Connect | Reroute
//!    ▲                                 | Drag | RubberBand | (none)
//!    │                                        │
//!    │      pointer_up / unmount              │ pointer_move,
//!    └────────────────────────────────────────┤ wheel, auto-scroll tick
//!                                             ▼
//!                                      handler.move_to
//! ```
//!
//! ## Modules
//!
//! - `event` - Pointer and wheel events in client space
//! - `state` - Handler enum, session and shared pointer tracking
//! - `mouse_down` - Handler selection on pointer down
//! - `mouse_up` - Gesture finish, double click and context menu detection
//! - `drag` - Pointer move forwarding, drag-move and resize handlers
//! - `resize` - Resize handle geometry
//! - `connect` - New connection and re-route handlers
//! - `wheel` - Discrete zoom and wheel panning

mod connect;
mod drag;
pub mod event;
mod mouse_down;
mod mouse_up;
pub mod resize;
mod state;
mod wheel;

pub use connect::{ConnectState, NewTargetRequest, PortRef, RerouteState};
pub use drag::{DragState, ResizeState};
pub use event::{Modifiers, PointerButton, PointerEvent, WheelEvent};
pub use mouse_up::DoubleClickTracker;
pub use resize::ResizeHandle;
pub use state::{HandlerKind, HandlerSession, MouseHandler, Tracking};
