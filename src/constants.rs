//! Engine-wide constants.
//!
//! Centralizes the tuned pixel and timing values so they can be overridden
//! through [`crate::config::CanvasConfig`] while keeping the defaults in one place.

// ============================================================================
// Snapping
// ============================================================================

/// Maximum distance (client pixels) between a dragged edge and a guide for a snap
pub const SNAP_TOLERANCE: f64 = 8.0;

/// Snapping only kicks in once a gesture has lasted this long (ms)
pub const SNAP_ACTIVATION_DELAY_MS: f64 = 300.0;

// ============================================================================
// Dragging
// ============================================================================

/// Moves are ignored until the drag lasted this long (ms)...
pub const DRAG_START_DELAY_MS: f64 = 200.0;

/// ...or the pointer travelled this far (client pixels)
pub const DRAG_START_DISTANCE: f64 = 10.0;

/// A connection dropped on empty canvas must travel at least this far (client pixels)
pub const NEW_CONNECTION_MIN_DISTANCE: f64 = 20.0;

/// Panning further than this with the secondary button suppresses the context menu
pub const PAN_CONTEXT_MENU_DISTANCE: f64 = 10.0;

// ============================================================================
// Auto-scroll
// ============================================================================

/// Distance from a viewport edge (client pixels) where auto-scroll starts
pub const SCROLL_BORDER_THRESHOLD: f64 = 10.0;

/// Distance past the border where the maximum speed is reached
pub const SCROLL_MAX_EFFECT_DISTANCE: f64 = 50.0;

/// Auto-scroll speed at the border (pixels per second)
pub const SCROLL_MIN_SPEED: f64 = 50.0;

/// Auto-scroll speed at the max-effect distance (pixels per second)
pub const SCROLL_MAX_SPEED: f64 = 800.0;

// ============================================================================
// Clicks & Wheel
// ============================================================================

/// Two pointer-ups within this interval form a double click (ms)
pub const DOUBLE_CLICK_TIME_MS: f64 = 350.0;

/// Two pointer-ups within this distance form a double click (client pixels)
pub const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Accumulated Ctrl+wheel delta needed for one zoom step
pub const WHEEL_ZOOM_THRESHOLD: f64 = 10.0;

// ============================================================================
// Hit Testing
// ============================================================================

/// Side length of a resize handle square (client pixels)
pub const RESIZE_HANDLE_SIZE: f64 = 8.0;

/// Radius around a port anchor that still hits the port (page units)
pub const PORT_HIT_RADIUS: f64 = 6.0;

// ============================================================================
// Zoom
// ============================================================================

/// Default scale
pub const DEFAULT_SCALE: f64 = 1.0;

/// Discrete zoom levels walked by `next_scale` / `previous_scale`
pub const ZOOM_STEPS: &[f64] = &[
    0.05, 0.1, 0.15, 0.2, 0.25, 0.33, 0.5, 0.67, 0.75, 0.8, 0.9, 1.0, 1.1, 1.25, 1.5, 1.75, 2.0,
    2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 16.0, 20.0,
];

/// Two scales closer than this are the same zoom step
pub const SCALE_EPSILON: f64 = 1e-6;
