//! Auto-scroll while dragging near a viewport edge.
//!
//! The host drives [`DragScroll::tick`] from its animation-frame loop for as
//! long as [`DragScroll::is_active`] reports true. Each axis keeps its own
//! frame timestamp; leaving the edge zone clears it so the next entry ramps
//! up from zero instead of jumping.

use tracing::trace;

use crate::config::CanvasConfig;
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone)]
pub struct DragScroll {
    border: f64,
    max_effect: f64,
    min_speed: f64,
    max_speed: f64,
    last_time_x: Option<f64>,
    last_time_y: Option<f64>,
    active: bool,
}

impl Default for DragScroll {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl DragScroll {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            border: config.scroll_border_threshold,
            max_effect: config.scroll_max_effect_distance,
            min_speed: config.scroll_min_speed,
            max_speed: config.scroll_max_speed,
            last_time_x: None,
            last_time_y: None,
            active: false,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
        self.last_time_x = None;
        self.last_time_y = None;
        trace!("Drag scroll started");
    }

    pub fn stop(&mut self) {
        if self.active {
            trace!("Drag scroll stopped");
        }
        self.active = false;
        self.last_time_x = None;
        self.last_time_y = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pixels per second for a pointer `depth` past the border line.
    fn speed(&self, depth: f64) -> f64 {
        if self.max_effect <= 0.0 {
            return self.min_speed;
        }
        let t = (depth / self.max_effect).clamp(0.0, 1.0);
        self.min_speed + (self.max_speed - self.min_speed) * t
    }

    /// One axis: `near_low`/`near_high` are how far past the border line the
    /// pointer sits on each side (negative when outside the zone).
    fn axis(&self, now: f64, last_time: &mut Option<f64>, near_low: f64, near_high: f64, movement: f64) -> f64 {
        let direction = if near_low >= 0.0 && movement < 0.0 {
            Some((1.0, near_low))
        } else if near_high >= 0.0 && movement > 0.0 {
            Some((-1.0, near_high))
        } else {
            None
        };

        let Some((sign, depth)) = direction else {
            *last_time = None;
            return 0.0;
        };

        let dt = match *last_time {
            Some(previous) => (now - previous).max(0.0),
            None => 0.0,
        };
        *last_time = Some(now);

        if dt == 0.0 {
            return 0.0;
        }
        sign * self.speed(depth) * dt / 1000.0
    }

    /// Translation (offset pixels) to apply to the view this frame.
    ///
    /// `pointer` is the last pointer position in client space and
    /// `last_movement` its last non-zero movement.
    pub fn tick(&mut self, now_ms: f64, pointer: Point, last_movement: Point, client_rect: &Rect) -> Point {
        if !self.active {
            return Point::ZERO;
        }

        let left = client_rect.left + self.border - pointer.x;
        let right = pointer.x - (client_rect.right() - self.border);
        let top = client_rect.top + self.border - pointer.y;
        let bottom = pointer.y - (client_rect.bottom() - self.border);

        let mut last_x = self.last_time_x;
        let mut last_y = self.last_time_y;
        let dx = self.axis(now_ms, &mut last_x, left, right, last_movement.x);
        let dy = self.axis(now_ms, &mut last_y, top, bottom, last_movement.y);
        self.last_time_x = last_x;
        self.last_time_y = last_y;

        if dx != 0.0 || dy != 0.0 {
            trace!(dx, dy, "Drag scroll tick");
        }
        Point::new(dx, dy)
    }
}
