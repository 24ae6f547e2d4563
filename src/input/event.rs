//! Pointer and wheel events as the canvas sees them.
//!
//! Positions are in client space. `time_stamp` is in milliseconds on any
//! monotonic clock the host likes, as long as it is the same for every event.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub client: Point,
    /// Movement since the previous event, client pixels
    pub movement: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub time_stamp: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, time_stamp: f64) -> Self {
        Self {
            client: Point::new(x, y),
            time_stamp,
            ..Default::default()
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_movement(mut self, dx: f64, dy: f64) -> Self {
        self.movement = Point::new(dx, dy);
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    pub client: Point,
    pub delta: Point,
    pub modifiers: Modifiers,
    pub time_stamp: f64,
}

impl WheelEvent {
    pub fn new(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            client: Point::new(x, y),
            delta: Point::new(delta_x, delta_y),
            ..Default::default()
        }
    }

    pub fn at(mut self, time_stamp: f64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}
