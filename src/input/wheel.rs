//! Wheel handling - Ctrl+wheel zooms in discrete steps, plain wheel pans.

use tracing::debug;

use crate::canvas::Canvas;
use crate::geometry::Point;
use crate::profile_scope;

use super::event::WheelEvent;

impl Canvas {
    pub fn wheel(&mut self, event: WheelEvent) {
        profile_scope!("wheel");

        if self.handler.as_ref().is_some_and(|session| session.pan_distance().is_some()) {
            return;
        }

        let old = self.ctx.view.transform();

        let new = if event.modifiers.ctrl {
            self.wheel_accumulator += event.delta.y;
            if self.wheel_accumulator.abs() <= self.ctx.config.wheel_zoom_threshold {
                return;
            }

            let steps = &self.ctx.config.zoom_steps;
            let scale = if self.wheel_accumulator < 0.0 {
                old.next_scale(steps)
            } else {
                old.previous_scale(steps)
            };
            self.wheel_accumulator = 0.0;
            debug!(from = old.scale, to = scale, "Wheel zoom");
            old.zoomed_at(event.client, scale)
        } else {
            let (dx, dy) = if event.modifiers.shift {
                (event.delta.y, event.delta.x)
            } else {
                (event.delta.x, event.delta.y)
            };
            old.translated(Point::new(-dx, -dy))
        };

        self.ctx.view.set_transform(new);

        if let Some(session) = self.handler.as_mut() {
            session.on_transform_changed(&mut self.ctx, &old, event.time_stamp);
        }
    }
}
