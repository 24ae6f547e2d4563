//! Mouse up event handling - finish the gesture, detect double clicks and
//! context-menu requests.

use tracing::{debug, warn};

use crate::canvas::{Canvas, CanvasEvent};
use crate::config::CanvasConfig;
use crate::geometry::Point;

use super::event::{PointerButton, PointerEvent};

/// Tracks primary-button clicks in client space.
///
/// A click is an up-event close to its own down-event; two clicks close in
/// time and position make a double click.
#[derive(Debug, Clone)]
pub struct DoubleClickTracker {
    time_ms: f64,
    distance: f64,
    down_position: Point,
    button_at_down: PointerButton,
    last_click: Option<(f64, Point)>,
}

impl DoubleClickTracker {
    pub fn new(time_ms: f64, distance: f64) -> Self {
        Self {
            time_ms,
            distance,
            down_position: Point::ZERO,
            button_at_down: PointerButton::Primary,
            last_click: None,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.double_click_time_ms, config.double_click_distance)
    }

    pub fn button_at_down(&self) -> PointerButton {
        self.button_at_down
    }

    pub fn pointer_down(&mut self, client: Point, button: PointerButton) {
        self.down_position = client;
        self.button_at_down = button;
    }

    /// Returns `true` when this up-event completes a double click.
    pub fn pointer_up(&mut self, client: Point, time_stamp: f64) -> bool {
        if self.button_at_down != PointerButton::Primary {
            self.last_click = None;
            return false;
        }

        if client.distance(self.down_position) > self.distance {
            self.last_click = None;
            return false;
        }

        let double = self.last_click.is_some_and(|(time, position)| {
            time_stamp - time <= self.time_ms && client.distance(position) <= self.distance
        });

        self.last_click = if double { None } else { Some((time_stamp, client)) };
        double
    }

    pub fn reset(&mut self) {
        self.last_click = None;
    }
}

impl Canvas {
    /// Finishes the active gesture and reports what the host should do next.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let mut suppress_context_menu = false;

        if let Some(mut session) = self.handler.take() {
            session.up(&mut self.ctx, false);
            debug!(handler = ?session.kind(), "Handler finished");

            if let Some(distance) = session.pan_distance() {
                suppress_context_menu = distance > self.ctx.config.pan_context_menu_distance;
            }
            if let Some(request) = session.new_target_request() {
                events.push(CanvasEvent::ConnectToNewTarget(request.clone()));
            }
        }
        self.drag_scroll.stop();

        if self.ctx.document.in_transaction() {
            warn!("Undo transaction left open by handler, closing");
            self.ctx.document.close_transactions();
        }

        if self.clicks.pointer_up(event.client, event.time_stamp) {
            match self.ctx.view.selected_objects() {
                [id] => {
                    debug!(%id, "Double click opens object");
                    events.push(CanvasEvent::Open(*id));
                }
                [] => {
                    debug!("Double click on empty canvas resets the view");
                    self.reset_transform();
                    events.push(CanvasEvent::ViewReset);
                }
                _ => {}
            }
        } else if self.clicks.button_at_down() == PointerButton::Secondary && !suppress_context_menu {
            events.push(self.context_menu_request(event.client));
        }

        events
    }

    /// Selects what the context menu should act on and builds the request.
    fn context_menu_request(&mut self, client: Point) -> CanvasEvent {
        let page = self.ctx.view.transform().client_to_page_point(client);
        let ctx = &mut self.ctx;

        let inside = ctx
            .view
            .selection_bounding_rect(&ctx.document)
            .is_some_and(|bounds| bounds.contains(page));
        if !inside {
            ctx.view.deselect_all_objects();
            if let Some(hit) = ctx.hits.object_from_point(&ctx.document, page) {
                ctx.view.select_object(hit.id);
            }
        }

        CanvasEvent::ContextMenu { client, page }
    }
}
