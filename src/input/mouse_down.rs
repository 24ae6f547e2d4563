//! Mouse down event handling - handler selection and gesture start.
//!
//! ## Performance Notes
//!
//! Pointer-down runs one hit test against the R-tree spatial index and, for
//! a single selected object, eight resize-handle rect checks in offset space.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use tracing::debug;

use crate::canvas::{Canvas, EditorContext};
use crate::geometry::Point;
use crate::profile_scope;

use super::connect::{ConnectState, PortRef, RerouteState};
use super::drag::{DragState, ResizeState};
use super::event::{PointerButton, PointerEvent};
use super::resize::{ResizeHandle, handle_at};
use super::state::{HandlerSession, MouseHandler};

impl Canvas {
    /// Starts a gesture. Any gesture still in flight is finished (cancelled)
    /// first, so exactly one handler is ever active.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        profile_scope!("pointer_down");

        if let Some(mut previous) = self.handler.take() {
            debug!(handler = ?previous.kind(), "Cancelling handler interrupted by pointer down");
            previous.up(&mut self.ctx, true);
        }
        self.drag_scroll.stop();

        self.clicks.pointer_down(event.client, event.button);
        self.last_pointer = event.client;
        self.last_movement = event.movement;

        let handler = if event.button != PointerButton::Primary || event.modifiers.alt || self.pan_tool {
            Some(MouseHandler::pan())
        } else {
            self.create_mouse_handler(&event)
        };

        let Some(handler) = handler else {
            debug!("Pointer down without a handler");
            return;
        };

        let mut session = HandlerSession::new(handler);
        session.down(&mut self.ctx, &event);
        debug!(handler = ?session.kind(), x = event.client.x, y = event.client.y, "Handler started");

        if session.is_scroll_eligible() {
            self.drag_scroll.start();
        }
        self.handler = Some(session);
    }

    fn resize_handle_at(&self, offset: Point) -> Option<ResizeHandle> {
        let target = self.resize_target_rect()?;
        handle_at(&target, offset, self.ctx.config.resize_handle_size)
    }

    fn create_mouse_handler(&mut self, event: &PointerEvent) -> Option<MouseHandler> {
        let transform = self.ctx.view.transform();
        let offset = transform.client_to_offset_point(event.client);
        let page = transform.offset_to_page_point(offset);
        let snap_tolerance = self.ctx.config.snap_tolerance;

        if let Some(handle) = self.resize_handle_at(offset) {
            return Some(MouseHandler::Resize(ResizeState::new(handle, snap_tolerance)));
        }

        let ctx = &mut self.ctx;
        let hit = ctx.hits.object_from_point(&ctx.document, page);
        let shift = event.modifiers.shift;
        let ctrl = event.modifiers.ctrl;

        if let Some(hit) = &hit {
            if let Some(output) = &hit.connection_output {
                let port = PortRef::new(hit.id, output.as_str());
                return Some(if shift {
                    MouseHandler::Reroute(RerouteState::outputs(port))
                } else {
                    MouseHandler::Connect(ConnectState::starting_at_output(port))
                });
            }
            if let Some(input) = &hit.connection_input {
                let port = PortRef::new(hit.id, input.as_str());
                return Some(if shift {
                    MouseHandler::Reroute(RerouteState::inputs(port))
                } else {
                    MouseHandler::Connect(ConnectState::starting_at_input(port))
                });
            }
        }

        if !shift && !ctrl && inside_selection(ctx, page) {
            return ctx
                .view
                .is_selection_moveable(&ctx.document)
                .then(|| MouseHandler::Drag(DragState::new(snap_tolerance)));
        }

        let Some(hit) = hit else {
            return Some(MouseHandler::rubber_band());
        };

        if !shift && !ctrl {
            ctx.view.deselect_all_objects();
        }
        ctx.view.toggle_object(hit.id);

        ctx.view
            .is_selection_moveable(&ctx.document)
            .then(|| MouseHandler::Drag(DragState::new(snap_tolerance)))
    }
}

fn inside_selection(ctx: &EditorContext, page: Point) -> bool {
    ctx.view
        .selection_bounding_rect(&ctx.document)
        .is_some_and(|bounds| bounds.contains(page))
}
