//! Mouse-handler state machine.
//!
//! One [`HandlerSession`] exists per gesture: created on pointer-down, fed
//! every move (real or synthesized after a view change) and finished by `up`.
//! The handler itself is a plain enum; shared pointer bookkeeping lives in
//! [`Tracking`].
//!
//! ## Handlers
//!
//! ```text
//! Pan            secondary/middle button, Alt, or the pan tool
//! Resize         pointer on a resize handle of the single selected object
//! Connect        pointer on a port (from output or from input)
//! Reroute        Shift + pointer on a port
//! Drag           pointer inside a moveable selection, or on an object that becomes selected
//! RubberBand     pointer on empty canvas
//! ```

use crate::canvas::EditorContext;
use crate::geometry::{Point, Rect};
use crate::overlay::Overlay;
use crate::profile_scope;
use crate::transform::Transform;

use super::connect::{ConnectState, NewTargetRequest, RerouteState};
use super::drag::{DragState, ResizeState};
use super::event::PointerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Pan,
    RubberBand,
    Drag,
    Resize,
    ConnectFromOutput,
    ConnectFromInput,
    RerouteOutput,
    RerouteInput,
}

/// Pointer bookkeeping shared by every handler.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tracking {
    pub time_at_down: f64,
    /// Milliseconds since the pointer went down
    pub elapsed: f64,
    pub offset_at_down: Point,
    pub last_offset: Point,
    /// `last_offset - offset_at_down`
    pub offset_distance: Point,
    /// Length of `offset_distance`
    pub distance: f64,
    /// Offset-space movement of the last event
    pub movement: Point,
    pub page_at_down: Point,
    pub last_page: Point,
}

impl Tracking {
    pub fn at_down(transform: &Transform, event: &PointerEvent) -> Self {
        let offset = transform.client_to_offset_point(event.client);
        let page = transform.offset_to_page_point(offset);
        Self {
            time_at_down: event.time_stamp,
            elapsed: 0.0,
            offset_at_down: offset,
            last_offset: offset,
            offset_distance: Point::ZERO,
            distance: 0.0,
            movement: Point::ZERO,
            page_at_down: page,
            last_page: page,
        }
    }

    pub fn update(&mut self, transform: &Transform, event: &PointerEvent) {
        self.elapsed = event.time_stamp - self.time_at_down;

        let offset = transform.client_to_offset_point(event.client);
        self.offset_distance = offset.sub(self.offset_at_down);
        self.distance = self.offset_distance.length();
        self.movement = offset.sub(self.last_offset);
        self.last_offset = offset;
        self.last_page = transform.offset_to_page_point(offset);
    }

    /// Moves the recorded offset points so they stay over the same page
    /// points after the view changed from `old` to `new`.
    pub fn remap(&mut self, old: &Transform, new: &Transform) {
        self.offset_at_down = new.page_to_offset_point(old.offset_to_page_point(self.offset_at_down));
        self.last_offset = new.page_to_offset_point(old.offset_to_page_point(self.last_offset));
        self.offset_distance = self.last_offset.sub(self.offset_at_down);
        self.distance = self.offset_distance.length();
        self.page_at_down = new.offset_to_page_point(self.offset_at_down);
        self.last_page = new.offset_to_page_point(self.last_offset);
        self.movement = Point::ZERO;
    }
}

pub enum MouseHandler {
    Pan { total_movement: Point },
    RubberBand { rect: Option<Rect> },
    Drag(DragState),
    Resize(ResizeState),
    Connect(ConnectState),
    Reroute(RerouteState),
}

impl MouseHandler {
    pub fn pan() -> Self {
        MouseHandler::Pan {
            total_movement: Point::ZERO,
        }
    }

    pub fn rubber_band() -> Self {
        MouseHandler::RubberBand { rect: None }
    }
}

pub struct HandlerSession {
    tracking: Tracking,
    last_event: PointerEvent,
    handler: MouseHandler,
}

impl HandlerSession {
    pub fn new(handler: MouseHandler) -> Self {
        Self {
            tracking: Tracking::default(),
            last_event: PointerEvent::default(),
            handler,
        }
    }

    pub fn kind(&self) -> HandlerKind {
        match &self.handler {
            MouseHandler::Pan { .. } => HandlerKind::Pan,
            MouseHandler::RubberBand { .. } => HandlerKind::RubberBand,
            MouseHandler::Drag(_) => HandlerKind::Drag,
            MouseHandler::Resize(_) => HandlerKind::Resize,
            MouseHandler::Connect(state) if state.from_output() => HandlerKind::ConnectFromOutput,
            MouseHandler::Connect(_) => HandlerKind::ConnectFromInput,
            MouseHandler::Reroute(state) if state.moves_output() => HandlerKind::RerouteOutput,
            MouseHandler::Reroute(_) => HandlerKind::RerouteInput,
        }
    }

    pub fn tracking(&self) -> &Tracking {
        &self.tracking
    }

    pub fn cursor(&self) -> &'static str {
        match &self.handler {
            MouseHandler::Pan { .. } => "grabbing",
            MouseHandler::RubberBand { .. } | MouseHandler::Drag(_) => "default",
            MouseHandler::Resize(state) => state.handle().cursor(),
            MouseHandler::Connect(_) | MouseHandler::Reroute(_) => "crosshair",
        }
    }

    /// Handlers that keep working while the view auto-scrolls.
    pub fn is_scroll_eligible(&self) -> bool {
        !matches!(self.handler, MouseHandler::Pan { .. })
    }

    /// Total pan distance so far, only for the pan handler.
    pub fn pan_distance(&self) -> Option<f64> {
        match &self.handler {
            MouseHandler::Pan { total_movement } => Some(total_movement.length()),
            _ => None,
        }
    }

    /// Set by a connect gesture that ended on empty canvas.
    pub fn new_target_request(&self) -> Option<&NewTargetRequest> {
        match &self.handler {
            MouseHandler::Connect(state) => state.new_target_request(),
            _ => None,
        }
    }

    pub fn down(&mut self, ctx: &mut EditorContext, event: &PointerEvent) {
        self.tracking = Tracking::at_down(&ctx.view.transform(), event);
        self.last_event = *event;

        match &mut self.handler {
            MouseHandler::Pan { .. } => {}
            MouseHandler::RubberBand { .. } => ctx.view.deselect_all_objects(),
            MouseHandler::Drag(state) => state.down(ctx),
            MouseHandler::Resize(state) => state.down(ctx),
            MouseHandler::Connect(state) => state.down(ctx, &self.tracking),
            MouseHandler::Reroute(state) => state.down(ctx, &self.tracking),
        }
    }

    pub fn move_to(&mut self, ctx: &mut EditorContext, event: &PointerEvent) {
        profile_scope!("handler_move");

        let transform = ctx.view.transform();
        self.tracking.update(&transform, event);
        self.last_event = *event;

        match &mut self.handler {
            MouseHandler::Pan { total_movement } => {
                let movement = self.tracking.movement;
                ctx.view.set_transform(transform.translated(movement));
                *total_movement = total_movement.add(movement);
            }
            MouseHandler::RubberBand { rect } => {
                let band = Rect::from_corners(self.tracking.offset_at_down, self.tracking.last_offset);
                *rect = Some(band);
                let page = transform.offset_to_page_rect(band);
                let ids = ctx.hits.objects_inside_rect(&ctx.document, &page);
                ctx.view.select_objects(&ids);
            }
            MouseHandler::Drag(state) => state.move_to(ctx, &self.tracking, event),
            MouseHandler::Resize(state) => state.move_to(ctx, &self.tracking, event),
            MouseHandler::Connect(state) => state.move_to(ctx, &self.tracking),
            MouseHandler::Reroute(state) => state.move_to(ctx, &self.tracking),
        }
    }

    /// Finishes the gesture. `cancel` discards connect/reroute results.
    pub fn up(&mut self, ctx: &mut EditorContext, cancel: bool) {
        match &mut self.handler {
            MouseHandler::Pan { .. } => {}
            MouseHandler::RubberBand { rect } => *rect = None,
            MouseHandler::Drag(state) => state.up(ctx),
            MouseHandler::Resize(state) => state.up(ctx),
            MouseHandler::Connect(state) => state.up(ctx, cancel),
            MouseHandler::Reroute(state) => state.up(ctx, cancel),
        }
    }

    /// Re-runs `move` at the unchanged pointer position after the view
    /// changed underneath it.
    pub fn on_transform_changed(&mut self, ctx: &mut EditorContext, old: &Transform, now_ms: f64) {
        let new = ctx.view.transform();
        self.tracking.remap(old, &new);

        let event = PointerEvent {
            movement: Point::ZERO,
            time_stamp: now_ms.max(self.last_event.time_stamp),
            ..self.last_event
        };
        self.move_to(ctx, &event);
    }

    pub fn overlays(&self, ctx: &EditorContext) -> Vec<Overlay> {
        let transform = ctx.view.transform();
        match &self.handler {
            MouseHandler::Pan { .. } => Vec::new(),
            MouseHandler::RubberBand { rect } => rect.map(Overlay::RubberBand).into_iter().collect(),
            MouseHandler::Drag(state) => state.overlay(ctx).into_iter().collect(),
            MouseHandler::Resize(state) => state.overlay(ctx).into_iter().collect(),
            MouseHandler::Connect(state) => vec![state.overlay(ctx, &transform)],
            MouseHandler::Reroute(state) => vec![state.overlay(ctx, &transform)],
        }
    }
}
