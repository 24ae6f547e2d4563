//! Mouse move handling - drag-move and resize gestures.
//!
//! ## Performance Notes
//!
//! Both handlers collect their snap lines once on `down` and only compare
//! against them on `move`. Enable profiling with `--features profiling` to see
//! timing of `handler_move`.

use tracing::warn;

use crate::canvas::{Canvas, EditorContext};
use crate::document::{ObjectId, PortDirection};
use crate::geometry::{Point, Rect};
use crate::overlay::Overlay;
use crate::snap::SnapLines;

use super::event::PointerEvent;
use super::resize::{ResizeHandle, resize_rect};
use super::state::Tracking;

impl Canvas {
    /// Forwards a pointer move to the active handler, if any.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        self.last_pointer = event.client;
        if event.movement != Point::ZERO {
            self.last_movement = event.movement;
        }

        if let Some(handler) = self.handler.as_mut() {
            handler.move_to(&mut self.ctx, &event);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DraggedObject {
    id: ObjectId,
    /// Parent-relative rect at pointer-down
    rect: Rect,
    /// Page-space rect at pointer-down
    absolute: Rect,
}

/// Moves the moveable part of the selection.
///
/// Positions are provisional (exposed through the view's drag offset) until
/// `up` writes them, all inside one undo transaction.
pub struct DragState {
    snap: SnapLines,
    objects: Vec<DraggedObject>,
    bounds_at_down: Rect,
    left: f64,
    top: f64,
    rects: Vec<Rect>,
    changed: bool,
    open: bool,
}

impl DragState {
    pub fn new(snap_tolerance: f64) -> Self {
        Self {
            snap: SnapLines::new(snap_tolerance),
            objects: Vec::new(),
            bounds_at_down: Rect::default(),
            left: 0.0,
            top: 0.0,
            rects: Vec::new(),
            changed: false,
            open: false,
        }
    }

    pub(super) fn down(&mut self, ctx: &mut EditorContext) {
        ctx.document.begin_transaction();
        self.open = true;

        let doc = &ctx.document;
        self.bounds_at_down = ctx.view.selection_bounding_rect(doc).unwrap_or_default();
        self.objects = ctx
            .view
            .selected_objects()
            .iter()
            .filter_map(|id| doc.object(*id))
            .filter(|object| object.is_moveable())
            .filter_map(|object| {
                Some(DraggedObject {
                    id: object.id,
                    rect: object.rect,
                    absolute: doc.absolute_rect(object.id)?,
                })
            })
            .collect();

        self.snap.find_excluding(doc, ctx.view.selected_objects());
        self.left = self.bounds_at_down.left;
        self.top = self.bounds_at_down.top;
        self.rects = self.objects.iter().map(|object| object.rect).collect();
        self.changed = false;
    }

    pub(super) fn move_to(&mut self, ctx: &mut EditorContext, tracking: &Tracking, event: &PointerEvent) {
        let scale = ctx.view.transform().scale;
        self.left += tracking.movement.x / scale;
        self.top += tracking.movement.y / scale;

        self.snap.enabled =
            !event.modifiers.shift && tracking.elapsed > ctx.config.snap_activation_delay_ms;

        if tracking.elapsed < ctx.config.drag_start_delay_ms
            && tracking.distance < ctx.config.drag_start_distance
        {
            return;
        }

        let mut position = self.snap.drag_snap(
            self.left,
            self.top,
            self.bounds_at_down.width,
            self.bounds_at_down.height,
            scale,
        );

        if event.modifiers.ctrl {
            if let Some(top) = self.connection_aligned_top(ctx, position) {
                position.y = top;
            }
        }

        let offset = position.sub(self.bounds_at_down.top_left());
        ctx.view.set_drag_offset(Some(offset));

        self.changed = false;
        for (i, object) in self.objects.iter().enumerate() {
            let rect = Rect::new(
                (object.rect.left + offset.x).round(),
                (object.rect.top + offset.y).round(),
                object.rect.width,
                object.rect.height,
            );
            if ctx.document.object(object.id).is_some_and(|o| o.rect != rect) {
                self.changed = true;
            }
            self.rects[i] = rect;
        }
    }

    /// Top of the selection that makes the nearest half-dragged connection
    /// line horizontal. Only lines running left to right count.
    fn connection_aligned_top(&self, ctx: &EditorContext, position: Point) -> Option<f64> {
        let doc = &ctx.document;
        let delta = position.sub(self.bounds_at_down.top_left());
        let dragged = |id: ObjectId| self.objects.iter().find(|object| object.id == id);

        let mut best: Option<(f64, f64)> = None;
        for line in doc.connection_lines() {
            let Some((source, target)) = doc.line_endpoints(line) else {
                continue;
            };

            let (moving, moving_port, fixed_point, moving_is_source) =
                match (dragged(source), dragged(target)) {
                    (Some(moving), None) => {
                        let port = doc.object(source).and_then(|o| o.port(PortDirection::Output, &line.output));
                        let fixed = doc.port_position(target, PortDirection::Input, &line.input);
                        (moving, port, fixed, true)
                    }
                    (None, Some(moving)) => {
                        let port = doc.object(target).and_then(|o| o.port(PortDirection::Input, &line.input));
                        let fixed = doc.port_position(source, PortDirection::Output, &line.output);
                        (moving, port, fixed, false)
                    }
                    _ => continue,
                };
            let (Some(moving_port), Some(fixed_point)) = (moving_port, fixed_point) else {
                continue;
            };

            let moving_point = moving.absolute.top_left().add(delta).add(moving_port.position);
            let (output, input) = if moving_is_source {
                (moving_point, fixed_point)
            } else {
                (fixed_point, moving_point)
            };
            if output.x >= input.x {
                continue;
            }

            let length = output.distance(input);
            if best.is_none_or(|(found, _)| length < found) {
                let top = self.bounds_at_down.top
                    + (fixed_point.y - moving_port.position.y - moving.absolute.top);
                best = Some((length, top));
            }
        }

        best.map(|(_, top)| top)
    }

    pub(super) fn up(&mut self, ctx: &mut EditorContext) {
        if self.changed {
            for (object, rect) in self.objects.iter().zip(&self.rects) {
                if let Err(err) = ctx.document.update_rect(object.id, *rect) {
                    warn!(id = %object.id, error = %err, "Dragged object vanished");
                }
            }
        }

        ctx.view.set_drag_offset(None);
        self.snap.clear();
        if self.open {
            ctx.document.end_transaction();
            self.open = false;
        }
    }

    pub(super) fn overlay(&self, ctx: &EditorContext) -> Option<Overlay> {
        let offset = ctx.view.drag_offset()?;
        let rect = self.bounds_at_down.translate(offset.x, offset.y);
        Overlay::snap_guides(&self.snap.guides(&rect), &ctx.view.transform())
    }
}

/// Resizes the single selected object from one of its handles.
///
/// Writes floored rects while moving; the surrounding transaction makes the
/// gesture one undo step.
pub struct ResizeState {
    handle: ResizeHandle,
    snap: SnapLines,
    object: Option<ObjectId>,
    saved: Rect,
    /// Page position of the parent's origin
    parent_origin: Point,
    open: bool,
}

impl ResizeState {
    pub fn new(handle: ResizeHandle, snap_tolerance: f64) -> Self {
        Self {
            handle,
            snap: SnapLines::new(snap_tolerance),
            object: None,
            saved: Rect::default(),
            parent_origin: Point::ZERO,
            open: false,
        }
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    pub(super) fn down(&mut self, ctx: &mut EditorContext) {
        let Some(id) = ctx.view.selected_objects().first().copied() else {
            return;
        };
        let Some(object) = ctx.document.object(id) else {
            return;
        };

        self.object = Some(id);
        self.saved = object.rect;
        self.parent_origin = ctx.document.parent_origin(id);
        self.snap.find_excluding(&ctx.document, ctx.view.selected_objects());

        ctx.document.begin_transaction();
        self.open = true;
    }

    pub(super) fn move_to(&mut self, ctx: &mut EditorContext, tracking: &Tracking, event: &PointerEvent) {
        let Some(id) = self.object else {
            return;
        };

        self.snap.enabled =
            !event.modifiers.shift && tracking.elapsed > ctx.config.snap_activation_delay_ms;

        let scale = ctx.view.transform().scale;
        let delta = tracking.offset_distance.scale(1.0 / scale);
        let origin = self.parent_origin;
        let snap = &self.snap;

        let snap_x = |x: f64| {
            let x = x.round();
            if !snap.enabled {
                return x;
            }
            snap.closest_vertical(x + origin.x, scale)
                .map_or(x, |line| line.pos.round() - origin.x)
        };
        let snap_y = |y: f64| {
            let y = y.round();
            if !snap.enabled {
                return y;
            }
            snap.closest_horizontal(y + origin.y, scale)
                .map_or(y, |line| line.pos.round() - origin.y)
        };

        let rect = resize_rect(self.handle, &self.saved, delta, snap_x, snap_y);
        let floored = Rect::new(
            rect.left.floor(),
            rect.top.floor(),
            rect.width.floor(),
            rect.height.floor(),
        );

        if let Err(err) = ctx.document.update_rect(id, floored) {
            warn!(%id, error = %err, "Resized object vanished");
            self.object = None;
        }
    }

    pub(super) fn up(&mut self, ctx: &mut EditorContext) {
        self.snap.clear();
        if self.open {
            ctx.document.end_transaction();
            self.open = false;
        }
    }

    pub(super) fn overlay(&self, ctx: &EditorContext) -> Option<Overlay> {
        let rect = ctx.document.absolute_rect(self.object?)?;
        Overlay::snap_guides(&self.snap.guides(&rect), &ctx.view.transform())
    }
}
