//! Drag-and-drop of new objects from a palette onto the canvas.
//!
//! A [`DragSession`] is created by the host when a palette drag starts and is
//! passed to every `drag_over` / `drop_object` / `drag_leave` call. The
//! provisional object lives only in the session until it is dropped.

use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::document::{Document, ObjectId, ObjectKind, ObjectTemplate};
use crate::error::CanvasResult;
use crate::geometry::{Point, Rect};
use crate::overlay::Overlay;
use crate::snap::SnapLines;

pub struct DragSession {
    template: ObjectTemplate,
    parent: Option<ObjectId>,
    /// Parent-relative rect of the provisional object
    rect: Option<Rect>,
    snap: SnapLines,
}

impl DragSession {
    pub fn new(template: ObjectTemplate, parent: Option<ObjectId>) -> Self {
        Self {
            template,
            parent,
            rect: None,
            snap: SnapLines::default(),
        }
    }

    pub fn template(&self) -> &ObjectTemplate {
        &self.template
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// `None` until the first accepted `drag_over`.
    pub fn provisional_rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Widgets cannot be dropped into action flows.
    pub fn accepts(&self, doc: &Document) -> bool {
        let parent_kind = self.parent.and_then(|id| doc.object(id)).map(|object| object.kind);
        !(self.template.kind == ObjectKind::Widget && parent_kind == Some(ObjectKind::Action))
    }

    fn page_rect(&self, doc: &Document) -> Option<Rect> {
        let rect = self.rect?;
        let origin = self.parent.and_then(|id| doc.absolute_rect(id)).map_or(Point::ZERO, |r| r.top_left());
        Some(rect.translate(origin.x, origin.y))
    }
}

impl Canvas {
    /// Centres the provisional object on the pointer and snaps it. Returns
    /// `false` when the session cannot drop here.
    pub fn drag_over(&mut self, session: &mut DragSession, client: Point, shift: bool) -> bool {
        let ctx = &mut self.ctx;
        if !session.accepts(&ctx.document) {
            return false;
        }

        if session.rect.is_none() {
            ctx.view.deselect_all_objects();
            session.snap.set_tolerance(ctx.config.snap_tolerance);
            session.snap.find_excluding(&ctx.document, &[]);
            debug!(kind = ?session.template.kind, "Drag session entered canvas");
        }
        session.snap.enabled = !shift;

        let transform = ctx.view.transform();
        let width = session.template.width;
        let height = session.template.height;
        let position = transform.client_to_page_point(Point::new(
            client.x - width * transform.scale / 2.0,
            client.y - height * transform.scale / 2.0,
        ));
        let position = session
            .snap
            .drag_snap(position.x, position.y, width, height, transform.scale);

        let origin = session
            .parent
            .and_then(|id| ctx.document.absolute_rect(id))
            .map_or(Point::ZERO, |r| r.top_left());
        session.rect = Some(Rect::new(
            (position.x - origin.x).round(),
            (position.y - origin.y).round(),
            width,
            height,
        ));
        true
    }

    /// Adds the provisional object as one undo step and selects it.
    pub fn drop_object(&mut self, mut session: DragSession) -> CanvasResult<Option<ObjectId>> {
        session.snap.clear();
        let Some(rect) = session.rect else {
            return Ok(None);
        };

        let ctx = &mut self.ctx;
        ctx.document.begin_transaction();
        let added = ctx
            .document
            .add_object(session.parent, &session.template, rect.left, rect.top);
        ctx.document.end_transaction();
        let id = added?;

        ctx.view.select_objects(&[id]);
        info!(%id, kind = ?session.template.kind, "Object dropped");
        Ok(Some(id))
    }

    pub fn drag_leave(&mut self, session: DragSession) {
        debug!(dropped = false, had_position = session.rect.is_some(), "Drag session left canvas");
    }

    /// Provisional object and the guides it is aligned with.
    pub fn drag_overlays(&self, session: &DragSession) -> Vec<Overlay> {
        let Some(rect) = session.page_rect(&self.ctx.document) else {
            return Vec::new();
        };
        let transform = self.ctx.view.transform();

        let mut overlays = vec![Overlay::DropTarget(transform.page_to_offset_rect(rect))];
        overlays.extend(Overlay::snap_guides(&session.snap.guides(&rect), &transform));
        overlays
    }
}
