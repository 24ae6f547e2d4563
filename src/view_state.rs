//! Selection and view state owned by one canvas.
//!
//! The transform is replaced wholesale on every change. Observers registered
//! with [`ViewState::on_change`] are told what changed after each mutation.

use std::fmt;
use tracing::{debug, warn};

use crate::document::{Document, ObjectId};
use crate::error::CanvasResult;
use crate::geometry::{BoundingRectBuilder, Point, Rect};
use crate::persistence::PersistedViewState;
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Transform,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Up,
    Right,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    /// Align the selection with the parent's left edge
    HomeX,
    /// Align the selection with the parent's right edge
    EndX,
    HomeY,
    EndY,
}

impl MoveDirection {
    fn step(self) -> Option<(f64, f64)> {
        match self {
            MoveDirection::Left => Some((-1.0, 0.0)),
            MoveDirection::Up => Some((0.0, -1.0)),
            MoveDirection::Right => Some((1.0, 0.0)),
            MoveDirection::Down => Some((0.0, 1.0)),
            MoveDirection::UpLeft => Some((-1.0, -1.0)),
            MoveDirection::UpRight => Some((1.0, -1.0)),
            MoveDirection::DownLeft => Some((-1.0, 1.0)),
            MoveDirection::DownRight => Some((1.0, 1.0)),
            _ => None,
        }
    }
}

type ChangeListener = Box<dyn FnMut(ViewChange)>;

/// Returned by [`ViewState::on_change`]; pass it to
/// [`ViewState::remove_listener`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ViewState {
    transform: Transform,
    selection: Vec<ObjectId>,
    /// Provisional translation of the selection while a drag is in flight
    drag_offset: Option<Point>,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
}

impl fmt::Debug for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewState")
            .field("transform", &self.transform)
            .field("selection", &self.selection)
            .field("drag_offset", &self.drag_offset)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(&mut self, listener: impl FnMut(ViewChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was already removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: ViewChange) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }

    // ------------------------------------------------------------------------
    // Transform
    // ------------------------------------------------------------------------

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        if transform.scale <= 0.0 || !transform.scale.is_finite() {
            warn!(scale = transform.scale, "Ignoring transform with invalid scale");
            return;
        }
        if transform != self.transform {
            self.transform = transform;
            self.notify(ViewChange::Transform);
        }
    }

    /// Centres `page_rect` in the viewport at scale 1.
    pub fn reset_transform(&mut self, page_rect: &Rect) {
        let center = page_rect.center();
        let transform = Transform {
            translate: Point::new(-center.x, -center.y),
            scale: 1.0,
            ..self.transform
        };
        debug!(?page_rect, "View transform reset");
        self.set_transform(transform);
    }

    pub fn persisted(&self) -> PersistedViewState {
        PersistedViewState {
            transform: self.transform.persisted(),
        }
    }

    pub fn restore(&mut self, state: &PersistedViewState) -> CanvasResult<()> {
        let transform = self.transform.restored(&state.transform)?;
        self.set_transform(transform);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn selected_objects(&self) -> &[ObjectId] {
        &self.selection
    }

    pub fn is_object_selected(&self, id: ObjectId) -> bool {
        self.selection.contains(&id)
    }

    pub fn select_object(&mut self, id: ObjectId) {
        if !self.is_object_selected(id) {
            self.selection.push(id);
            self.notify(ViewChange::Selection);
        }
    }

    pub fn deselect_object(&mut self, id: ObjectId) {
        let before = self.selection.len();
        self.selection.retain(|selected| *selected != id);
        if self.selection.len() != before {
            self.notify(ViewChange::Selection);
        }
    }

    pub fn toggle_object(&mut self, id: ObjectId) {
        if self.is_object_selected(id) {
            self.deselect_object(id);
        } else {
            self.select_object(id);
        }
    }

    /// Replaces the selection.
    pub fn select_objects(&mut self, ids: &[ObjectId]) {
        let mut selection: Vec<ObjectId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !selection.contains(id) {
                selection.push(*id);
            }
        }
        if selection != self.selection {
            self.selection = selection;
            self.notify(ViewChange::Selection);
        }
    }

    pub fn deselect_all_objects(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.notify(ViewChange::Selection);
        }
    }

    /// Drops ids that no longer resolve, e.g. after undo.
    pub fn prune_selection(&mut self, doc: &Document) {
        let before = self.selection.len();
        self.selection.retain(|id| doc.object(*id).is_some());
        if self.selection.len() != before {
            self.notify(ViewChange::Selection);
        }
    }

    /// Page-space bounding box of the selection.
    pub fn selection_bounding_rect(&self, doc: &Document) -> Option<Rect> {
        let mut builder = BoundingRectBuilder::new();
        for rect in self.selection.iter().filter_map(|id| doc.absolute_rect(*id)) {
            builder.add_rect(&rect);
        }
        builder.rect()
    }

    /// Non-empty and nothing locked.
    pub fn is_selection_moveable(&self, doc: &Document) -> bool {
        !self.selection.is_empty()
            && self
                .selection
                .iter()
                .all(|id| doc.object(*id).is_some_and(|object| object.is_moveable()))
    }

    pub fn drag_offset(&self) -> Option<Point> {
        self.drag_offset
    }

    pub fn set_drag_offset(&mut self, offset: Option<Point>) {
        self.drag_offset = offset;
    }

    /// Nudges or aligns the moveable part of the selection as one undo step.
    ///
    /// Alignment variants need every selected object to share one parent.
    pub fn move_selection(&mut self, doc: &mut Document, direction: MoveDirection) -> CanvasResult<()> {
        let objects: Vec<(ObjectId, Option<ObjectId>, Rect)> = self
            .selection
            .iter()
            .filter_map(|id| doc.object(*id))
            .filter(|object| object.is_moveable())
            .map(|object| (object.id, object.parent, object.rect))
            .collect();

        let Some(first) = objects.first() else {
            return Ok(());
        };

        let mut builder = BoundingRectBuilder::new();
        for (_, _, rect) in &objects {
            builder.add_rect(rect);
        }
        let Some(bounds) = builder.rect() else {
            return Ok(());
        };

        let parent = first.1;
        let same_parent = objects.iter().all(|(_, p, _)| *p == parent);
        let parent_size = parent
            .and_then(|id| doc.object(id))
            .map(|object| (object.rect.width, object.rect.height));

        let delta = match (direction.step(), direction) {
            (Some(step), _) => Some(step),
            (None, _) if !same_parent => None,
            (None, MoveDirection::HomeX) => Some((-bounds.left, 0.0)),
            (None, MoveDirection::HomeY) => Some((0.0, -bounds.top)),
            (None, MoveDirection::EndX) => {
                parent_size.map(|(width, _)| (width - bounds.width - bounds.left, 0.0))
            }
            (None, MoveDirection::EndY) => {
                parent_size.map(|(_, height)| (0.0, height - bounds.height - bounds.top))
            }
            (None, _) => None,
        };

        let Some((dx, dy)) = delta else {
            debug!(?direction, "Selection move not applicable");
            return Ok(());
        };

        doc.begin_transaction();
        let result = objects
            .iter()
            .try_for_each(|(id, _, rect)| doc.update_rect(*id, rect.translate(dx, dy)));
        doc.end_transaction();
        result
    }
}
