//! Connection gestures: drawing a new line from a port and re-routing the
//! lines attached to a port.

use tracing::{debug, warn};

use crate::canvas::EditorContext;
use crate::document::{ConnectionLine, Document, ObjectId, PortDirection};
use crate::geometry::Point;
use crate::overlay::{ConnectionPreview, Overlay};
use crate::transform::Transform;

use super::state::Tracking;

/// A named port on a specific object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
    pub object: ObjectId,
    pub port: String,
}

impl PortRef {
    pub fn new(object: ObjectId, port: impl Into<String>) -> Self {
        Self {
            object,
            port: port.into(),
        }
    }

    fn position(&self, doc: &Document, direction: PortDirection) -> Option<Point> {
        doc.port_position(self.object, direction, &self.port)
    }
}

/// Connection dropped on empty canvas far enough from its anchor. The host
/// decides what to create there.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTargetRequest {
    pub anchor: PortRef,
    /// Side of the line `anchor` is on
    pub direction: PortDirection,
    pub page_point: Point,
}

fn opposite(direction: PortDirection) -> PortDirection {
    match direction {
        PortDirection::Input => PortDirection::Output,
        PortDirection::Output => PortDirection::Input,
    }
}

/// Draws a new connection line from `anchor`.
///
/// Starting on an output looks for a free input under the pointer and the
/// other way round.
pub struct ConnectState {
    /// Side of the line the gesture started on
    direction: PortDirection,
    anchor: PortRef,
    anchor_point: Point,
    /// Page position of the free end
    pointer: Point,
    candidate: Option<PortRef>,
    distance: f64,
    new_target: Option<NewTargetRequest>,
    open: bool,
}

impl ConnectState {
    pub fn starting_at_output(source: PortRef) -> Self {
        Self::new(PortDirection::Output, source)
    }

    pub fn starting_at_input(target: PortRef) -> Self {
        Self::new(PortDirection::Input, target)
    }

    fn new(direction: PortDirection, anchor: PortRef) -> Self {
        Self {
            direction,
            anchor,
            anchor_point: Point::ZERO,
            pointer: Point::ZERO,
            candidate: None,
            distance: 0.0,
            new_target: None,
            open: false,
        }
    }

    pub fn from_output(&self) -> bool {
        self.direction == PortDirection::Output
    }

    pub fn candidate(&self) -> Option<&PortRef> {
        self.candidate.as_ref()
    }

    pub fn new_target_request(&self) -> Option<&NewTargetRequest> {
        self.new_target.as_ref()
    }

    pub(super) fn down(&mut self, ctx: &mut EditorContext, tracking: &Tracking) {
        ctx.document.begin_transaction();
        self.open = true;

        self.anchor_point = self
            .anchor
            .position(&ctx.document, self.direction)
            .unwrap_or(tracking.page_at_down);
        self.pointer = tracking.page_at_down;
        self.candidate = None;
        self.distance = 0.0;
        self.new_target = None;
    }

    /// `(source, output, target, input)` for a candidate on the other side.
    fn line_to<'a>(&'a self, other: &'a PortRef) -> (ObjectId, &'a str, ObjectId, &'a str) {
        match self.direction {
            PortDirection::Output => (self.anchor.object, &self.anchor.port, other.object, &other.port),
            PortDirection::Input => (other.object, &other.port, self.anchor.object, &self.anchor.port),
        }
    }

    pub(super) fn move_to(&mut self, ctx: &mut EditorContext, tracking: &Tracking) {
        self.pointer = tracking.last_page;
        self.distance = tracking.distance;

        let hit = ctx.hits.object_from_point(&ctx.document, self.pointer);
        let port = hit.and_then(|hit| {
            let name = match self.direction {
                PortDirection::Output => hit.connection_input,
                PortDirection::Input => hit.connection_output,
            }?;
            Some(PortRef::new(hit.id, name))
        });

        self.candidate = port.filter(|other| {
            let (source, output, target, input) = self.line_to(other);
            !ctx.document.connection_exists(source, output, target, input)
        });
    }

    pub(super) fn up(&mut self, ctx: &mut EditorContext, cancel: bool) {
        if !cancel {
            if let Some(other) = self.candidate.take() {
                let (source, output, target, input) = self.line_to(&other);
                match ctx.document.connect(source, output, target, input) {
                    Ok(true) => {}
                    Ok(false) => debug!(%source, output, %target, input, "Duplicate connection skipped"),
                    Err(err) => warn!(error = %err, "Connection failed"),
                }
            } else if self.distance >= ctx.config.new_connection_min_distance {
                self.new_target = Some(NewTargetRequest {
                    anchor: self.anchor.clone(),
                    direction: self.direction,
                    page_point: self.pointer,
                });
            }
        }

        if self.open {
            ctx.document.end_transaction();
            self.open = false;
        }
    }

    pub(super) fn overlay(&self, ctx: &EditorContext, transform: &Transform) -> Overlay {
        let doc = &ctx.document;
        let other_point = self
            .candidate
            .as_ref()
            .and_then(|other| other.position(doc, opposite(self.direction)))
            .unwrap_or(self.pointer);
        let anchor_rect = doc.absolute_rect(self.anchor.object);
        let other_rect = self
            .candidate
            .as_ref()
            .and_then(|other| doc.absolute_rect(other.object));

        let (start, end, source_rect, target_rect) = match self.direction {
            PortDirection::Output => (self.anchor_point, other_point, anchor_rect, other_rect),
            PortDirection::Input => (other_point, self.anchor_point, other_rect, anchor_rect),
        };

        Overlay::Connection(ConnectionPreview {
            start: transform.page_to_offset_point(start),
            end: transform.page_to_offset_point(end),
            source_rect: source_rect.map(|r| transform.page_to_offset_rect(r)),
            target_rect: target_rect.map(|r| transform.page_to_offset_rect(r)),
            connected: self.candidate.is_some(),
        })
    }
}

/// Moves every line attached to `anchor` to another port of the same kind.
///
/// Lines that would duplicate an existing connection are deleted instead.
pub struct RerouteState {
    /// Which end of the lines moves
    direction: PortDirection,
    anchor: PortRef,
    lines: Vec<ConnectionLine>,
    pointer: Point,
    replacement: Option<PortRef>,
    open: bool,
}

impl RerouteState {
    pub fn outputs(source: PortRef) -> Self {
        Self::new(PortDirection::Output, source)
    }

    pub fn inputs(target: PortRef) -> Self {
        Self::new(PortDirection::Input, target)
    }

    fn new(direction: PortDirection, anchor: PortRef) -> Self {
        Self {
            direction,
            anchor,
            lines: Vec::new(),
            pointer: Point::ZERO,
            replacement: None,
            open: false,
        }
    }

    pub fn moves_output(&self) -> bool {
        self.direction == PortDirection::Output
    }

    pub fn lines(&self) -> &[ConnectionLine] {
        &self.lines
    }

    pub(super) fn down(&mut self, ctx: &mut EditorContext, tracking: &Tracking) {
        ctx.document.begin_transaction();
        self.open = true;

        self.lines = ctx
            .document
            .connections_at(self.anchor.object, self.direction, &self.anchor.port);
        self.pointer = tracking.page_at_down;
        self.replacement = None;
    }

    pub(super) fn move_to(&mut self, ctx: &mut EditorContext, tracking: &Tracking) {
        self.pointer = tracking.last_page;

        let hit = ctx.hits.object_from_point(&ctx.document, self.pointer);
        self.replacement = hit.and_then(|hit| {
            let name = match self.direction {
                PortDirection::Output => hit.connection_output,
                PortDirection::Input => hit.connection_input,
            }?;
            let port = PortRef::new(hit.id, name);
            (port != self.anchor).then_some(port)
        });
    }

    pub(super) fn up(&mut self, ctx: &mut EditorContext, cancel: bool) {
        if !cancel {
            if let Some(replacement) = self.replacement.take() {
                if !self.lines.is_empty() {
                    self.apply(ctx, &replacement);
                }
                ctx.view.deselect_all_objects();
            }
        }

        if self.open {
            ctx.document.end_transaction();
            self.open = false;
        }
    }

    fn apply(&self, ctx: &mut EditorContext, replacement: &PortRef) {
        let doc = &mut ctx.document;
        doc.begin_transaction();

        let mut moved = 0usize;
        let mut removed = 0usize;
        for line in &self.lines {
            let Some((source, target)) = doc.line_endpoints(line) else {
                continue;
            };
            let duplicate = match self.direction {
                PortDirection::Output => {
                    doc.connection_exists(replacement.object, &replacement.port, target, &line.input)
                }
                PortDirection::Input => {
                    doc.connection_exists(source, &line.output, replacement.object, &replacement.port)
                }
            };

            if duplicate {
                if doc.delete_connection(line) {
                    removed += 1;
                }
            } else {
                match doc.reroute_connection(line, self.direction, replacement.object, &replacement.port) {
                    Ok(true) => moved += 1,
                    Ok(false) => {}
                    Err(err) => warn!(error = %err, "Reroute failed"),
                }
            }
        }

        doc.end_transaction();
        debug!(moved, removed, to = %replacement.object, port = %replacement.port, "Connection lines rerouted");
    }

    pub(super) fn overlay(&self, ctx: &EditorContext, transform: &Transform) -> Overlay {
        let doc = &ctx.document;
        let moving_point = self
            .replacement
            .as_ref()
            .and_then(|port| port.position(doc, self.direction))
            .unwrap_or(self.pointer);
        let moving_rect = self
            .replacement
            .as_ref()
            .and_then(|port| doc.absolute_rect(port.object));

        let previews = self
            .lines
            .iter()
            .filter_map(|line| {
                let (source, target) = doc.line_endpoints(line)?;
                let (start, end, source_rect, target_rect) = match self.direction {
                    PortDirection::Output => (
                        moving_point,
                        doc.port_position(target, PortDirection::Input, &line.input)?,
                        moving_rect,
                        doc.absolute_rect(target),
                    ),
                    PortDirection::Input => (
                        doc.port_position(source, PortDirection::Output, &line.output)?,
                        moving_point,
                        doc.absolute_rect(source),
                        moving_rect,
                    ),
                };
                Some(ConnectionPreview {
                    start: transform.page_to_offset_point(start),
                    end: transform.page_to_offset_point(end),
                    source_rect: source_rect.map(|r| transform.page_to_offset_rect(r)),
                    target_rect: target_rect.map(|r| transform.page_to_offset_rect(r)),
                    connected: self.replacement.is_some(),
                })
            })
            .collect();

        Overlay::Reroute(previews)
    }
}
