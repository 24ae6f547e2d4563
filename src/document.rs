//! Document model - design objects, connection lines and undo history.
//!
//! Objects form a tree (one parent each) and store their rect relative to the
//! parent. Connection lines address their endpoints by wire id + port name so
//! they survive renames and re-parenting.
//!
//! ## Undo
//!
//! History is snapshot based. Every mutation records the state before it,
//! unless a transaction is open: then only the first mutation inside the
//! transaction records, so a whole gesture becomes one undo step.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Rect};

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable connection endpoint address, assigned on first use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireId(pub String);

impl WireId {
    pub fn generate() -> Self {
        WireId(uuid::Uuid::new_v4().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Page,
    Container,
    Widget,
    Action,
}

/// A named connection anchor, positioned relative to its object's top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub position: Point,
}

impl Port {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            position: Point::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignObject {
    pub id: ObjectId,
    pub parent: Option<ObjectId>,
    pub kind: ObjectKind,
    /// Parent-relative rect in page units
    pub rect: Rect,
    pub wire_id: Option<WireId>,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub locked: bool,
    pub selectable: bool,
}

impl DesignObject {
    pub fn is_moveable(&self) -> bool {
        !self.locked
    }

    pub fn port(&self, direction: PortDirection, name: &str) -> Option<&Port> {
        let ports = match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        };
        ports.iter().find(|port| port.name == name)
    }
}

/// Everything needed to materialize a new object except its id and parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTemplate {
    pub kind: ObjectKind,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub inputs: Vec<Port>,
    #[serde(default)]
    pub outputs: Vec<Port>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_selectable")]
    pub selectable: bool,
}

fn default_selectable() -> bool {
    true
}

impl ObjectTemplate {
    pub fn new(kind: ObjectKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            inputs: Vec::new(),
            outputs: Vec::new(),
            locked: false,
            selectable: true,
        }
    }

    pub fn with_input(mut self, port: Port) -> Self {
        self.inputs.push(port);
        self
    }

    pub fn with_output(mut self, port: Port) -> Self {
        self.outputs.push(port);
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn unselectable(mut self) -> Self {
        self.selectable = false;
        self
    }
}

/// Directed edge `source/output -> target/input`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionLine {
    pub source: WireId,
    pub output: String,
    pub target: WireId,
    pub input: String,
}

#[derive(Debug, Clone, Default)]
struct Snapshot {
    objects: Vec<DesignObject>,
    lines: Vec<ConnectionLine>,
    next_id: u64,
}

/// Snapshot history with a nestable combine bracket.
#[derive(Debug, Default)]
pub struct UndoManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    combine_depth: usize,
    combined_recorded: bool,
}

impl UndoManager {
    /// Only the first mutation inside a transaction records.
    fn should_record(&mut self) -> bool {
        if self.combine_depth > 0 {
            if self.combined_recorded {
                return false;
            }
            self.combined_recorded = true;
        }
        true
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_HISTORY_STATES {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    pub fn in_transaction(&self) -> bool {
        self.combine_depth > 0
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Document {
    objects: Vec<DesignObject>,
    lines: Vec<ConnectionLine>,
    next_id: u64,
    revision: u64,
    undo: UndoManager,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Bumped on every change; caches compare against it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn objects(&self) -> &[DesignObject] {
        &self.objects
    }

    pub fn connection_lines(&self) -> &[ConnectionLine] {
        &self.lines
    }

    pub fn object(&self, id: ObjectId) -> Option<&DesignObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut DesignObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    fn require(&self, id: ObjectId) -> CanvasResult<&DesignObject> {
        self.object(id).ok_or(CanvasError::UnknownObject(id))
    }

    pub fn object_by_wire_id(&self, wire_id: &WireId) -> Option<&DesignObject> {
        self.objects
            .iter()
            .find(|object| object.wire_id.as_ref() == Some(wire_id))
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.object(id).and_then(|object| object.parent)
    }

    pub fn children(&self, parent: Option<ObjectId>) -> impl Iterator<Item = &DesignObject> {
        self.objects.iter().filter(move |object| object.parent == parent)
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Objects in paint order: parents before children, siblings in insertion order.
    /// Later entries are drawn on top.
    pub fn draw_order(&self) -> Vec<ObjectId> {
        fn visit(doc: &Document, parent: Option<ObjectId>, out: &mut Vec<ObjectId>) {
            for child in doc.children(parent) {
                out.push(child.id);
                visit(doc, Some(child.id), out);
            }
        }

        let mut out = Vec::with_capacity(self.objects.len());
        visit(self, None, &mut out);
        out
    }

    /// Rect in page space, accumulating parent offsets.
    pub fn absolute_rect(&self, id: ObjectId) -> Option<Rect> {
        let object = self.object(id)?;
        let mut rect = object.rect;
        let mut current = object.parent;
        while let Some(parent_id) = current {
            let parent = self.object(parent_id)?;
            rect = rect.translate(parent.rect.left, parent.rect.top);
            current = parent.parent;
        }
        Some(rect)
    }

    /// Page-space offset of the parent's origin.
    pub fn parent_origin(&self, id: ObjectId) -> Point {
        self.parent(id)
            .and_then(|parent| self.absolute_rect(parent))
            .map(|rect| rect.top_left())
            .unwrap_or(Point::ZERO)
    }

    /// Page-space anchor of a port.
    pub fn port_position(&self, id: ObjectId, direction: PortDirection, name: &str) -> Option<Point> {
        let rect = self.absolute_rect(id)?;
        let port = self.object(id)?.port(direction, name)?;
        Some(rect.top_left().add(port.position))
    }

    // ------------------------------------------------------------------------
    // Undo transactions
    // ------------------------------------------------------------------------

    pub fn begin_transaction(&mut self) {
        if self.undo.combine_depth == 0 {
            self.undo.combined_recorded = false;
            trace!("Undo transaction opened");
        }
        self.undo.combine_depth += 1;
    }

    pub fn end_transaction(&mut self) {
        if self.undo.combine_depth == 0 {
            return;
        }
        self.undo.combine_depth -= 1;
        if self.undo.combine_depth == 0 {
            trace!(recorded = self.undo.combined_recorded, "Undo transaction closed");
        }
    }

    /// `true` opens a combined undo step, `false` closes it.
    pub fn set_combine_commands(&mut self, combine: bool) {
        if combine {
            self.begin_transaction();
        } else {
            self.end_transaction();
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.undo.in_transaction()
    }

    /// Closes every open transaction level.
    pub fn close_transactions(&mut self) {
        while self.undo.in_transaction() {
            self.end_transaction();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            objects: self.objects.clone(),
            lines: self.lines.clone(),
            next_id: self.next_id,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.objects = snapshot.objects;
        self.lines = snapshot.lines;
        self.next_id = snapshot.next_id;
        self.revision += 1;
    }

    fn will_mutate(&mut self) {
        if self.undo.should_record() {
            let snapshot = self.snapshot();
            self.undo.push(snapshot);
        }
        self.revision += 1;
    }

    /// Forgets all undo/redo states, e.g. after loading a document.
    pub fn clear_history(&mut self) {
        self.undo.undo_stack.clear();
        self.undo.redo_stack.clear();
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.undo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo.redo_stack.push(current);
        self.restore(previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.undo.redo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo.undo_stack.push(current);
        self.restore(next);
        true
    }

    // ------------------------------------------------------------------------
    // Object mutations
    // ------------------------------------------------------------------------

    pub fn add_object(
        &mut self,
        parent: Option<ObjectId>,
        template: &ObjectTemplate,
        left: f64,
        top: f64,
    ) -> CanvasResult<ObjectId> {
        if let Some(parent) = parent {
            self.require(parent)?;
        }

        self.will_mutate();

        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.push(DesignObject {
            id,
            parent,
            kind: template.kind,
            rect: Rect::new(left, top, template.width, template.height),
            wire_id: None,
            inputs: template.inputs.clone(),
            outputs: template.outputs.clone(),
            locked: template.locked,
            selectable: template.selectable,
        });

        debug!(%id, ?parent, "Object added");
        Ok(id)
    }

    /// Writes a parent-relative rect. Equal rects do not touch history.
    pub fn update_rect(&mut self, id: ObjectId, rect: Rect) -> CanvasResult<()> {
        if self.require(id)?.rect == rect {
            return Ok(());
        }
        self.will_mutate();
        if let Some(object) = self.object_mut(id) {
            object.rect = rect;
        }
        Ok(())
    }

    /// Removes the object, its subtree and every line touching them.
    pub fn delete_object(&mut self, id: ObjectId) -> CanvasResult<()> {
        self.require(id)?;
        self.will_mutate();

        let doomed: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|object| object.id == id || self.is_ancestor(id, object.id))
            .map(|object| object.id)
            .collect();

        let doomed_wires: Vec<WireId> = self
            .objects
            .iter()
            .filter(|object| doomed.contains(&object.id))
            .filter_map(|object| object.wire_id.clone())
            .collect();

        self.objects.retain(|object| !doomed.contains(&object.id));
        self.lines.retain(|line| {
            !doomed_wires.contains(&line.source) && !doomed_wires.contains(&line.target)
        });

        debug!(%id, removed = doomed.len(), "Object deleted");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------------

    pub fn connection_exists(
        &self,
        source: ObjectId,
        output: &str,
        target: ObjectId,
        input: &str,
    ) -> bool {
        let (Some(source_wire), Some(target_wire)) = (
            self.object(source).and_then(|o| o.wire_id.as_ref()),
            self.object(target).and_then(|o| o.wire_id.as_ref()),
        ) else {
            return false;
        };

        self.lines.iter().any(|line| {
            &line.source == source_wire
                && line.output == output
                && &line.target == target_wire
                && line.input == input
        })
    }

    fn ensure_wire_id(&mut self, id: ObjectId) -> CanvasResult<WireId> {
        if let Some(wire_id) = self.require(id)?.wire_id.clone() {
            return Ok(wire_id);
        }
        self.will_mutate();
        let wire_id = WireId::generate();
        if let Some(object) = self.object_mut(id) {
            object.wire_id = Some(wire_id.clone());
        }
        Ok(wire_id)
    }

    /// Adds `source/output -> target/input`, assigning wire ids on demand.
    ///
    /// Returns `Ok(false)` without touching history when the line already exists.
    pub fn connect(
        &mut self,
        source: ObjectId,
        output: &str,
        target: ObjectId,
        input: &str,
    ) -> CanvasResult<bool> {
        if self.require(source)?.port(PortDirection::Output, output).is_none() {
            return Err(CanvasError::UnknownPort {
                object: source,
                port: output.to_string(),
            });
        }
        if self.require(target)?.port(PortDirection::Input, input).is_none() {
            return Err(CanvasError::UnknownPort {
                object: target,
                port: input.to_string(),
            });
        }

        if self.connection_exists(source, output, target, input) {
            debug!(%source, output, %target, input, "Connection already exists, skipped");
            return Ok(false);
        }

        self.begin_transaction();
        let result = self.ensure_wire_id(source).and_then(|source_wire| {
            let target_wire = self.ensure_wire_id(target)?;
            self.will_mutate();
            self.lines.push(ConnectionLine {
                source: source_wire,
                output: output.to_string(),
                target: target_wire,
                input: input.to_string(),
            });
            Ok(true)
        });
        self.end_transaction();

        if result.is_ok() {
            debug!(%source, output, %target, input, "Connected");
        }
        result
    }

    /// Lines leaving (`Output`) or entering (`Input`) the given port.
    pub fn connections_at(
        &self,
        id: ObjectId,
        direction: PortDirection,
        port: &str,
    ) -> Vec<ConnectionLine> {
        let Some(wire_id) = self.object(id).and_then(|o| o.wire_id.as_ref()) else {
            return Vec::new();
        };
        self.lines
            .iter()
            .filter(|line| match direction {
                PortDirection::Output => &line.source == wire_id && line.output == port,
                PortDirection::Input => &line.target == wire_id && line.input == port,
            })
            .cloned()
            .collect()
    }

    pub fn delete_connection(&mut self, line: &ConnectionLine) -> bool {
        if !self.lines.contains(line) {
            return false;
        }
        self.will_mutate();
        self.lines.retain(|existing| existing != line);
        true
    }

    /// Re-attaches one end of `line` to another object's port.
    pub fn reroute_connection(
        &mut self,
        line: &ConnectionLine,
        direction: PortDirection,
        object: ObjectId,
        port: &str,
    ) -> CanvasResult<bool> {
        if self.require(object)?.port(direction, port).is_none() {
            return Err(CanvasError::UnknownPort {
                object,
                port: port.to_string(),
            });
        }
        let Some(index) = self.lines.iter().position(|existing| existing == line) else {
            return Ok(false);
        };

        self.begin_transaction();
        let result = self.ensure_wire_id(object).map(|wire_id| {
            self.will_mutate();
            let line = &mut self.lines[index];
            match direction {
                PortDirection::Output => {
                    line.source = wire_id;
                    line.output = port.to_string();
                }
                PortDirection::Input => {
                    line.target = wire_id;
                    line.input = port.to_string();
                }
            }
            true
        });
        self.end_transaction();
        result
    }

    /// Object ids behind a line's endpoints, if both resolve.
    pub fn line_endpoints(&self, line: &ConnectionLine) -> Option<(ObjectId, ObjectId)> {
        let source = self.object_by_wire_id(&line.source)?.id;
        let target = self.object_by_wire_id(&line.target)?.id;
        Some((source, target))
    }

    /// Lines whose endpoints or ports no longer resolve.
    pub fn dangling_connections(&self) -> Vec<&ConnectionLine> {
        self.lines
            .iter()
            .filter(|line| {
                let source_ok = self
                    .object_by_wire_id(&line.source)
                    .is_some_and(|o| o.port(PortDirection::Output, &line.output).is_some());
                let target_ok = self
                    .object_by_wire_id(&line.target)
                    .is_some_and(|o| o.port(PortDirection::Input, &line.input).is_some());
                !(source_ok && target_ok)
            })
            .collect()
    }
}
