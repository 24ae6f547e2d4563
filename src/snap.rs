//! Snap lines - alignment guides collected from the edges and centres of
//! objects that are not being moved.
//!
//! Guides live in page space. The tolerance is given in client pixels and is
//! divided by the current scale before comparing, so the visual snap distance
//! stays the same at every zoom level.

use tracing::trace;

use crate::constants::SNAP_TOLERANCE;
use crate::document::{DesignObject, Document, ObjectId};
use crate::geometry::{Point, Rect};
use crate::profile_scope;

/// A candidate guide plus every rect that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapLine {
    pub pos: f64,
    pub rects: Vec<Rect>,
}

/// Best match for a position: distance and the guide that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestLine {
    pub diff: f64,
    pub pos: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Constant y
    Horizontal,
    /// Constant x
    Vertical,
}

/// A guide currently aligned with the selection, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapGuide {
    pub orientation: Orientation,
    pub pos: f64,
    /// Page-space polyline along the guide, sorted along its axis
    pub points: Vec<Point>,
    pub sources: Vec<Rect>,
}

#[derive(Debug, Clone)]
pub struct SnapLines {
    /// Guides at constant y, sorted by position
    horizontal: Vec<SnapLine>,
    /// Guides at constant x, sorted by position
    vertical: Vec<SnapLine>,
    /// Client pixels
    tolerance: f64,
    pub enabled: bool,
}

impl Default for SnapLines {
    fn default() -> Self {
        Self::new(SNAP_TOLERANCE)
    }
}

fn add_line(lines: &mut Vec<SnapLine>, pos: f64, rect: Rect) {
    match lines.iter_mut().find(|line| line.pos == pos) {
        Some(line) => {
            if !line.rects.contains(&rect) {
                line.rects.push(rect);
            }
        }
        None => lines.push(SnapLine {
            pos,
            rects: vec![rect],
        }),
    }
}

fn closest(lines: &[SnapLine], pos: f64, tolerance: f64) -> Option<ClosestLine> {
    let mut best: Option<ClosestLine> = None;
    for line in lines {
        let diff = (pos - line.pos).abs();
        if diff < tolerance && best.is_none_or(|b| diff < b.diff) {
            best = Some(ClosestLine {
                diff,
                pos: line.pos,
            });
        }
    }
    best
}

impl SnapLines {
    pub fn new(tolerance: f64) -> Self {
        Self {
            horizontal: Vec::new(),
            vertical: Vec::new(),
            tolerance,
            enabled: false,
        }
    }

    /// Collects guides from every object `include` accepts.
    pub fn find(&mut self, doc: &Document, include: impl Fn(&DesignObject) -> bool) {
        profile_scope!("snap_lines_find");
        self.clear();

        for id in doc.draw_order() {
            let (Some(object), Some(rect)) = (doc.object(id), doc.absolute_rect(id)) else {
                continue;
            };
            if !include(object) {
                continue;
            }

            add_line(&mut self.vertical, rect.left, rect);
            add_line(&mut self.horizontal, rect.top, rect);
            if rect.width > 0.0 {
                add_line(&mut self.vertical, rect.left + rect.width / 2.0, rect);
                add_line(&mut self.vertical, rect.right(), rect);
            }
            if rect.height > 0.0 {
                add_line(&mut self.horizontal, rect.top + rect.height / 2.0, rect);
                add_line(&mut self.horizontal, rect.bottom(), rect);
            }
        }

        self.horizontal.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        self.vertical.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        trace!(
            horizontal = self.horizontal.len(),
            vertical = self.vertical.len(),
            "Snap lines collected"
        );
    }

    /// Collects guides from everything outside the given selection subtrees.
    pub fn find_excluding(&mut self, doc: &Document, selection: &[ObjectId]) {
        self.find(doc, |object| {
            !selection
                .iter()
                .any(|selected| *selected == object.id || doc.is_ancestor(*selected, object.id))
        });
    }

    pub fn clear(&mut self) {
        self.horizontal.clear();
        self.vertical.clear();
    }

    pub fn horizontal_lines(&self) -> &[SnapLine] {
        &self.horizontal
    }

    pub fn vertical_lines(&self) -> &[SnapLine] {
        &self.vertical
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Tolerance converted to page units.
    #[inline]
    pub fn page_tolerance(&self, scale: f64) -> f64 {
        if scale > 0.0 {
            self.tolerance / scale
        } else {
            self.tolerance
        }
    }

    pub fn closest_vertical(&self, x: f64, scale: f64) -> Option<ClosestLine> {
        closest(&self.vertical, x, self.page_tolerance(scale))
    }

    pub fn closest_horizontal(&self, y: f64, scale: f64) -> Option<ClosestLine> {
        closest(&self.horizontal, y, self.page_tolerance(scale))
    }

    fn snap_position(
        lines: &[SnapLine],
        pos: f64,
        offsets: [f64; 3],
        tolerance: f64,
    ) -> f64 {
        let mut best: Option<(ClosestLine, f64)> = None;
        for offset in offsets {
            if let Some(found) = closest(lines, pos + offset, tolerance) {
                if best.is_none_or(|(b, _)| found.diff < b.diff) {
                    best = Some((found, offset));
                }
            }
        }
        match best {
            Some((found, offset)) => (found.pos - offset).round(),
            None => pos,
        }
    }

    /// Snaps a rect's top-left so its nearest edge or centre lands on a guide.
    ///
    /// Each axis is handled independently. Returns the input unchanged when
    /// disabled or when nothing is within tolerance.
    pub fn drag_snap(&self, left: f64, top: f64, width: f64, height: f64, scale: f64) -> Point {
        if !self.enabled {
            return Point::new(left, top);
        }
        let tolerance = self.page_tolerance(scale);
        Point::new(
            Self::snap_position(&self.vertical, left, [0.0, width / 2.0, width], tolerance),
            Self::snap_position(&self.horizontal, top, [0.0, height / 2.0, height], tolerance),
        )
    }

    /// Snaps a single moving x edge.
    pub fn snap_x(&self, x: f64, scale: f64) -> f64 {
        if !self.enabled {
            return x;
        }
        self.closest_vertical(x, scale).map_or(x, |line| line.pos)
    }

    /// Snaps a single moving y edge.
    pub fn snap_y(&self, y: f64, scale: f64) -> f64 {
        if !self.enabled {
            return y;
        }
        self.closest_horizontal(y, scale).map_or(y, |line| line.pos)
    }

    /// Guides aligned with an edge or the centre of `selection`.
    ///
    /// Edges must match exactly, the centre within one unit. Empty while
    /// snapping is disabled.
    pub fn guides(&self, selection: &Rect) -> Vec<SnapGuide> {
        if !self.enabled {
            return Vec::new();
        }

        let mut guides = Vec::new();

        let center_y = selection.top + selection.height / 2.0;
        for line in &self.horizontal {
            let on_edge = line.pos == selection.top || line.pos == selection.bottom();
            if !on_edge && (line.pos - center_y).abs() >= 1.0 {
                continue;
            }
            let mut points = if on_edge {
                vec![
                    Point::new(selection.left, line.pos),
                    Point::new(selection.right(), line.pos),
                ]
            } else {
                vec![Point::new(selection.left + (selection.width / 2.0).round(), line.pos)]
            };
            for rect in &line.rects {
                points.push(Point::new(rect.left, line.pos));
                points.push(Point::new(rect.right(), line.pos));
            }
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
            guides.push(SnapGuide {
                orientation: Orientation::Horizontal,
                pos: line.pos,
                points,
                sources: line.rects.clone(),
            });
        }

        let center_x = selection.left + selection.width / 2.0;
        for line in &self.vertical {
            let on_edge = line.pos == selection.left || line.pos == selection.right();
            if !on_edge && (line.pos - center_x).abs() >= 1.0 {
                continue;
            }
            let mut points = if on_edge {
                vec![
                    Point::new(line.pos, selection.top),
                    Point::new(line.pos, selection.bottom()),
                ]
            } else {
                vec![Point::new(line.pos, selection.top + (selection.height / 2.0).round())]
            };
            for rect in &line.rects {
                points.push(Point::new(line.pos, rect.top));
                points.push(Point::new(line.pos, rect.bottom()));
            }
            points.sort_by(|a, b| a.y.total_cmp(&b.y));
            guides.push(SnapGuide {
                orientation: Orientation::Vertical,
                pos: line.pos,
                points,
                sources: line.rects.clone(),
            });
        }

        guides
    }
}
