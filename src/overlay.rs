//! Visual feedback produced by the canvas, in offset space.
//!
//! The host draws these on top of the design surface; nothing here knows how.

use crate::geometry::{Point, Rect};
use crate::snap::{Orientation, SnapGuide};
use crate::transform::Transform;

#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub orientation: Orientation,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPreview {
    /// Output side of the line
    pub start: Point,
    /// Input side of the line
    pub end: Point,
    pub source_rect: Option<Rect>,
    pub target_rect: Option<Rect>,
    /// Both ends sit on ports
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    RubberBand(Rect),
    Connection(ConnectionPreview),
    Reroute(Vec<ConnectionPreview>),
    SnapGuides {
        lines: Vec<GuideLine>,
        /// Rects that produced the guides
        rects: Vec<Rect>,
    },
    ResizeHandles(Vec<Rect>),
    /// Provisional object during drag-and-drop
    DropTarget(Rect),
}

impl Overlay {
    /// Converts page-space guides; `None` when there is nothing to draw.
    pub fn snap_guides(guides: &[SnapGuide], transform: &Transform) -> Option<Overlay> {
        if guides.is_empty() {
            return None;
        }

        let lines = guides
            .iter()
            .map(|guide| GuideLine {
                orientation: guide.orientation,
                points: guide
                    .points
                    .iter()
                    .map(|p| transform.page_to_offset_point(*p))
                    .collect(),
            })
            .collect();

        let mut rects: Vec<Rect> = Vec::new();
        for rect in guides.iter().flat_map(|guide| guide.sources.iter()) {
            let rect = transform.page_to_offset_rect(*rect);
            if !rects.contains(&rect) {
                rects.push(rect);
            }
        }

        Some(Overlay::SnapGuides { lines, rects })
    }
}
