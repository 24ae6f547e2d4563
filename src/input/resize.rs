//! Resize handles around a single selected object.
//!
//! Handles sit at 0 / 50 / 100 % of the object's rect along each axis and are
//! hit-tested in offset space so they keep their size at every zoom level.

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::West,
        ResizeHandle::East,
        ResizeHandle::SouthWest,
        ResizeHandle::South,
        ResizeHandle::SouthEast,
    ];

    /// Position as fractions of the rect's width and height
    fn anchor(self) -> (f64, f64) {
        match self {
            ResizeHandle::NorthWest => (0.0, 0.0),
            ResizeHandle::North => (0.5, 0.0),
            ResizeHandle::NorthEast => (1.0, 0.0),
            ResizeHandle::West => (0.0, 0.5),
            ResizeHandle::East => (1.0, 0.5),
            ResizeHandle::SouthWest => (0.0, 1.0),
            ResizeHandle::South => (0.5, 1.0),
            ResizeHandle::SouthEast => (1.0, 1.0),
        }
    }

    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::NorthWest => "nw-resize",
            ResizeHandle::North => "n-resize",
            ResizeHandle::NorthEast => "ne-resize",
            ResizeHandle::West => "w-resize",
            ResizeHandle::East => "e-resize",
            ResizeHandle::SouthWest => "sw-resize",
            ResizeHandle::South => "s-resize",
            ResizeHandle::SouthEast => "se-resize",
        }
    }

    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::NorthWest | ResizeHandle::North | ResizeHandle::NorthEast)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::SouthWest | ResizeHandle::South | ResizeHandle::SouthEast)
    }

    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::NorthWest | ResizeHandle::West | ResizeHandle::SouthWest)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::NorthEast | ResizeHandle::East | ResizeHandle::SouthEast)
    }

    /// Square of side `size` centred on the handle's anchor.
    pub fn rect(self, target: &Rect, size: f64) -> Rect {
        let (fx, fy) = self.anchor();
        let center = Point::new(target.left + target.width * fx, target.top + target.height * fy);
        Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }
}

/// Handle rects for `target`, both in offset space.
pub fn resize_handles(target: &Rect, size: f64) -> Vec<(ResizeHandle, Rect)> {
    ResizeHandle::ALL
        .iter()
        .map(|handle| (*handle, handle.rect(target, size)))
        .collect()
}

/// Handle under `point`; later handles win where they overlap.
pub fn handle_at(target: &Rect, point: Point, size: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .iter()
        .rev()
        .copied()
        .find(|handle| handle.rect(target, size).contains(point))
}

/// Applies a page-space pointer delta to `saved`, keeping at least one unit
/// of width and height. `snap_x`/`snap_y` adjust each moving edge.
pub fn resize_rect(
    handle: ResizeHandle,
    saved: &Rect,
    delta: Point,
    snap_x: impl Fn(f64) -> f64,
    snap_y: impl Fn(f64) -> f64,
) -> Rect {
    let mut rect = *saved;

    if handle.moves_top() {
        let bottom = rect.bottom();
        rect.top = snap_y(saved.top + delta.y);
        if rect.top >= bottom {
            rect.top = bottom - 1.0;
        }
        rect.height = bottom - rect.top;
    } else if handle.moves_bottom() {
        let mut bottom = snap_y(saved.bottom() + delta.y);
        if bottom <= rect.top {
            bottom = rect.top + 1.0;
        }
        rect.height = bottom - rect.top;
    }

    if handle.moves_left() {
        let right = rect.right();
        rect.left = snap_x(saved.left + delta.x);
        if rect.left >= right {
            rect.left = right - 1.0;
        }
        rect.width = right - rect.left;
    } else if handle.moves_right() {
        let mut right = snap_x(saved.right() + delta.x);
        if right <= rect.left {
            right = rect.left + 1.0;
        }
        rect.width = right - rect.left;
    }

    rect
}
