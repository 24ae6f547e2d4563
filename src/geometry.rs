//! Plain 2D geometry shared by every coordinate space.
//!
//! `Point` and `Rect` carry no space tag; callers convert between client,
//! offset and page space only through [`crate::transform::Transform`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point::new(0.0, 0.0);

    #[inline]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Length of the vector from the origin to this point
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.sub(other).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect spanned by two corner points in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// True when the two rects share any area or touch along an edge
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    pub fn round(&self) -> Rect {
        Rect::new(
            self.left.round(),
            self.top.round(),
            self.width.round(),
            self.height.round(),
        )
    }
}

/// Accumulates points and rects into their common bounding box.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundingRectBuilder {
    min: Option<Point>,
    max: Option<Point>,
}

impl BoundingRectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, p: Point) {
        self.min = Some(match self.min {
            Some(min) => Point::new(min.x.min(p.x), min.y.min(p.y)),
            None => p,
        });
        self.max = Some(match self.max {
            Some(max) => Point::new(max.x.max(p.x), max.y.max(p.y)),
            None => p,
        });
    }

    pub fn add_rect(&mut self, rect: &Rect) {
        self.add_point(rect.top_left());
        self.add_point(Point::new(rect.right(), rect.bottom()));
    }

    /// `None` when nothing was added.
    pub fn rect(&self) -> Option<Rect> {
        let (min, max) = (self.min?, self.max?);
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}
