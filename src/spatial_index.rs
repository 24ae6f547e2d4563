//! R-tree over absolute object rects, used by the hit tester.
//!
//! Each entry remembers its paint order so point queries can hand back the
//! topmost object first.

use rstar::{AABB, RTree, RTreeObject};

use crate::document::ObjectId;
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedObject {
    pub id: ObjectId,
    /// Paint order; higher is on top
    pub z: usize,
    /// Page-space bounds
    pub bounds: Rect,
}

impl IndexedObject {
    pub fn new(id: ObjectId, z: usize, bounds: Rect) -> Self {
        Self { id, z, bounds }
    }
}

fn aabb(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.left, rect.top], [rect.right(), rect.bottom()])
}

impl RTreeObject for IndexedObject {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        aabb(&self.bounds)
    }
}

#[derive(Default)]
pub struct ObjectIndex {
    rtree: RTree<IndexedObject>,
}

impl ObjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole index.
    pub fn rebuild(&mut self, objects: impl IntoIterator<Item = IndexedObject>) {
        self.rtree = RTree::bulk_load(objects.into_iter().collect());
    }

    /// Objects whose bounds contain `p`, topmost first.
    pub fn at_point(&self, p: Point) -> Vec<IndexedObject> {
        let mut found: Vec<IndexedObject> = self
            .rtree
            .locate_in_envelope_intersecting(&AABB::from_point([p.x, p.y]))
            .filter(|object| object.bounds.contains(p))
            .copied()
            .collect();
        found.sort_by(|a, b| b.z.cmp(&a.z));
        found
    }

    /// Objects touching `rect`, bottom to top.
    pub fn touching(&self, rect: &Rect) -> Vec<IndexedObject> {
        let mut found: Vec<IndexedObject> = self
            .rtree
            .locate_in_envelope_intersecting(&aabb(rect))
            .copied()
            .collect();
        found.sort_by_key(|object| object.z);
        found
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<IndexedObject> for ObjectIndex {
    fn from_iter<I: IntoIterator<Item = IndexedObject>>(iter: I) -> Self {
        let mut index = Self::new();
        index.rebuild(iter);
        index
    }
}
