//! Spatial index for pointer target resolution.
//!
//! R-tree over element bounds, giving O(log n) point queries. Target
//! resolution ("which element does this pointer logically address")
//! happens here once per raw event, upstream of every processor. Entries
//! are kept in canvas-local space, so panning the canvas never dirties
//! the index.

use crate::element::ElementId;
use crate::geometry::Point;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry representing one element's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub id: ElementId,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(id: ElementId, position: Point, size: (f32, f32)) -> Self {
        Self {
            id,
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + size.0,
            max_y: position.y + size.1,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// R-tree backed hit tester for shapes and paths.
pub struct HitTester {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ElementId, SpatialEntry>,
}

impl HitTester {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: ElementId, position: Point, size: (f32, f32)) {
        if let Some(old) = self.entries.remove(&id) {
            self.tree.remove(&old);
        }
        let entry = SpatialEntry::new(id, position, size);
        self.tree.insert(entry);
        self.entries.insert(id, entry);
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        if let Some(entry) = self.entries.remove(&id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn update(&mut self, id: ElementId, position: Point, size: (f32, f32)) {
        self.insert(id, position, size);
    }

    /// All elements whose bounds contain the point, in no particular order.
    pub fn query_point(&self, p: Point) -> Vec<ElementId> {
        let envelope = AABB::from_point([p.x, p.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(p.x, p.y))
            .map(|entry| entry.id)
            .collect()
    }

    /// Topmost element under the point. Ids are handed out monotonically,
    /// so the highest id is the most recently added, i.e. frontmost.
    pub fn topmost_at(&self, p: Point) -> Option<ElementId> {
        self.query_point(p).into_iter().max()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new()
    }
}
