//! Uniform grid broad phase
//!
//! Space is cut into square boxes of side `box_size`. A shape occupies every
//! box its bounds overlap, and the index keeps both directions of that
//! mapping: box -> shapes for candidate lookup, and shape -> boxes so a
//! shape can be moved or removed without rescanning the grid.
//!
//! Box coordinates on each axis run from `ceil(min / box_size)` to
//! `ceil(max / box_size)` inclusive. Both bounds use `ceil`; stored grids and
//! movement outcomes depend on this exact footprint.

use crate::foundation::collections::ShapeHandle;
use crate::physics::collision::Shape;
use std::collections::{HashMap, HashSet};

/// Integer coordinate of one grid box
pub type BoxCoord = (i32, i32);

/// Grid of boxes mapping to the shapes that overlap them
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialIndex {
    box_size: f32,
    box_to_shapes: HashMap<BoxCoord, HashSet<ShapeHandle>>,
    shape_boxes: HashMap<ShapeHandle, HashSet<BoxCoord>>,
}

#[allow(clippy::cast_possible_truncation)]
fn box_range(min: f32, max: f32, box_size: f32) -> std::ops::RangeInclusive<i32> {
    // Saturating casts turn the empty-group bounds (+inf, -inf) into an empty range
    let first = (min / box_size).ceil() as i32;
    let last = (max / box_size).ceil() as i32;
    first..=last
}

impl SpatialIndex {
    /// Create an empty grid
    pub fn new(box_size: f32) -> Self {
        Self {
            box_size,
            box_to_shapes: HashMap::new(),
            shape_boxes: HashMap::new(),
        }
    }

    /// Side length of one box
    pub const fn box_size(&self) -> f32 {
        self.box_size
    }

    /// Boxes covered by `shape` at its current position
    ///
    /// The footprint is not capped. Time and memory grow with
    /// `(width / box_size + 2) * (height / box_size + 2)`, so a shape a few
    /// million units wide on the default 128-unit grid yields billions of
    /// boxes. Keep shapes within a sane multiple of the box size, or raise
    /// `CollisionConfig::box_size` for very large worlds.
    pub fn boxes_for(&self, shape: &Shape) -> HashSet<BoxCoord> {
        let xs = box_range(shape.min_x(), shape.max_x(), self.box_size);
        let ys = box_range(shape.min_y(), shape.max_y(), self.box_size);
        xs.flat_map(|x| ys.clone().map(move |y| (x, y))).collect()
    }

    /// Boxes the shape is currently recorded in
    pub fn boxes_of(&self, handle: ShapeHandle) -> Option<&HashSet<BoxCoord>> {
        self.shape_boxes.get(&handle)
    }

    /// Shapes recorded in one box
    pub fn shapes_in(&self, coord: BoxCoord) -> Option<&HashSet<ShapeHandle>> {
        self.box_to_shapes.get(&coord)
    }

    /// Whether the shape is recorded anywhere in the grid
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shape_boxes.contains_key(&handle)
    }

    /// Every shape sharing at least one of `boxes`, except `exclude`
    pub fn candidates(&self, boxes: &HashSet<BoxCoord>, exclude: ShapeHandle) -> HashSet<ShapeHandle> {
        boxes
            .iter()
            .filter_map(|coord| self.box_to_shapes.get(coord))
            .flatten()
            .copied()
            .filter(|&handle| handle != exclude)
            .collect()
    }

    /// Record `handle` in exactly `boxes`: boxes it newly covers gain it,
    /// boxes it left lose it, and boxes left empty are dropped.
    pub fn place(&mut self, handle: ShapeHandle, boxes: HashSet<BoxCoord>) {
        let old_boxes = self.shape_boxes.remove(&handle).unwrap_or_default();

        for coord in old_boxes.difference(&boxes) {
            self.detach(*coord, handle);
        }
        for coord in boxes.difference(&old_boxes) {
            self.box_to_shapes.entry(*coord).or_default().insert(handle);
        }

        if !boxes.is_empty() {
            self.shape_boxes.insert(handle, boxes);
        }
    }

    /// Drop `handle` from the grid. Returns false if it was not recorded.
    pub fn remove(&mut self, handle: ShapeHandle) -> bool {
        let Some(boxes) = self.shape_boxes.remove(&handle) else {
            return false;
        };
        for coord in boxes {
            self.detach(coord, handle);
        }
        true
    }

    fn detach(&mut self, coord: BoxCoord, handle: ShapeHandle) {
        if let Some(shapes) = self.box_to_shapes.get_mut(&coord) {
            shapes.remove(&handle);
            if shapes.is_empty() {
                self.box_to_shapes.remove(&coord);
            }
        }
    }

    /// Number of non-empty boxes
    pub fn box_count(&self) -> usize {
        self.box_to_shapes.len()
    }

    /// Number of shapes recorded in the grid
    pub fn shape_count(&self) -> usize {
        self.shape_boxes.len()
    }

    /// Iterate over non-empty boxes
    pub fn iter(&self) -> impl Iterator<Item = (&BoxCoord, &HashSet<ShapeHandle>)> {
        self.box_to_shapes.iter()
    }
}
