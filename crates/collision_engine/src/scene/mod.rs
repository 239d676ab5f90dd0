//! Collision scene
//!
//! The scene owns every shape in an arena and keeps the two structures that
//! are shared by all of them: the [`SpatialIndex`] and the
//! [`CollisionCache`]. Shapes refer to each other only through
//! [`ShapeHandle`]s, and index/cache are mutated only by registration,
//! removal and movement transactions.
//!
//! ```text
//! move request -> copy + translate -> grid candidates -> rough relation
//!              -> cache check -> commit (cache, grid) -> position update
//! ```

mod movement;

#[cfg(test)]
mod tests;

use crate::config::{CollisionConfig, ConfigError};
use crate::entity::Entity;
use crate::foundation::collections::{HandleMap, ShapeHandle};
use crate::physics::{CollisionCache, GeometryError, RelationResolver, Shape, ShapeRelation};
use crate::spatial::{BoxCoord, SpatialIndex};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub use movement::MovePlan;

/// Errors surfaced by scene operations
#[derive(Debug, Error)]
pub enum CollisionError {
    /// Handle is stale or was never inserted
    #[error("Unknown shape {0:?}")]
    UnknownShape(ShapeHandle),

    /// Invalid geometry for the requested operation
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Grid contents drifted from the shape's bounds
    #[error("Index inconsistency for {shape:?}: expected boxes {expected:?}, recorded {actual:?}")]
    IndexInconsistency {
        /// Shape whose bookkeeping is wrong
        shape: ShapeHandle,
        /// Boxes derived from the current bounds
        expected: Vec<BoxCoord>,
        /// Boxes the grid holds the shape in
        actual: Vec<BoxCoord>,
    },
}

/// Shapes of one scene together with their grid and collision cache
#[derive(Debug)]
pub struct CollisionScene {
    config: CollisionConfig,
    shapes: HandleMap<Shape>,
    owners: HashMap<Entity, ShapeHandle>,
    index: SpatialIndex,
    collisions: CollisionCache,
    resolver: RelationResolver,
}

impl Default for CollisionScene {
    fn default() -> Self {
        Self::build(CollisionConfig::default(), RelationResolver::new())
    }
}

impl CollisionScene {
    /// Create an empty scene
    pub fn new(config: CollisionConfig) -> Result<Self, ConfigError> {
        Self::with_resolver(config, RelationResolver::new())
    }

    /// Create an empty scene using a resolver with judges already registered
    pub fn with_resolver(config: CollisionConfig, resolver: RelationResolver) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, resolver))
    }

    fn build(config: CollisionConfig, resolver: RelationResolver) -> Self {
        log::debug!("Creating collision scene with box size {}", config.box_size);
        Self {
            index: SpatialIndex::new(config.box_size),
            config,
            shapes: HandleMap::with_key(),
            owners: HashMap::new(),
            collisions: CollisionCache::new(),
            resolver,
        }
    }

    /// Scene settings
    pub const fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Relation dispatcher
    pub const fn resolver(&self) -> &RelationResolver {
        &self.resolver
    }

    /// Relation dispatcher, for registering judges
    pub fn resolver_mut(&mut self) -> &mut RelationResolver {
        &mut self.resolver
    }

    /// The broad-phase grid
    pub const fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// The collision cache
    pub const fn collisions(&self) -> &CollisionCache {
        &self.collisions
    }

    /// Add a shape to the scene without indexing it; see [`register`](Self::register)
    pub fn insert_shape(&mut self, shape: Shape) -> ShapeHandle {
        let owner = shape.owner();
        let handle = self.shapes.insert(shape);
        if let Some(previous) = self.owners.insert(owner, handle) {
            log::warn!("{owner} already owned {previous:?}; now owns {handle:?}");
        }
        handle
    }

    /// Look up a shape
    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(handle)
    }

    /// Mutable access to a shape. Changing its bounds this way bypasses the
    /// grid; call [`register`](Self::register) again afterwards.
    pub fn shape_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        self.shapes.get_mut(handle)
    }

    /// Shape owned by an entity
    pub fn shape_of(&self, entity: Entity) -> Option<ShapeHandle> {
        self.owners.get(&entity).copied()
    }

    /// Number of shapes in the scene
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the scene holds no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over all shapes
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes.iter()
    }

    fn get(&self, handle: ShapeHandle) -> Result<&Shape, CollisionError> {
        self.shapes.get(handle).ok_or(CollisionError::UnknownShape(handle))
    }

    /// Relation between two shapes of this scene
    pub fn relation(&self, a: ShapeHandle, b: ShapeHandle, rough: bool) -> Result<ShapeRelation, CollisionError> {
        Ok(self.resolver.relation(self.get(a)?, self.get(b)?, rough))
    }

    /// Boxes the shape covers at its current position
    pub fn boxes_for(&self, handle: ShapeHandle) -> Result<HashSet<BoxCoord>, CollisionError> {
        Ok(self.index.boxes_for(self.get(handle)?))
    }

    /// Shapes recorded in one grid box
    pub fn shapes_in_box(&self, coord: BoxCoord) -> Option<&HashSet<ShapeHandle>> {
        self.index.shapes_in(coord)
    }

    /// Shapes `handle` is known to collide with
    pub fn collisions_of(&self, handle: ShapeHandle) -> Option<&HashSet<ShapeHandle>> {
        self.collisions.get(handle)
    }

    /// Put the shape into every grid box it covers.
    ///
    /// Returns `Ok(false)` when the shape collides with something already in
    /// those boxes. Registration happens regardless, and each such collision
    /// is cached on both sides so later moves treat it as pre-existing.
    /// Calling this again re-indexes the shape at its current position and
    /// resynchronises its cached collisions.
    pub fn register(&mut self, handle: ShapeHandle) -> Result<bool, CollisionError> {
        let shape = self.shapes.get(handle).ok_or(CollisionError::UnknownShape(handle))?;
        let boxes = self.index.boxes_for(shape);

        let mut colliding = HashSet::new();
        for candidate in self.index.candidates(&boxes, handle) {
            let Some(other) = self.shapes.get(candidate) else {
                log::error!("Grid references removed shape {candidate:?}");
                continue;
            };
            let relation = self.resolver.relation(shape, other, true);
            log::trace!("register {handle:?} vs {candidate:?}: {relation:?}");
            if relation == ShapeRelation::Collide {
                colliding.insert(candidate);
            }
        }

        let box_count = boxes.len();
        self.index.place(handle, boxes);

        for stale in self.collisions.colliding_with(handle).difference(&colliding) {
            self.collisions.release(*stale, handle);
        }
        self.collisions.replace(handle, HashSet::new());
        for other in &colliding {
            self.collisions.record_pair(handle, *other);
        }

        log::debug!(
            "Registered {handle:?} in {box_count} boxes, {} collisions",
            colliding.len()
        );
        self.enforce_index(handle);
        Ok(colliding.is_empty())
    }

    /// Teardown hook: drop the shape from the arena, the grid and the cache
    pub fn remove_shape(&mut self, handle: ShapeHandle) -> Result<Shape, CollisionError> {
        let shape = self.shapes.remove(handle).ok_or(CollisionError::UnknownShape(handle))?;
        self.index.remove(handle);
        self.collisions.forget(handle);
        if self.owners.get(&shape.owner()) == Some(&handle) {
            self.owners.remove(&shape.owner());
        }
        log::debug!("Removed {handle:?} owned by {}", shape.owner());
        Ok(shape)
    }

    /// Check that the grid holds the shape in exactly the boxes its current
    /// bounds cover
    pub fn verify_index(&self, handle: ShapeHandle) -> Result<(), CollisionError> {
        let expected = self.index.boxes_for(self.get(handle)?);
        let recorded = self.index.boxes_of(handle).cloned().unwrap_or_default();

        let reverse_ok = recorded
            .iter()
            .all(|coord| self.index.shapes_in(*coord).is_some_and(|set| set.contains(&handle)));

        if expected == recorded && reverse_ok {
            return Ok(());
        }

        let mut expected: Vec<_> = expected.into_iter().collect();
        let mut actual: Vec<_> = recorded.into_iter().collect();
        expected.sort_unstable();
        actual.sort_unstable();
        Err(CollisionError::IndexInconsistency { shape: handle, expected, actual })
    }

    /// Run [`verify_index`](Self::verify_index) when enabled. A violation
    /// means incremental maintenance drifted: fatal in debug builds, logged
    /// otherwise.
    fn enforce_index(&self, handle: ShapeHandle) {
        if !self.config.verify_index {
            return;
        }
        if let Err(err) = self.verify_index(handle) {
            log::error!("{err}");
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
        }
    }
}
