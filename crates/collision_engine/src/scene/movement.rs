//! Movement validation: `can_move`, `force_move`, `try_move`
//!
//! A move is a transaction. It is simulated on a copy of the shape, checked
//! against every shape sharing the copy's grid boxes, and only then
//! committed to the cache and the grid. A rejected move leaves the shape,
//! the grid and the cache exactly as they were.

use super::{CollisionError, CollisionScene};
use crate::foundation::collections::ShapeHandle;
use crate::physics::ShapeRelation;
use crate::spatial::BoxCoord;
use std::collections::HashSet;

/// Bookkeeping for an accepted move, computed before anything is mutated
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    /// Boxes covered after the move
    pub boxes: HashSet<BoxCoord>,
    /// Pre-existing collisions that still hold after the move
    pub kept: HashSet<ShapeHandle>,
    /// Pre-existing collisions the move ends
    pub released: HashSet<ShapeHandle>,
}

impl CollisionScene {
    /// Simulate moving `handle` by `(dx, dy)`.
    ///
    /// Returns `None` as soon as the moved copy collides with a shape that
    /// is not already in its cached collision set.
    pub fn plan_move(&self, handle: ShapeHandle, dx: f32, dy: f32) -> Result<Option<MovePlan>, CollisionError> {
        let mut moved = self.get(handle)?.clone();
        moved.translate(dx, dy)?;

        let boxes = self.index.boxes_for(&moved);
        let mut released = self.collisions.colliding_with(handle);
        let mut kept = HashSet::new();

        for candidate in self.index.candidates(&boxes, handle) {
            let Some(other) = self.shapes.get(candidate) else {
                log::error!("Grid references removed shape {candidate:?}");
                continue;
            };
            let relation = self.resolver.relation(&moved, other, true);
            log::trace!("move {handle:?} by ({dx}, {dy}) vs {candidate:?}: {relation:?}");
            if relation != ShapeRelation::Collide {
                continue;
            }
            if !released.remove(&candidate) {
                log::debug!("Move of {handle:?} by ({dx}, {dy}) blocked by {candidate:?}");
                return Ok(None);
            }
            kept.insert(candidate);
        }

        Ok(Some(MovePlan { boxes, kept, released }))
    }

    /// Read-only version of [`can_move`](Self::can_move)
    pub fn check_move(&self, handle: ShapeHandle, dx: f32, dy: f32) -> Result<bool, CollisionError> {
        Ok(self.plan_move(handle, dx, dy)?.is_some())
    }

    /// Validate a move and, when it is allowed, commit the cache and grid
    /// bookkeeping for the new position.
    ///
    /// The shape itself is not moved; follow a `true` result with
    /// [`force_move`](Self::force_move) using the same delta, or use
    /// [`try_move`](Self::try_move) which does both.
    pub fn can_move(&mut self, handle: ShapeHandle, dx: f32, dy: f32) -> Result<bool, CollisionError> {
        let Some(plan) = self.plan_move(handle, dx, dy)? else {
            return Ok(false);
        };
        self.commit(handle, plan);
        Ok(true)
    }

    fn commit(&mut self, handle: ShapeHandle, plan: MovePlan) {
        let MovePlan { boxes, kept, released } = plan;

        self.collisions.replace(handle, kept);
        for other in &released {
            log::debug!("{handle:?} no longer collides with {other:?}");
            self.collisions.release(*other, handle);
        }
        self.index.place(handle, boxes);
    }

    /// Translate the shape with no validation and no grid or cache upkeep.
    /// Call [`register`](Self::register) afterwards if the grid must follow.
    pub fn force_move(&mut self, handle: ShapeHandle, dx: f32, dy: f32) -> Result<(), CollisionError> {
        self.shapes
            .get_mut(handle)
            .ok_or(CollisionError::UnknownShape(handle))?
            .translate(dx, dy)?;
        Ok(())
    }

    /// [`can_move`](Self::can_move) followed by [`force_move`](Self::force_move)
    /// when allowed. Returns whether the shape moved.
    pub fn try_move(&mut self, handle: ShapeHandle, dx: f32, dy: f32) -> Result<bool, CollisionError> {
        if !self.can_move(handle, dx, dy)? {
            return Ok(false);
        }
        self.force_move(handle, dx, dy)?;
        log::debug!("Moved {handle:?} by ({dx}, {dy})");
        self.enforce_index(handle);
        Ok(true)
    }
}
