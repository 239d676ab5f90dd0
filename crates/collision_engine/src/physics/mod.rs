//! Physics module for collision detection
//!
//! Provides the narrow phase (shape relations and their dispatch) and the
//! collision cache used to validate movement.

pub mod cache;
pub mod collision;

pub use cache::CollisionCache;
pub use collision::{
    GeometryError,
    RelationJudge,
    RelationResolver,
    Shape,
    ShapeKind,
    ShapeKindId,
    ShapeRelation,
};
