//! Shape relation detection
//!
//! # Module Organization
//!
//! - [`relation`] - Pairwise outcome lattice
//! - [`shape`] - Shape data, bounds and mutable-area setters
//! - [`narrow`] - Built-in relation algorithms per ordered kind pair
//! - [`resolver`] - Dispatch over kinds plus the pluggable judge registry

pub mod relation;
pub mod shape;
pub mod narrow;
pub mod resolver;

// Re-export commonly used types
pub use relation::ShapeRelation;
pub use shape::{GeometryError, Shape, ShapeKind, ShapeKindId};
pub use resolver::{RelationJudge, RelationResolver};
