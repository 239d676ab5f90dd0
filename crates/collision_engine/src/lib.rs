//! # Collision Engine
//!
//! Grid-indexed 2D collision engine for entities that move in discrete steps.
//!
//! ## Features
//!
//! - **Shapes**: Rectangles, circles, composite groups and user-defined kinds
//! - **Narrow Phase**: Pairwise relations (disjoint, overlap, containment, equality)
//!   with a pluggable judge registry for kind pairs without a built-in method
//! - **Broad Phase**: Uniform grid maintained incrementally as shapes move
//! - **Transactional Movement**: A move either commits fully or changes nothing
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = CollisionScene::new(CollisionConfig::default())?;
//!
//!     let wall = Shape::rectangle(Entity::new(1), Vec3::new(20.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0))?;
//!     let player = Shape::rectangle(Entity::new(2), Vec3::zeros(), Vec3::new(10.0, 10.0, 0.0))?;
//!
//!     let wall = scene.insert_shape(wall);
//!     let player = scene.insert_shape(player);
//!     scene.register(wall)?;
//!     scene.register(player)?;
//!
//!     assert!(!scene.try_move(player, 15.0, 0.0)?);
//!     assert!(scene.try_move(player, 0.0, 40.0)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod entity;
pub mod physics;
pub mod spatial;
pub mod scene;

pub use entity::Entity;
pub use scene::{CollisionError, CollisionScene};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        CollisionError, CollisionScene, Entity,
        config::{CollisionConfig, Config, ConfigError},
        foundation::{
            collections::ShapeHandle,
            math::{Vec2, Vec3},
        },
        physics::{
            CollisionCache, GeometryError, RelationResolver, Shape, ShapeKind, ShapeKindId,
            ShapeRelation,
        },
        spatial::{BoxCoord, SpatialIndex},
    };
}
