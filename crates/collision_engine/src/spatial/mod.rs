//! Spatial partitioning data structures
//!
//! Provides the uniform grid used as the broad phase for shape collision
//! queries and movement validation.

mod grid;

pub use grid::{BoxCoord, SpatialIndex};
