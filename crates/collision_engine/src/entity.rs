//! Entity implementation

use serde::{Deserialize, Serialize};

/// Identifier of a world entity that owns a shape.
///
/// Shapes hold this as a back-reference only; the collision engine never
/// owns or outlives entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub const fn new(id: u32) -> Self {
        Self { id }
    }
    
    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.id)
    }
}
