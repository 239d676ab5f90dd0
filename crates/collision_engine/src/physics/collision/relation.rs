//! Pairwise relation outcomes between two shapes

/// Relation of shape `a` to shape `b`, always read from `a`'s side.
///
/// Rough queries only ever yield [`Undefined`](Self::Undefined),
/// [`NoCollide`](Self::NoCollide) or [`Collide`](Self::Collide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeRelation {
    /// No judge could classify the pair
    Undefined,
    /// Disjoint
    NoCollide,
    /// Partial overlap
    Collide,
    /// Identical center and size
    Equal,
    /// `a` lies entirely inside `b`
    Inner,
    /// `b` lies entirely inside `a`
    Outer,
}

impl ShapeRelation {
    /// The same relation seen from the other operand
    pub const fn swapped(self) -> Self {
        match self {
            Self::Inner => Self::Outer,
            Self::Outer => Self::Inner,
            other => other,
        }
    }

    /// Collapse the full lattice into the rough three-way answer
    pub const fn rough(self) -> Self {
        match self {
            Self::Undefined => Self::Undefined,
            Self::NoCollide => Self::NoCollide,
            Self::Collide | Self::Equal | Self::Inner | Self::Outer => Self::Collide,
        }
    }

    /// Whether the shapes overlap in any way
    pub const fn is_collision(self) -> bool {
        matches!(self, Self::Collide | Self::Equal | Self::Inner | Self::Outer)
    }
}
