//! Relation dispatch across shape kinds
//!
//! `relation(a, b)` resolves in a fixed order:
//! 1. a method on `a`'s kind accepting `b`'s kind,
//! 2. a method on `b`'s kind accepting `a`'s kind, with `Inner`/`Outer` swapped,
//! 3. a registered judge for `(kind(a), kind(b))`, then `(kind(b), kind(a))`
//!    with the result swapped,
//! 4. otherwise [`ShapeRelation::Undefined`].
//!
//! Groups are handled ahead of the per-kind methods because their children
//! may themselves need any step of this chain.

use super::relation::ShapeRelation;
use super::shape::{Shape, ShapeKind, ShapeKindId};
use std::collections::HashMap;

/// Judge computing the relation of its first operand to its second
pub type RelationJudge = Box<dyn Fn(&Shape, &Shape, bool) -> ShapeRelation + Send + Sync>;

/// Narrow-phase dispatcher with an extensible judge registry
#[derive(Default)]
pub struct RelationResolver {
    judges: HashMap<(ShapeKindId, ShapeKindId), RelationJudge>,
}

impl RelationResolver {
    /// Resolver with an empty registry; built-in pairs still resolve
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a judge for the ordered pair `(first, second)`.
    /// Returns the judge it replaced, if any.
    pub fn register_judge<F>(&mut self, first: ShapeKindId, second: ShapeKindId, judge: F) -> Option<RelationJudge>
    where
        F: Fn(&Shape, &Shape, bool) -> ShapeRelation + Send + Sync + 'static,
    {
        log::debug!("Registering relation judge for {first:?} x {second:?}");
        self.judges.insert((first, second), Box::new(judge))
    }

    /// Whether a judge exists for exactly this ordered pair
    pub fn has_judge(&self, first: ShapeKindId, second: ShapeKindId) -> bool {
        self.judges.contains_key(&(first, second))
    }

    /// Relation of `a` to `b`. With `rough` set the answer is one of
    /// `Undefined`, `NoCollide` or `Collide`.
    pub fn relation(&self, a: &Shape, b: &Shape, rough: bool) -> ShapeRelation {
        if let Some(relation) = self.specific(a, b, rough) {
            return relation;
        }
        if let Some(relation) = self.specific(b, a, rough) {
            return relation.swapped();
        }

        let relation = if let Some(judge) = self.judges.get(&(a.kind_id(), b.kind_id())) {
            judge(a, b, rough)
        } else if let Some(judge) = self.judges.get(&(b.kind_id(), a.kind_id())) {
            judge(b, a, rough).swapped()
        } else {
            log::trace!("No relation for {:?} x {:?}", a.kind_id(), b.kind_id());
            ShapeRelation::Undefined
        };

        if rough {
            relation.rough()
        } else {
            relation
        }
    }

    fn specific(&self, a: &Shape, b: &Shape, rough: bool) -> Option<ShapeRelation> {
        match a.kind() {
            ShapeKind::Group(children) => Some(self.group_relation(children, b)),
            _ => a.relation_specific(b, rough),
        }
    }

    /// Groups always answer roughly: `Collide` as soon as one child
    /// collides with `other`
    fn group_relation(&self, children: &[Shape], other: &Shape) -> ShapeRelation {
        let hit = children
            .iter()
            .any(|child| self.relation(child, other, true) == ShapeRelation::Collide);
        if hit {
            ShapeRelation::Collide
        } else {
            ShapeRelation::NoCollide
        }
    }
}

impl std::fmt::Debug for RelationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pairs: Vec<_> = self.judges.keys().collect();
        pairs.sort();
        f.debug_struct("RelationResolver").field("judges", &pairs).finish()
    }
}
