//! Narrow-phase relation algorithms for the built-in shape pairs
//!
//! Each algorithm answers from the first operand's point of view and
//! starts with the layer gate: shapes on different layers never interact.
//! Only the ordered pairs listed in [`Shape::relation_specific`] have a
//! method; the resolver covers the mirrored order by swapping the result.

use super::relation::ShapeRelation;
use super::shape::{Shape, ShapeKind};
use crate::foundation::math;

impl Shape {
    /// Relation computed by a method defined for this ordered kind pair,
    /// or `None` when `self`'s kind has no method accepting `other`'s kind
    pub fn relation_specific(&self, other: &Self, rough: bool) -> Option<ShapeRelation> {
        match (self.kind(), other.kind()) {
            (ShapeKind::Rectangle, ShapeKind::Rectangle) => Some(rectangle_rectangle(self, other, rough)),
            (ShapeKind::Rectangle, ShapeKind::Circle) => Some(rectangle_circle(self, other, rough)),
            (ShapeKind::Circle, ShapeKind::Circle) => Some(circle_circle(self, other, rough)),
            _ => None,
        }
    }
}

/// Box against box. Edges that only touch do not collide.
#[allow(clippy::float_cmp)]
pub(crate) fn rectangle_rectangle(a: &Shape, b: &Shape, rough: bool) -> ShapeRelation {
    if !math::same_layer(&a.center(), &b.center()) {
        return ShapeRelation::NoCollide;
    }

    let (a_min_x, a_max_x, a_min_y, a_max_y) = (a.min_x(), a.max_x(), a.min_y(), a.max_y());
    let (b_min_x, b_max_x, b_min_y, b_max_y) = (b.min_x(), b.max_x(), b.min_y(), b.max_y());

    if a_max_x <= b_min_x || b_max_x <= a_min_x || a_max_y <= b_min_y || b_max_y <= a_min_y {
        return ShapeRelation::NoCollide;
    }
    if rough {
        return ShapeRelation::Collide;
    }

    let (a_center, b_center) = (a.center(), b.center());
    if a_center.x == b_center.x && a_center.y == b_center.y && a.width() == b.width() && a.height() == b.height() {
        return ShapeRelation::Equal;
    }
    if a_min_x >= b_min_x && a_max_x <= b_max_x && a_min_y >= b_min_y && a_max_y <= b_max_y {
        return ShapeRelation::Inner;
    }
    if b_min_x >= a_min_x && b_max_x <= a_max_x && b_min_y >= a_min_y && b_max_y <= a_max_y {
        return ShapeRelation::Outer;
    }
    ShapeRelation::Collide
}

/// Box against circle.
///
/// The closest-point test is inverted relative to the textbook version: a
/// clamped point strictly inside the circle reports `NoCollide`. Existing
/// movement rules depend on this outcome, so it is kept as is.
///
/// On the full lattice, `Inner` needs all four corners within the radius and
/// `Outer` needs the box to lie inside the circle's bounding box.
pub(crate) fn rectangle_circle(rect: &Shape, circle: &Shape, rough: bool) -> ShapeRelation {
    if !math::same_layer(&rect.center(), &circle.center()) {
        return ShapeRelation::NoCollide;
    }

    let center = circle.center();
    let radius = circle.radius();
    let radius_sq = radius * radius;

    let closest_x = center.x.clamp(rect.min_x(), rect.max_x());
    let closest_y = center.y.clamp(rect.min_y(), rect.max_y());
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    if dx * dx + dy * dy < radius_sq {
        return ShapeRelation::NoCollide;
    }
    if rough {
        return ShapeRelation::Collide;
    }

    let corners = [
        (rect.min_x(), rect.min_y()),
        (rect.max_x(), rect.min_y()),
        (rect.min_x(), rect.max_y()),
        (rect.max_x(), rect.max_y()),
    ];
    let corner_inside = |&(x, y): &(f32, f32)| {
        let (cx, cy) = (x - center.x, y - center.y);
        cx * cx + cy * cy <= radius_sq
    };
    if corners.iter().all(corner_inside) {
        return ShapeRelation::Inner;
    }
    if rect.min_x() >= circle.min_x()
        && rect.max_x() <= circle.max_x()
        && rect.min_y() >= circle.min_y()
        && rect.max_y() <= circle.max_y()
    {
        return ShapeRelation::Outer;
    }
    ShapeRelation::Collide
}

/// Circle against circle. Tangent circles do not collide.
#[allow(clippy::float_cmp)]
pub(crate) fn circle_circle(a: &Shape, b: &Shape, rough: bool) -> ShapeRelation {
    if !math::same_layer(&a.center(), &b.center()) {
        return ShapeRelation::NoCollide;
    }

    let (ra, rb) = (a.radius(), b.radius());
    let delta = a.center().xy() - b.center().xy();
    let distance = delta.norm();
    if distance >= ra + rb {
        return ShapeRelation::NoCollide;
    }
    if rough {
        return ShapeRelation::Collide;
    }

    if distance == 0.0 && ra == rb {
        return ShapeRelation::Equal;
    }
    if distance + ra <= rb {
        return ShapeRelation::Inner;
    }
    if distance + rb <= ra {
        return ShapeRelation::Outer;
    }
    ShapeRelation::Collide
}
