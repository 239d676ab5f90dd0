//! Shape data: axis-aligned boxes, circles, composite groups and custom kinds
//!
//! A shape is a mutable center + size pair owned by one [`Entity`]. Every
//! positional accessor (`left`, `top`, `min_x`, ...) is derived from those two
//! fields and never stored. Groups are the exception for bounds: their
//! `min_*`/`max_*` fold over the children, while their own center and size
//! stay independent fields.

use crate::entity::Entity;
use crate::foundation::math::{self, Vec2, Vec3};
use thiserror::Error;

/// Identifier of a concrete shape kind, used to key relation judges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeKindId(u32);

impl ShapeKindId {
    /// Axis-aligned rectangle
    pub const RECTANGLE: Self = Self(0);
    /// Circle
    pub const CIRCLE: Self = Self(1);
    /// Composite group
    pub const GROUP: Self = Self(2);

    const CUSTOM_BASE: u32 = 1 << 16;

    /// Kind id for a user-defined shape. Custom kinds have no built-in
    /// relation methods and are resolved through the judge registry.
    pub const fn custom(id: u16) -> Self {
        Self(Self::CUSTOM_BASE + id as u32)
    }

    /// Whether this id names one of the built-in kinds
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::CUSTOM_BASE
    }
}

/// Geometry errors raised when constructing or mutating a shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Width or height below zero
    #[error("Shape size must not be negative: {width} x {height}")]
    NegativeSize {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// NaN or infinite component in a center, size or translation
    #[error("Non-finite {0} component")]
    NonFinite(&'static str),

    /// Circles keep width == height == diameter
    #[error("Circle size must be square: {width} x {height}")]
    NonSquareCircle {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Custom shapes cannot claim a built-in kind id
    #[error("Kind id {0:?} is reserved for built-in shapes")]
    ReservedKind(ShapeKindId),
}

/// Concrete kind of a shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned box
    Rectangle,
    /// Circle with diameter `size.x == size.y`
    Circle,
    /// Ordered children sharing one owner
    Group(Vec<Shape>),
    /// User-defined kind with box bounds, resolved through the judge registry
    Custom(ShapeKindId),
}

/// A 2D shape on a layer, owned by one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    owner: Entity,
    center: Vec3,
    size: Vec3,
    kind: ShapeKind,
}

fn check_center(center: &Vec3) -> Result<(), GeometryError> {
    if math::is_finite(center) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite("center"))
    }
}

fn check_size(size: &Vec3) -> Result<(), GeometryError> {
    if !math::is_finite(size) {
        return Err(GeometryError::NonFinite("size"));
    }
    if size.x < 0.0 || size.y < 0.0 {
        return Err(GeometryError::NegativeSize { width: size.x, height: size.y });
    }
    Ok(())
}

#[allow(clippy::float_cmp)]
fn check_circle_size(size: &Vec3) -> Result<(), GeometryError> {
    check_size(size)?;
    if size.x != size.y {
        return Err(GeometryError::NonSquareCircle { width: size.x, height: size.y });
    }
    Ok(())
}

impl Shape {
    fn build(owner: Entity, center: Vec3, size: Vec3, kind: ShapeKind) -> Result<Self, GeometryError> {
        check_center(&center)?;
        if matches!(kind, ShapeKind::Circle) {
            check_circle_size(&size)?;
        } else {
            check_size(&size)?;
        }
        Ok(Self { owner, center, size, kind })
    }

    /// Axis-aligned rectangle centered at `center` with full extents `size`
    pub fn rectangle(owner: Entity, center: Vec3, size: Vec3) -> Result<Self, GeometryError> {
        Self::build(owner, center, size, ShapeKind::Rectangle)
    }

    /// Circle of the given radius
    pub fn circle(owner: Entity, center: Vec3, radius: f32) -> Result<Self, GeometryError> {
        let diameter = radius * 2.0;
        Self::build(owner, center, Vec3::new(diameter, diameter, 0.0), ShapeKind::Circle)
    }

    /// Composite shape. `center` and `size` are kept as given; callers are
    /// responsible for keeping them consistent with `children`.
    pub fn group(owner: Entity, center: Vec3, size: Vec3, children: Vec<Self>) -> Result<Self, GeometryError> {
        Self::build(owner, center, size, ShapeKind::Group(children))
    }

    /// Shape of a user-defined kind
    pub fn custom(owner: Entity, kind: ShapeKindId, center: Vec3, size: Vec3) -> Result<Self, GeometryError> {
        if kind.is_builtin() {
            return Err(GeometryError::ReservedKind(kind));
        }
        Self::build(owner, center, size, ShapeKind::Custom(kind))
    }

    /// Entity that owns this shape
    pub const fn owner(&self) -> Entity {
        self.owner
    }

    /// Concrete kind
    pub const fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Key used by the judge registry
    pub const fn kind_id(&self) -> ShapeKindId {
        match &self.kind {
            ShapeKind::Rectangle => ShapeKindId::RECTANGLE,
            ShapeKind::Circle => ShapeKindId::CIRCLE,
            ShapeKind::Group(_) => ShapeKindId::GROUP,
            ShapeKind::Custom(id) => *id,
        }
    }

    /// Children of a group, empty for every other kind
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            ShapeKind::Group(children) => children,
            _ => &[],
        }
    }

    /// Center position (x, y, layer)
    pub const fn center(&self) -> Vec3 {
        self.center
    }

    /// Full extents
    pub const fn size(&self) -> Vec3 {
        self.size
    }

    /// Layer the shape lives on
    pub fn layer(&self) -> f32 {
        self.center.z
    }

    /// Width (`size.x`)
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Height (`size.y`)
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Half of the width; the radius for circles
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }

    fn fold_children(&self, init: f32, pick: impl Fn(&Self) -> f32, merge: fn(f32, f32) -> f32) -> f32 {
        self.children().iter().map(pick).fold(init, merge)
    }

    /// Smallest x covered by the shape
    pub fn min_x(&self) -> f32 {
        match &self.kind {
            ShapeKind::Group(_) => self.fold_children(f32::INFINITY, Self::min_x, f32::min),
            _ => self.center.x - self.size.x / 2.0,
        }
    }

    /// Largest x covered by the shape
    pub fn max_x(&self) -> f32 {
        match &self.kind {
            ShapeKind::Group(_) => self.fold_children(f32::NEG_INFINITY, Self::max_x, f32::max),
            _ => self.center.x + self.size.x / 2.0,
        }
    }

    /// Smallest y covered by the shape
    pub fn min_y(&self) -> f32 {
        match &self.kind {
            ShapeKind::Group(_) => self.fold_children(f32::INFINITY, Self::min_y, f32::min),
            _ => self.center.y - self.size.y / 2.0,
        }
    }

    /// Largest y covered by the shape
    pub fn max_y(&self) -> f32 {
        match &self.kind {
            ShapeKind::Group(_) => self.fold_children(f32::NEG_INFINITY, Self::max_y, f32::max),
            _ => self.center.y + self.size.y / 2.0,
        }
    }

    /// Left edge, for draw positioning
    pub fn left(&self) -> f32 {
        self.min_x()
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.max_x()
    }

    /// Top edge (smallest y)
    pub fn top(&self) -> f32 {
        self.min_y()
    }

    /// Bottom edge (largest y)
    pub fn bottom(&self) -> f32 {
        self.max_y()
    }

    /// Top-left corner
    pub fn left_top(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    /// Replace the center
    pub fn set_center(&mut self, center: Vec3) -> Result<(), GeometryError> {
        check_center(&center)?;
        self.center = center;
        Ok(())
    }

    /// Replace the size
    pub fn set_size(&mut self, size: Vec3) -> Result<(), GeometryError> {
        if matches!(self.kind, ShapeKind::Circle) {
            check_circle_size(&size)?;
        } else {
            check_size(&size)?;
        }
        self.size = size;
        Ok(())
    }

    /// Move so the top-left corner of the own box lands on `left_top`.
    /// The layer and size are unchanged.
    pub fn set_left_top(&mut self, left_top: Vec2) -> Result<(), GeometryError> {
        let center = Vec3::new(
            left_top.x + self.size.x / 2.0,
            left_top.y + self.size.y / 2.0,
            self.center.z,
        );
        self.set_center(center)
    }

    /// Change the width, keeping the center
    pub fn set_width(&mut self, width: f32) -> Result<(), GeometryError> {
        self.set_size(Vec3::new(width, self.size.y, self.size.z))
    }

    /// Change the height, keeping the center
    pub fn set_height(&mut self, height: f32) -> Result<(), GeometryError> {
        self.set_size(Vec3::new(self.size.x, height, self.size.z))
    }

    /// Translate on the plane. Groups carry their children along so the
    /// aggregated bounds follow the move.
    ///
    /// Fails without moving anything if the delta or any resulting center
    /// (children included) is not finite.
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<(), GeometryError> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(GeometryError::NonFinite("translation"));
        }
        if !self.shift_stays_finite(dx, dy) {
            return Err(GeometryError::NonFinite("center"));
        }
        self.shift(dx, dy);
        Ok(())
    }

    fn shift_stays_finite(&self, dx: f32, dy: f32) -> bool {
        let moved_ok = (self.center.x + dx).is_finite() && (self.center.y + dy).is_finite();
        match &self.kind {
            ShapeKind::Group(children) => moved_ok && children.iter().all(|child| child.shift_stays_finite(dx, dy)),
            _ => moved_ok,
        }
    }

    fn shift(&mut self, dx: f32, dy: f32) {
        self.center.x += dx;
        self.center.y += dy;
        if let ShapeKind::Group(children) = &mut self.kind {
            for child in children {
                child.shift(dx, dy);
            }
        }
    }

    /// Whether `point` lies in the shape (edges included)
    pub fn point_in_shape(&self, point: Vec2) -> bool {
        match &self.kind {
            ShapeKind::Circle => {
                let dx = point.x - self.center.x;
                let dy = point.y - self.center.y;
                dx * dx + dy * dy <= self.radius() * self.radius()
            }
            ShapeKind::Group(children) => children.iter().any(|child| child.point_in_shape(point)),
            ShapeKind::Rectangle | ShapeKind::Custom(_) => {
                point.x >= self.min_x()
                    && point.x <= self.max_x()
                    && point.y >= self.min_y()
                    && point.y <= self.max_y()
            }
        }
    }
}
