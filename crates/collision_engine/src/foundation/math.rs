//! Math utilities and types
//!
//! Shapes are planar: `x`/`y` carry geometry and `z` is the layer a shape
//! lives on. Layers are compared for equality only.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type (x, y, layer)
pub type Vec3 = Vector3<f32>;

/// Returns true when every component of `v` is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Exact layer comparison for two positions
#[allow(clippy::float_cmp)]
pub fn same_layer(a: &Vec3, b: &Vec3) -> bool {
    a.z == b.z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_finite_rejects_nan_and_infinity() {
        assert!(is_finite(&Vec3::new(1.0, -2.0, 0.0)));
        assert!(!is_finite(&Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite(&Vec3::new(0.0, f32::INFINITY, 0.0)));
    }

    #[test]
    fn test_same_layer_ignores_planar_components() {
        assert!(same_layer(&Vec3::new(0.0, 0.0, 2.0), &Vec3::new(50.0, -3.0, 2.0)));
        assert!(!same_layer(&Vec3::new(0.0, 0.0, 1.0), &Vec3::new(0.0, 0.0, 2.0)));
    }
}
