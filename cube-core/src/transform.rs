/// Mesh transforms: rotation state, scale and the matrices built from them
use std::f32::consts::TAU;

use nalgebra::{Matrix4, Vector3};

use crate::error::{CoreError, Result};

/// Rotation around the horizontal and vertical axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate by delta amounts (in radians), keeping each angle in `0..TAU`
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx).rem_euclid(TAU);
        self.y = (self.y + dy).rem_euclid(TAU);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation and scale of the one mesh a surface draws
///
/// Owned by a single surface; the per-frame update advances the rotation and
/// the hover animator writes the scale.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshTransform {
    pub rotation: RotationState,
    scale: Vector3<f32>,
}

impl MeshTransform {
    pub fn new() -> Self {
        Self {
            rotation: RotationState::zero(),
            scale: Vector3::repeat(1.0),
        }
    }

    /// Spin both axes by the same step
    pub fn advance_rotation(&mut self, step: f32) {
        self.rotation.rotate(step, step);
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) -> Result<()> {
        if !scale.iter().all(|v| v.is_finite()) {
            return Err(CoreError::NonFinite("mesh scale"));
        }
        self.scale = scale;
        Ok(())
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::rotation_matrix(&self.rotation)
            * Transform::scale_matrix(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state, X applied last
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));

        rx * ry
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Matrix4<f32>, view_projection: &Matrix4<f32>) -> Matrix4<f32> {
        view_projection * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);

        state.rotate(0.1, 0.2);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_keeps_advancing_after_long_uptime() {
        let mut transform = MeshTransform::new();
        transform.rotation = RotationState::new(262_144.0, 262_144.0);

        transform.advance_rotation(0.01);
        assert!((0.0..=TAU).contains(&transform.rotation.x));
        assert!((0.0..=TAU).contains(&transform.rotation.y));

        let before = transform.rotation;
        for _ in 0..10 {
            transform.advance_rotation(0.01);
        }
        let moved = (transform.rotation.x - before.x).rem_euclid(TAU);
        assert!((moved - 0.1).abs() < 1e-4);
        let moved = (transform.rotation.y - before.y).rem_euclid(TAU);
        assert!((moved - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_wraps_negative_deltas() {
        let mut state = RotationState::zero();
        state.rotate(-0.5, 0.0);
        assert!((state.x - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_advance_rotation_moves_both_axes() {
        let mut transform = MeshTransform::new();
        for _ in 0..100 {
            transform.advance_rotation(0.01);
        }
        assert!((transform.rotation.x - 1.0).abs() < 1e-4);
        assert!((transform.rotation.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_scale_rejects_non_finite() {
        let mut transform = MeshTransform::new();
        let err = transform.set_scale(Vector3::new(1.0, f32::NAN, 1.0));
        assert_eq!(err, Err(CoreError::NonFinite("mesh scale")));
        assert_eq!(transform.scale(), Vector3::repeat(1.0));
    }

    #[test]
    fn test_model_matrix_applies_scale() {
        let mut transform = MeshTransform::new();
        transform.set_scale(Vector3::repeat(1.2)).unwrap();
        let p = transform.model_matrix().transform_point(&Point3::new(0.5, 0.0, 0.0));
        assert!((p.x - 0.6).abs() < 1e-6);
    }
}
