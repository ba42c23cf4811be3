//! Transform for game objects
//!
//! Position / rotation / scale of one object relative to its parent (or to
//! the world when it has none). Rotation is stored as a quaternion; the degree
//! based setters convert to radians exactly once, at the call boundary.
//!
//! The world matrix is never cached. [`Scene::world_matrix`] recomposes it on
//! every read, so a change anywhere up the chain is visible to the very next
//! read in the same frame.
//!
//! [`Scene::world_matrix`]: crate::scene::Scene::world_matrix

use crate::foundation::collections::GameObjectId;
use crate::foundation::math::{utils, Mat4, Quat, Vec3};

/// Local spatial state of a game object
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    parent: Option<GameObjectId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            parent: None,
        }
    }
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Local rotation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Local scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Parent object, if any
    pub fn parent(&self) -> Option<GameObjectId> {
        self.parent
    }

    /// Set position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set position from components
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
    }

    /// Offset the position
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Set rotation from a quaternion
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Set rotation from Euler angles in radians (roll about X, pitch about Y, yaw about Z)
    pub fn set_rotation_radians(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler_angles(x, y, z);
    }

    /// Set rotation from Euler angles in degrees
    pub fn set_rotation_degrees(&mut self, x: f32, y: f32, z: f32) {
        self.set_rotation_radians(utils::deg_to_rad(x), utils::deg_to_rad(y), utils::deg_to_rad(z));
    }

    /// Rotation as Euler angles in degrees, same convention as `set_rotation_degrees`
    pub fn rotation_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation.euler_angles();
        Vec3::new(utils::rad_to_deg(x), utils::rad_to_deg(y), utils::rad_to_deg(z))
    }

    /// Set per-axis scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Set uniform scale
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::new(scale, scale, scale);
    }

    pub(crate) fn set_parent(&mut self, parent: Option<GameObjectId>) {
        self.parent = parent;
    }

    /// Local matrix: scale, then rotate, then translate
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::PI, Point3};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.position(), Vec3::zeros());
        assert_eq!(transform.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert!(transform.parent().is_none());
        assert_relative_eq!(transform.local_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_rotate_translate_order() {
        let mut transform = Transform::identity();
        transform.set_uniform_scale(2.0);
        transform.set_rotation_degrees(0.0, 0.0, 90.0);
        transform.set_position_xyz(10.0, 0.0, 0.0);

        // (1,0,0) -> scaled (2,0,0) -> rotated about Z (0,2,0) -> translated (10,2,0)
        let p = transform.local_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_degree_rotation_round_trip() {
        let mut transform = Transform::identity();
        transform.set_rotation_degrees(30.0, -45.0, 60.0);

        assert_relative_eq!(transform.rotation_degrees(), Vec3::new(30.0, -45.0, 60.0), epsilon = 1e-3);
    }

    #[test]
    fn test_degrees_and_radians_agree() {
        let mut from_degrees = Transform::identity();
        from_degrees.set_rotation_degrees(0.0, 90.0, 0.0);

        let mut from_radians = Transform::identity();
        from_radians.set_rotation_radians(0.0, PI / 2.0, 0.0);

        assert_relative_eq!(from_degrees.local_matrix(), from_radians.local_matrix(), epsilon = EPSILON);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 1.0, 1.0));
        transform.translate(Vec3::new(0.5, 0.0, -1.0));
        assert_relative_eq!(transform.position(), Vec3::new(1.5, 1.0, 0.0), epsilon = EPSILON);
    }
}
