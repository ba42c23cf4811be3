//! # Camera Component
//!
//! Supplies view and projection matrices to the scene. The camera carries
//! only projection parameters: its pose is the owning game object's world
//! transform, so moving or parenting the camera object moves the view.
//!
//! Rendering code reaches the active camera through
//! [`Scene::camera_matrices`](crate::scene::Scene::camera_matrices), never
//! through a global.

use crate::core::config::WindowConfig;
use crate::ecs::component::Component;
use crate::foundation::math::{utils, Mat4, Mat4Ext};

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a perspective camera
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Default camera with the window's aspect ratio
    pub fn for_window(window: &WindowConfig) -> Self {
        Self {
            aspect: window.aspect_ratio(),
            ..Self::default()
        }
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
        log::trace!("Camera aspect ratio updated to: {}", aspect);
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(utils::deg_to_rad(self.fov_degrees), self.aspect, self.near, self.far)
    }

    /// View matrix for a camera placed at `world`
    ///
    /// Falls back to identity for a degenerate (non-invertible) pose, e.g. a
    /// zero scale somewhere up the hierarchy.
    pub fn view_matrix(world: &Mat4) -> Mat4 {
        world.try_inverse().unwrap_or_else(|| {
            log::warn!("Camera world matrix is not invertible, using identity view");
            Mat4::identity()
        })
    }
}

impl Component for Camera {
    fn kind_name(&self) -> &'static str {
        "Camera"
    }
}
