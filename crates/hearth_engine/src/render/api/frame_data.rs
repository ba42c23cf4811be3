//! Frame Rendering Data Structures
//!
//! Data produced by the scene each frame and consumed by the backend.

use bytemuck::{Pod, Zeroable};

use super::render_backend::{MaterialHandle, MeshHandle};
use crate::foundation::collections::GameObjectId;
use crate::foundation::math::{Mat4, Mat4Ext};

/// Per-object shader constants (column-major matrices)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectConstants {
    /// Object to world
    pub world: [[f32; 4]; 4],
    /// World to view
    pub view: [[f32; 4]; 4],
    /// View to clip
    pub projection: [[f32; 4]; 4],
}

impl ObjectConstants {
    /// Pack the three matrices for upload
    pub fn new(world: &Mat4, view: &Mat4, projection: &Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }

    /// Raw bytes in the layout the shaders expect
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for ObjectConstants {
    fn default() -> Self {
        let identity = Mat4::identity();
        Self::new(&identity, &identity, &identity)
    }
}

/// One draw submission in the render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Game object the renderer belongs to
    pub object: GameObjectId,
    /// Mesh to draw, if one has been bound
    pub mesh: Option<MeshHandle>,
    /// Material to draw with, if one has been bound
    pub material: Option<MaterialHandle>,
    /// Constants computed at collection time, after the update pass
    pub constants: ObjectConstants,
}

impl DrawCommand {
    /// Whether both mesh and material are bound
    pub fn is_complete(&self) -> bool {
        self.mesh.is_some() && self.material.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_layout() {
        let constants = ObjectConstants::default();
        assert_eq!(constants.as_bytes().len(), 3 * 16 * 4);
        assert_eq!(constants.world[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
