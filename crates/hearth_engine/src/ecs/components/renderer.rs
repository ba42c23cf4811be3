//! Renderer component
//!
//! Holds the mesh + material pair drawn for its game object. Both resources
//! are owned elsewhere (backend / asset loader); the renderer only keeps
//! their handles.
//!
//! Its `update` runs in the generic logic pass like any other component and
//! uploads the per-object constants for its material. Drawing happens later,
//! in the separate collection pass, which recomputes the constants so that
//! transform changes made by any component during the logic pass are seen.

use crate::ecs::component::{Component, ComponentContext, ComponentError};
use crate::foundation::collections::GameObjectId;
use crate::foundation::math::Mat4;
use crate::render::{DrawCommand, MaterialHandle, MeshHandle, ObjectConstants};
use crate::scene::SceneError;

/// Component for game objects that are drawn
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    mesh: Option<MeshHandle>,
    material: Option<MaterialHandle>,
    hidden: bool,
    constants: ObjectConstants,
}

impl Renderer {
    /// Create an empty renderer; a `Model`/`Text` sibling binds resources during init
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with resources already bound
    pub fn with_resources(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
            ..Self::default()
        }
    }

    /// Bound mesh
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Bound material
    pub fn material(&self) -> Option<MaterialHandle> {
        self.material
    }

    /// Bind a mesh
    pub fn set_mesh(&mut self, mesh: MeshHandle) {
        self.mesh = Some(mesh);
    }

    /// Bind a material
    pub fn set_material(&mut self, material: MaterialHandle) {
        self.material = Some(material);
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.hidden = !visible;
    }

    /// Check if this renderer takes part in the draw pass
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Constants captured by the last update
    pub fn constants(&self) -> &ObjectConstants {
        &self.constants
    }

    /// Draw submission for this renderer with the given constants
    pub fn draw_command(&self, object: GameObjectId, constants: ObjectConstants) -> DrawCommand {
        DrawCommand {
            object,
            mesh: self.mesh,
            material: self.material,
            constants,
        }
    }
}

impl Component for Renderer {
    fn kind_name(&self) -> &'static str {
        "Renderer"
    }

    fn update(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        let world = ctx.world_matrix()?;
        let (view, projection) = match ctx.camera_matrices() {
            Ok(matrices) => matrices,
            Err(SceneError::NoActiveCamera) => (Mat4::identity(), Mat4::identity()),
            Err(e) => return Err(e.into()),
        };
        self.constants = ObjectConstants::new(&world, &view, &projection);

        if let Some(material) = self.material {
            ctx.backend().upload_constants(material, &self.constants)?;
        }
        Ok(())
    }
}
