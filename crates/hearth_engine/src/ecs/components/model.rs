//! Model component
//!
//! Loads a mesh and material by path during `init` and binds them to the
//! sibling [`Renderer`]. Attach the renderer first; the model fails to
//! initialize when there is none.

use crate::assets::MaterialDesc;
use crate::ecs::component::{Component, ComponentContext, ComponentError};
use crate::ecs::components::Renderer;
use crate::render::{MaterialHandle, MeshHandle};

/// Static mesh loaded from an asset path
#[derive(Debug, Clone)]
pub struct Model {
    mesh_path: String,
    material: MaterialDesc,
    loaded: Option<(MeshHandle, MaterialHandle)>,
}

impl Model {
    /// Create a model from a mesh path and its material description
    pub fn new(mesh_path: impl Into<String>, material: MaterialDesc) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            material,
            loaded: None,
        }
    }

    /// Mesh path
    pub fn mesh_path(&self) -> &str {
        &self.mesh_path
    }

    /// Material description
    pub fn material_desc(&self) -> &MaterialDesc {
        &self.material
    }

    /// Handles resolved by `init`
    pub fn resources(&self) -> Option<(MeshHandle, MaterialHandle)> {
        self.loaded
    }
}

impl Component for Model {
    fn kind_name(&self) -> &'static str {
        "Model"
    }

    fn init(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        let mesh = ctx.assets().load_mesh(&self.mesh_path)?;
        let material = ctx.assets().load_material(&self.material)?;

        let renderer = ctx
            .sibling_mut::<Renderer>()
            .ok_or(ComponentError::MissingDependency { kind: "Renderer" })?;
        renderer.set_mesh(mesh);
        renderer.set_material(material);

        self.loaded = Some((mesh, material));
        log::debug!("Model '{}' bound to renderer", self.mesh_path);
        Ok(())
    }
}
