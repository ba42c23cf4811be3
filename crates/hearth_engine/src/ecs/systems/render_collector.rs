//! # Render Collector
//!
//! Second traversal pass of a frame. After every component has run its
//! update, the collector walks the scene again, picks up each game object's
//! first [`Renderer`] and turns it into a [`DrawCommand`]. World, view and
//! projection are read at this point, after all logic has run. Submission
//! then issues one draw per command, in collection order.

use crate::ecs::components::Renderer;
use crate::foundation::math::Mat4;
use crate::render::{BackendResult, DrawCommand, GraphicsBackend, ObjectConstants};
use crate::scene::{Scene, SceneError};

/// Collects draw commands from the scene's renderers and submits them
#[derive(Debug, Default)]
pub struct RenderCollector {
    commands: Vec<DrawCommand>,
}

impl RenderCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the command list from the scene, in game object insertion order
    pub fn collect(&mut self, scene: &Scene) -> Result<&[DrawCommand], SceneError> {
        self.commands.clear();

        let (view, projection) = match scene.camera_matrices() {
            Ok(matrices) => matrices,
            Err(SceneError::NoActiveCamera) => (Mat4::identity(), Mat4::identity()),
            Err(e) => return Err(e),
        };

        for handle in scene.collect_renderers() {
            let Some(owner) = scene.component_owner(handle) else {
                continue;
            };
            let Some(renderer) = scene.component::<Renderer>(handle) else {
                continue;
            };
            let constants = ObjectConstants::new(&scene.world_matrix(owner)?, &view, &projection);
            self.commands.push(renderer.draw_command(owner, constants));
        }

        log::trace!("Collected {} draw commands", self.commands.len());
        Ok(&self.commands)
    }

    /// Commands from the last collection
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Issue one draw per collected command; returns the number of draws
    pub fn submit(&self, backend: &mut dyn GraphicsBackend) -> BackendResult<usize> {
        for command in &self.commands {
            if !command.is_complete() {
                log::trace!("Drawing {:?} with unbound resources", command.object);
            }
            backend.draw(command)?;
        }
        Ok(self.commands.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BackendCall, HeadlessBackend, MaterialHandle, MeshHandle};

    #[test]
    fn test_collects_renderers_in_insertion_order() {
        let mut scene = Scene::new("collect");
        let a = scene.spawn("A");
        let b = scene.spawn("B");
        let c = scene.spawn("C");
        scene.add_component(b, Renderer::with_resources(MeshHandle(1), MaterialHandle(1))).unwrap();
        scene.add_component(c, Renderer::new()).unwrap();
        scene.add_component(a, crate::ecs::components::Camera::default()).unwrap();

        let mut backend = HeadlessBackend::new();
        let mut assets = crate::assets::AssetRegistry::new();
        let mut services = crate::ecs::FrameServices::new(&mut backend, &mut assets, Default::default());
        scene.init(&mut services).unwrap();

        let mut collector = RenderCollector::new();
        let objects: Vec<_> = collector.collect(&scene).unwrap().iter().map(|cmd| cmd.object).collect();
        assert_eq!(objects, vec![b, c]);

        backend.begin_scene(scene.clear_color()).unwrap();
        assert_eq!(collector.submit(&mut backend).unwrap(), 2);
        backend.end_scene().unwrap();
        assert_eq!(backend.count(|call| matches!(call, BackendCall::Draw(_))), 2);
    }

    #[test]
    fn test_hidden_renderer_skipped() {
        let mut scene = Scene::new("hidden");
        let a = scene.spawn("A");
        let renderer = scene.add_component(a, Renderer::new()).unwrap();

        let mut backend = HeadlessBackend::new();
        let mut assets = crate::assets::AssetRegistry::new();
        let mut services = crate::ecs::FrameServices::new(&mut backend, &mut assets, Default::default());
        scene.init(&mut services).unwrap();

        scene.component_mut(renderer).unwrap().set_visible(false);
        let mut collector = RenderCollector::new();
        assert!(collector.collect(&scene).unwrap().is_empty());
    }
}
