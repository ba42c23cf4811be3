//! Headless graphics backend
//!
//! Performs no GPU work. Every call is appended to a log so that the order of
//! begin/update/draw/end can be asserted, and failures can be injected to
//! exercise the error paths of the frame loop.

use std::collections::HashSet;

use crate::foundation::collections::GameObjectId;
use crate::render::api::{
    BackendError, BackendResult, DrawCommand, GraphicsBackend, MaterialHandle, MeshHandle,
    ObjectConstants,
};
use crate::render::primitives::{Color, Vertex};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `begin_scene` with its clear color
    BeginScene(Color),
    /// `end_scene`
    EndScene,
    /// `create_mesh` with the vertex count and the handle handed out
    CreateMesh {
        /// Number of vertices uploaded
        vertex_count: usize,
        /// Handle returned to the caller
        handle: MeshHandle,
    },
    /// `destroy_mesh`
    DestroyMesh(MeshHandle),
    /// `upload_constants`
    UploadConstants {
        /// Target material
        material: MaterialHandle,
        /// Uploaded block
        constants: ObjectConstants,
    },
    /// `draw` for the given object
    Draw(GameObjectId),
}

/// Recording backend without a device
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    calls: Vec<BackendCall>,
    next_mesh: u64,
    live_meshes: HashSet<MeshHandle>,
    in_frame: bool,
    frames_presented: u64,
    fail_mesh_creation: bool,
    fail_draw_after: Option<usize>,
    draws_this_frame: usize,
}

impl HeadlessBackend {
    /// Create a backend with an empty call log
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `create_mesh` fail
    pub fn with_mesh_creation_failure(mut self) -> Self {
        self.fail_mesh_creation = true;
        self
    }

    /// Make the draw after `count` successful draws in a frame fail
    pub fn with_draw_failure_after(mut self, count: usize) -> Self {
        self.fail_draw_after = Some(count);
        self
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Objects drawn so far, in submission order
    pub fn drawn_objects(&self) -> Vec<GameObjectId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Draw(object) => Some(*object),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls matching the predicate
    pub fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Meshes created and not yet destroyed
    pub fn live_meshes(&self) -> usize {
        self.live_meshes.len()
    }

    /// Frames completed with `end_scene`
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Drop the call log
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn begin_scene(&mut self, clear_color: Color) -> BackendResult<()> {
        if self.in_frame {
            return Err(BackendError::InvalidFrameState(
                "begin_scene called twice without end_scene".to_string(),
            ));
        }
        self.in_frame = true;
        self.draws_this_frame = 0;
        self.calls.push(BackendCall::BeginScene(clear_color));
        Ok(())
    }

    fn end_scene(&mut self) -> BackendResult<()> {
        if !self.in_frame {
            return Err(BackendError::InvalidFrameState(
                "end_scene called without begin_scene".to_string(),
            ));
        }
        self.in_frame = false;
        self.frames_presented += 1;
        self.calls.push(BackendCall::EndScene);
        Ok(())
    }

    fn create_mesh(&mut self, vertices: &[Vertex]) -> BackendResult<MeshHandle> {
        if self.fail_mesh_creation {
            return Err(BackendError::ResourceCreationFailed(format!(
                "vertex buffer of {} vertices",
                vertices.len()
            )));
        }
        let handle = MeshHandle(self.next_mesh);
        self.next_mesh += 1;
        self.live_meshes.insert(handle);
        self.calls.push(BackendCall::CreateMesh {
            vertex_count: vertices.len(),
            handle,
        });
        Ok(handle)
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) -> BackendResult<()> {
        if !self.live_meshes.remove(&mesh) {
            return Err(BackendError::InvalidHandle(format!("{mesh:?} is not a live mesh")));
        }
        self.calls.push(BackendCall::DestroyMesh(mesh));
        Ok(())
    }

    fn upload_constants(&mut self, material: MaterialHandle, constants: &ObjectConstants) -> BackendResult<()> {
        self.calls.push(BackendCall::UploadConstants {
            material,
            constants: *constants,
        });
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> BackendResult<()> {
        if !self.in_frame {
            return Err(BackendError::InvalidFrameState(
                "draw outside begin_scene/end_scene".to_string(),
            ));
        }
        if self.fail_draw_after == Some(self.draws_this_frame) {
            return Err(BackendError::RenderingFailed(format!(
                "injected failure drawing {:?}",
                command.object
            )));
        }
        self.draws_this_frame += 1;
        self.calls.push(BackendCall::Draw(command.object));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn test_frame_bracketing_enforced() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.end_scene().is_err());

        backend.begin_scene(Color::BLACK).unwrap();
        assert!(backend.begin_scene(Color::BLACK).is_err());
        backend.end_scene().unwrap();

        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(
            backend.calls(),
            &[BackendCall::BeginScene(Color::BLACK), BackendCall::EndScene]
        );
    }

    #[test]
    fn test_mesh_handles_are_unique() {
        let mut backend = HeadlessBackend::new();
        let a = backend.create_mesh(&[]).unwrap();
        let b = backend.create_mesh(&[]).unwrap();
        assert_ne!(a, b);

        let mut failing = HeadlessBackend::new().with_mesh_creation_failure();
        assert!(matches!(
            failing.create_mesh(&[]),
            Err(BackendError::ResourceCreationFailed(_))
        ));
    }

    #[test]
    fn test_destroy_mesh_tracks_live_meshes() {
        let mut backend = HeadlessBackend::new();
        let a = backend.create_mesh(&[]).unwrap();
        let b = backend.create_mesh(&[]).unwrap();
        assert_eq!(backend.live_meshes(), 2);

        backend.destroy_mesh(a).unwrap();
        assert_eq!(backend.live_meshes(), 1);
        assert!(matches!(backend.destroy_mesh(a), Err(BackendError::InvalidHandle(_))));
        assert_eq!(backend.calls().last(), Some(&BackendCall::DestroyMesh(a)));

        backend.destroy_mesh(b).unwrap();
        assert_eq!(backend.live_meshes(), 0);
    }

    #[test]
    fn test_injected_draw_failure() {
        let object = Scene::new("test").spawn("Object");
        let command = DrawCommand {
            object,
            mesh: None,
            material: None,
            constants: ObjectConstants::default(),
        };

        let mut backend = HeadlessBackend::new().with_draw_failure_after(1);
        backend.begin_scene(Color::BLACK).unwrap();
        backend.draw(&command).unwrap();
        assert!(backend.draw(&command).is_err());
        assert_eq!(backend.drawn_objects(), vec![object]);
    }
}
