//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that graphics backends must implement so the
//! frame loop can drive them without knowing the underlying API.

use super::frame_data::{DrawCommand, ObjectConstants};
use crate::render::primitives::{Color, Vertex};
use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Handle to a mesh resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a material resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Graphics backend trait
///
/// All calls happen on the single update thread, in the order laid down by
/// the frame loop. Implementations may assume nothing beyond that.
pub trait GraphicsBackend {
    /// Start a frame by clearing the render target
    fn begin_scene(&mut self, clear_color: Color) -> BackendResult<()>;

    /// Finish the frame and present it
    fn end_scene(&mut self) -> BackendResult<()>;

    /// Create a vertex buffer from CPU-side vertices
    fn create_mesh(&mut self, vertices: &[Vertex]) -> BackendResult<MeshHandle>;

    /// Free a vertex buffer created by [`create_mesh`](Self::create_mesh)
    fn destroy_mesh(&mut self, mesh: MeshHandle) -> BackendResult<()>;

    /// Upload per-object shader constants for the given material
    fn upload_constants(&mut self, material: MaterialHandle, constants: &ObjectConstants) -> BackendResult<()>;

    /// Submit one draw
    fn draw(&mut self, command: &DrawCommand) -> BackendResult<()>;
}

/// Graphics backend errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Device, buffer or shader resource creation failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// A handle does not name a live resource
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Frame bracketing was violated (e.g. draw outside begin/end)
    #[error("Invalid frame state: {0}")]
    InvalidFrameState(String),
}
