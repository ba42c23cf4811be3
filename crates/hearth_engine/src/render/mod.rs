//! # Rendering Boundary
//!
//! The scene core never talks to a graphics API directly. Everything it needs
//! from the GPU side goes through the [`GraphicsBackend`] trait:
//! - **Frame bracketing**: `begin_scene(clear_color)` / `end_scene()`
//! - **Resource creation**: meshes built at runtime (e.g. text glyph quads)
//! - **Per-object constants**: world/view/projection uploads during update
//! - **Draw submission**: one [`DrawCommand`] per collected renderer
//!
//! [`HeadlessBackend`] implements the trait without a device and records every
//! call, which makes full frames observable in tests and demos.

pub mod api;
pub mod primitives;
pub mod backends;

pub use api::{
    GraphicsBackend, BackendError, BackendResult, MeshHandle, MaterialHandle,
    DrawCommand, ObjectConstants,
};
pub use primitives::{Color, Vertex};
pub use backends::{HeadlessBackend, BackendCall};
