//! Public rendering API
//!
//! This module contains the backend trait and the per-frame data that flows
//! across it.

pub mod render_backend;
pub mod frame_data;

pub use render_backend::{GraphicsBackend, BackendError, BackendResult, MeshHandle, MaterialHandle};
pub use frame_data::{DrawCommand, ObjectConstants};
