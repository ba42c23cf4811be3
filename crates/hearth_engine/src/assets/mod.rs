//! Asset loading boundary
//!
//! Mesh, material and font files are owned and parsed outside the scene
//! core. Components ask an [`AssetLoader`] for a resource by path during
//! `init` and get back either a handle or an explicit [`AssetError`].

pub mod font;
pub mod registry;

pub use font::{FontAtlas, GlyphInfo};
pub use registry::AssetRegistry;

use crate::render::{MaterialHandle, MeshHandle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shader and texture paths making up one material
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialDesc {
    /// Compiled vertex shader
    pub vertex_shader: String,
    /// Compiled pixel shader
    pub pixel_shader: String,
    /// Diffuse texture
    pub texture: String,
}

impl MaterialDesc {
    /// Create a material description
    pub fn new(
        vertex_shader: impl Into<String>,
        pixel_shader: impl Into<String>,
        texture: impl Into<String>,
    ) -> Self {
        Self {
            vertex_shader: vertex_shader.into(),
            pixel_shader: pixel_shader.into(),
            texture: texture.into(),
        }
    }
}

/// Loader for externally owned resources
pub trait AssetLoader {
    /// Load (or fetch a cached) mesh
    fn load_mesh(&mut self, path: &str) -> Result<MeshHandle, AssetError>;

    /// Load (or fetch a cached) material
    fn load_material(&mut self, desc: &MaterialDesc) -> Result<MaterialHandle, AssetError>;

    /// Load glyph metrics for a font atlas
    fn load_font(&mut self, path: &str) -> Result<FontAtlas, AssetError>;
}

/// Asset loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Nothing exists at the path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be used
    #[error("Invalid asset {path}: {reason}")]
    Invalid {
        /// Offending path
        path: String,
        /// What was wrong with it
        reason: String,
    },
}
