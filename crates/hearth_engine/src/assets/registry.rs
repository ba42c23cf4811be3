//! In-memory asset registry
//!
//! Resources are registered up front under their paths; loads resolve against
//! that table and fail with [`AssetError::NotFound`] for anything else. Used
//! by headless runs and tests in place of a file-backed loader.

use std::collections::HashMap;

use super::{AssetError, AssetLoader, FontAtlas, MaterialDesc};
use crate::render::{MaterialHandle, MeshHandle};

// Kept clear of the low ids that backends hand out for runtime meshes.
const HANDLE_BASE: u64 = 1 << 32;

/// Path-keyed table of preloaded resources
#[derive(Debug, Default)]
pub struct AssetRegistry {
    meshes: HashMap<String, MeshHandle>,
    materials: HashMap<MaterialDesc, MaterialHandle>,
    fonts: HashMap<String, FontAtlas>,
    corrupt: HashMap<String, String>,
    next_handle: u64,
    load_count: usize,
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        let id = HANDLE_BASE + self.next_handle;
        self.next_handle += 1;
        id
    }

    /// Register a mesh path and return its handle
    pub fn register_mesh(&mut self, path: impl Into<String>) -> MeshHandle {
        let path = path.into();
        if let Some(handle) = self.meshes.get(&path) {
            return *handle;
        }
        let handle = MeshHandle(self.allocate());
        self.meshes.insert(path, handle);
        handle
    }

    /// Register a material and return its handle
    pub fn register_material(&mut self, desc: MaterialDesc) -> MaterialHandle {
        if let Some(handle) = self.materials.get(&desc) {
            return *handle;
        }
        let handle = MaterialHandle(self.allocate());
        self.materials.insert(desc, handle);
        handle
    }

    /// Register a font atlas under a path
    pub fn register_font(&mut self, path: impl Into<String>, atlas: FontAtlas) {
        self.fonts.insert(path.into(), atlas);
    }

    /// Mark a path as present but unusable
    pub fn register_corrupt(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.corrupt.insert(path.into(), reason.into());
    }

    /// Number of successful loads served
    pub fn load_count(&self) -> usize {
        self.load_count
    }

    fn check_corrupt(&self, path: &str) -> Result<(), AssetError> {
        match self.corrupt.get(path) {
            Some(reason) => Err(AssetError::Invalid {
                path: path.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl AssetLoader for AssetRegistry {
    fn load_mesh(&mut self, path: &str) -> Result<MeshHandle, AssetError> {
        self.check_corrupt(path)?;
        let handle = *self
            .meshes
            .get(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        self.load_count += 1;
        log::debug!("Loaded mesh '{}' as {:?}", path, handle);
        Ok(handle)
    }

    fn load_material(&mut self, desc: &MaterialDesc) -> Result<MaterialHandle, AssetError> {
        for path in [&desc.vertex_shader, &desc.pixel_shader, &desc.texture] {
            self.check_corrupt(path)?;
        }
        let handle = *self
            .materials
            .get(desc)
            .ok_or_else(|| AssetError::NotFound(desc.vertex_shader.clone()))?;
        self.load_count += 1;
        log::debug!("Loaded material {:?} as {:?}", desc, handle);
        Ok(handle)
    }

    fn load_font(&mut self, path: &str) -> Result<FontAtlas, AssetError> {
        self.check_corrupt(path)?;
        let atlas = self
            .fonts
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        self.load_count += 1;
        log::debug!("Loaded font '{}' ({} glyphs)", path, atlas.glyph_count());
        Ok(atlas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_mesh_resolves() {
        let mut registry = AssetRegistry::new();
        let handle = registry.register_mesh("meshes/cube.mesh");

        assert_eq!(registry.register_mesh("meshes/cube.mesh"), handle);
        assert_eq!(registry.load_mesh("meshes/cube.mesh"), Ok(handle));
        assert_eq!(registry.load_count(), 1);
    }

    #[test]
    fn test_missing_and_corrupt_assets() {
        let mut registry = AssetRegistry::new();
        assert_eq!(
            registry.load_mesh("missing.mesh"),
            Err(AssetError::NotFound("missing.mesh".to_string()))
        );

        let desc = MaterialDesc::new("vs.cso", "ps.cso", "broken.png");
        registry.register_material(desc.clone());
        registry.register_corrupt("broken.png", "truncated header");

        assert!(matches!(
            registry.load_material(&desc),
            Err(AssetError::Invalid { .. })
        ));
        assert_eq!(registry.load_count(), 0);
    }
}
