//! Text component
//!
//! Lays a string out as glyph quads from a [`FontAtlas`], builds a mesh
//! through the backend and binds it, together with its material, to the
//! sibling [`Renderer`]. Changing the string marks the mesh dirty; the next
//! update rebuilds it.
//!
//! The component owns its mesh. A rebuild destroys the previous one once the
//! renderer points at the replacement, and release destroys the last one.

use crate::assets::{FontAtlas, MaterialDesc};
use crate::ecs::component::{Component, ComponentContext, ComponentError, FrameServices};
use crate::ecs::components::Renderer;
use crate::render::{MaterialHandle, MeshHandle, Vertex};

const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Lay `text` out on the XY plane, two triangles per glyph
///
/// The pen starts at the origin and advances along +X by each glyph's width.
/// UVs are normalized by the atlas size. Characters without a glyph are
/// skipped.
pub fn layout_glyphs(font: &FontAtlas, text: &str) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(text.len() * 6);
    let mut pen = 0.0;

    for c in text.chars() {
        let Some(glyph) = font.glyph(c) else {
            log::trace!("No glyph for {:?}, skipping", c);
            continue;
        };

        let u0 = glyph.x / font.width;
        let u1 = (glyph.x + glyph.width) / font.width;
        let v0 = glyph.y / font.height;
        let v1 = (glyph.y + glyph.height) / font.height;

        let left = pen;
        let right = pen + glyph.width;
        let bottom = 0.0;
        let top = glyph.height;

        let lt = Vertex::new([left, top, 0.0], [u0, v0], NORMAL);
        let rt = Vertex::new([right, top, 0.0], [u1, v0], NORMAL);
        let lb = Vertex::new([left, bottom, 0.0], [u0, v1], NORMAL);
        let rb = Vertex::new([right, bottom, 0.0], [u1, v1], NORMAL);

        vertices.extend_from_slice(&[lt, rb, lb, lt, rt, rb]);
        pen += glyph.width;
    }

    vertices
}

/// World-space text
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    font_path: String,
    material: MaterialDesc,
    font: Option<FontAtlas>,
    material_handle: Option<MaterialHandle>,
    mesh: Option<MeshHandle>,
    dirty: bool,
}

impl Text {
    /// Create a text component
    pub fn new(text: impl Into<String>, font_path: impl Into<String>, material: MaterialDesc) -> Self {
        Self {
            text: text.into(),
            font_path: font_path.into(),
            material,
            font: None,
            material_handle: None,
            mesh: None,
            dirty: true,
        }
    }

    /// Current string
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the string; the mesh is rebuilt on the next update
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    /// Mesh built from the current string
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    fn rebuild(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        let font = self
            .font
            .as_ref()
            .ok_or_else(|| ComponentError::Custom(format!("font '{}' not loaded", self.font_path)))?;
        let material = self
            .material_handle
            .ok_or_else(|| ComponentError::Custom("text material not loaded".to_string()))?;

        let vertices = layout_glyphs(font, &self.text);
        let mesh = ctx.backend().create_mesh(&vertices)?;

        let Some(renderer) = ctx.sibling_mut::<Renderer>() else {
            ctx.backend().destroy_mesh(mesh)?;
            return Err(ComponentError::MissingDependency { kind: "Renderer" });
        };
        renderer.set_mesh(mesh);
        renderer.set_material(material);

        log::debug!("Built text mesh {:?} for {:?} ({} vertices)", mesh, self.text, vertices.len());
        self.dirty = false;
        if let Some(previous) = self.mesh.replace(mesh) {
            ctx.backend().destroy_mesh(previous)?;
        }
        Ok(())
    }
}

impl Component for Text {
    fn kind_name(&self) -> &'static str {
        "Text"
    }

    fn init(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        self.font = Some(ctx.assets().load_font(&self.font_path)?);
        self.material_handle = Some(ctx.assets().load_material(&self.material)?);
        self.rebuild(ctx)
    }

    fn update(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        if self.dirty {
            self.rebuild(ctx)?;
        }
        Ok(())
    }

    fn release(&mut self, services: &mut FrameServices<'_>) {
        if let Some(mesh) = self.mesh.take() {
            if let Err(error) = services.backend.destroy_mesh(mesh) {
                log::warn!("Failed to free text mesh {:?}: {}", mesh, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::GlyphInfo;

    fn font() -> FontAtlas {
        FontAtlas::new(64.0, 32.0)
            .with_glyph('H', GlyphInfo { x: 0.0, y: 0.0, width: 8.0, height: 16.0 })
            .with_glyph('i', GlyphInfo { x: 8.0, y: 0.0, width: 4.0, height: 16.0 })
    }

    #[test]
    fn test_two_triangles_per_glyph() {
        let vertices = layout_glyphs(&font(), "Hi");
        assert_eq!(vertices.len(), 12);
    }

    #[test]
    fn test_pen_advances_by_glyph_width() {
        let vertices = layout_glyphs(&font(), "Hi");

        let max_x_first = vertices[..6].iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let min_x_second = vertices[6..].iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x_second = vertices[6..].iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);

        assert_eq!(max_x_first, 8.0);
        assert_eq!(min_x_second, 8.0);
        assert_eq!(max_x_second, 12.0);
    }

    #[test]
    fn test_uvs_normalized_by_atlas() {
        let vertices = layout_glyphs(&font(), "i");
        let us: Vec<f32> = vertices.iter().map(|v| v.uv[0]).collect();
        let vs: Vec<f32> = vertices.iter().map(|v| v.uv[1]).collect();

        assert!(us.iter().all(|u| *u == 0.125 || *u == 0.1875));
        assert!(vs.iter().all(|v| *v == 0.0 || *v == 0.5));
    }

    #[test]
    fn test_unknown_glyphs_skipped() {
        assert_eq!(layout_glyphs(&font(), "H?i").len(), 12);
        assert!(layout_glyphs(&font(), "").is_empty());
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut text = Text::new("Hi", "fonts/mono.font", MaterialDesc::new("vs", "ps", "tex"));
        text.dirty = false;

        text.set_text("Hi");
        assert!(!text.dirty);

        text.set_text("Hello");
        assert!(text.dirty);
        assert_eq!(text.text(), "Hello");
    }
}
