//! ECS Components module
//!
//! Concrete component kinds shipped with the engine, plus the per-object
//! [`Transform`] (held directly by each game object, not in the component
//! list).

pub mod transform;
pub mod camera;
pub mod renderer;
pub mod model;
pub mod text;

pub use transform::Transform;
pub use camera::Camera;
pub use renderer::Renderer;
pub use model::Model;
pub use text::{Text, layout_glyphs};
