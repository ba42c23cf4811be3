//! Rendering primitives shared by the scene and the backend

pub mod color;
pub mod vertex;

pub use color::Color;
pub use vertex::Vertex;
