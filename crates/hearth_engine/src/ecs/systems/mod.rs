//! ECS Systems module

pub mod render_collector;

pub use render_collector::RenderCollector;
