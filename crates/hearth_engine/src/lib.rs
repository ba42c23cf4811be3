//! # Hearth Engine
//!
//! Scene composition core for a frame-synchronous game engine.
//!
//! ## Features
//!
//! - **Scene Arena**: game objects and components addressed by stable handles
//! - **Typed Components**: O(1) lookup of the first component of a kind
//! - **Transform Hierarchy**: world matrices composed through parents on read
//! - **Two-Pass Frames**: all logic updates run before any draw is collected
//! - **Backend Boundary**: graphics and assets behind traits, with a headless
//!   recorder for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hearth_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn load_scene(&mut self, scene: &mut Scene, _config: &EngineConfig) -> Result<(), AppError> {
//!         let cube = scene.spawn("Cube");
//!         scene.add_component(cube, Renderer::new())?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(60);
//!     let mut engine = Engine::new(config, HeadlessBackend::new(), AssetRegistry::new(), Timer::new())?;
//!     let summary = engine.run(&mut MyApp)?;
//!     println!("ran {} frames", summary.frames);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod scene;
pub mod assets;
pub mod render;

mod application;
mod engine;

pub use application::{Application, AppError, FrameErrorAction};
pub use engine::{Engine, EngineError, ExitStatus, FrameStats, RunSummary};
pub use crate::core::config::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, FrameErrorAction,
        Engine, EngineConfig, EngineError, ExitStatus, FrameStats, RunSummary,
        foundation::{
            math::{Vec3, Mat4, Quat},
            time::{FrameTime, TimeSource, Timer, FixedStepTimer},
        },
        ecs::{
            Component, ComponentContext, ComponentError, ComponentHandle, ComponentId,
            ComponentState, FrameServices, GameObject, GameObjectId,
            Camera, Model, Renderer, Text, Transform,
        },
        scene::{Scene, SceneError, InitReport},
        assets::{AssetLoader, AssetRegistry, AssetError, FontAtlas, GlyphInfo, MaterialDesc},
        render::{GraphicsBackend, HeadlessBackend, Color, MeshHandle, MaterialHandle},
        core::config::{WindowConfig, SceneConfig, InitPolicy, Config},
    };
}
