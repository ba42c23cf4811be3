//! Application trait and lifecycle management

use thiserror::Error;

use crate::core::config::EngineConfig;
use crate::engine::{EngineError, FrameStats};
use crate::foundation::time::FrameTime;
use crate::scene::{Scene, SceneError};

/// What the engine does after a frame failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameErrorAction {
    /// Stop the frame loop and report the error
    #[default]
    Terminate,
    /// Drop the failed frame and carry on with the next one
    Continue,
}

/// Application lifecycle trait
///
/// Implement this trait to drive a scene with the [`Engine`](crate::Engine).
/// Structural changes to the scene (spawning, attaching, removing) belong in
/// [`load_scene`](Self::load_scene) and [`update`](Self::update), which run
/// between frames.
pub trait Application {
    /// Build the initial scene
    ///
    /// Called once before the scene is initialized. A failure here, or in
    /// the init pass that follows, keeps the frame loop from starting.
    fn load_scene(&mut self, scene: &mut Scene, config: &EngineConfig) -> Result<(), AppError>;

    /// Per-frame application logic, run before the frame's passes
    fn update(&mut self, _scene: &mut Scene, _time: FrameTime) -> Result<(), AppError> {
        Ok(())
    }

    /// Whether the loop should stop before the next frame
    fn should_quit(&self) -> bool {
        false
    }

    /// Decide how to proceed after a frame failed
    ///
    /// Not consulted for contract violations, which always terminate.
    fn on_frame_error(&mut self, _error: &SceneError) -> FrameErrorAction {
        FrameErrorAction::Terminate
    }

    /// Called after every completed frame
    fn on_frame_end(&mut self, _stats: &FrameStats) {}

    /// Called once when the loop has stopped
    fn cleanup(&mut self, _scene: &mut Scene) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Scene operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
