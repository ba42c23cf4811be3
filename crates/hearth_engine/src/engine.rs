//! Core engine implementation
//!
//! The [`Engine`] owns the scene and its collaborators and drives frames in a
//! fixed order:
//!
//! 0. `release` for components removed since the last frame, then `init` for
//!    components attached since
//! 1. `begin_scene(clear_color)` on the backend
//! 2. logic pass: every component's `update`, in traversal order
//! 3. collection pass: the first visible, initialized renderer of every game object
//! 4. one draw per collected renderer
//! 5. `end_scene()`
//!
//! `end_scene` runs even when a pass failed, so the backend is never left
//! inside an open frame.

use thiserror::Error;

use crate::application::{AppError, Application, FrameErrorAction};
use crate::assets::AssetLoader;
use crate::config::ConfigError;
use crate::core::config::EngineConfig;
use crate::ecs::systems::RenderCollector;
use crate::ecs::FrameServices;
use crate::render::DrawCommand;
use crate::scene::InitReport;
use crate::foundation::time::{FrameTime, TimeSource};
use crate::render::GraphicsBackend;
use crate::scene::{Scene, SceneError};

/// Counters for one completed frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Timing of the frame
    pub time: FrameTime,
    /// Components released before the frame's passes
    pub released: usize,
    /// Components initialized before the frame's passes
    pub initialized: usize,
    /// Components updated in the logic pass
    pub updated: usize,
    /// Draws submitted
    pub drawn: usize,
}

/// Why the frame loop stopped
#[derive(Debug)]
pub enum ExitStatus {
    /// The configured frame limit was reached
    FrameLimit,
    /// The application asked to quit
    Quit,
    /// A frame failed and the loop was terminated
    FrameError(SceneError),
}

/// Result of a completed run
#[derive(Debug)]
pub struct RunSummary {
    /// Frames attempted, including failed ones
    pub frames: u64,
    /// Frames that failed and were skipped
    pub failed_frames: u64,
    /// Why the loop stopped
    pub exit: ExitStatus,
}

impl RunSummary {
    /// Check if the loop stopped because of a frame error
    pub fn terminated_by_error(&self) -> bool {
        matches!(self.exit, ExitStatus::FrameError(_))
    }
}

/// Main engine struct
///
/// Generic over the graphics backend, the asset loader and the time source,
/// so the same loop runs against a device or headless in tests.
pub struct Engine<B, L, T> {
    config: EngineConfig,
    scene: Scene,
    backend: B,
    assets: L,
    timer: T,
    collector: RenderCollector,
    frames: u64,
}

impl<B, L, T> Engine<B, L, T>
where
    B: GraphicsBackend,
    L: AssetLoader,
    T: TimeSource,
{
    /// Create a new engine instance
    pub fn new(config: EngineConfig, backend: B, assets: L, timer: T) -> Result<Self, EngineError> {
        config.validate()?;
        let scene = Scene::with_config(config.window.title.clone(), &config.scene);

        Ok(Self {
            config,
            scene,
            backend,
            assets,
            timer,
            collector: RenderCollector::new(),
            frames: 0,
        })
    }

    /// Load and initialize the application's scene, then run frames until
    /// the application quits, the frame limit is hit or a frame fails fatally
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<RunSummary, EngineError> {
        log::info!("Loading scene '{}'", self.scene.name());
        app.load_scene(&mut self.scene, &self.config)
            .map_err(|e| EngineError::SceneLoad(e.to_string()))?;

        self.init().map_err(|e| {
            log::error!("Scene '{}' failed to load: {}", self.scene.name(), e);
            EngineError::SceneInit(e)
        })?;

        log::info!("Starting main loop...");
        let mut failed_frames = 0;
        let exit = loop {
            if self.config.max_frames.is_some_and(|max| self.frames >= max) {
                break ExitStatus::FrameLimit;
            }
            if app.should_quit() {
                break ExitStatus::Quit;
            }

            let time = self.timer.tick();
            app.update(&mut self.scene, time)
                .map_err(|e| EngineError::Application(e.to_string()))?;

            match self.frame(time) {
                Ok(stats) => app.on_frame_end(&stats),
                Err(error) => {
                    log::error!("Frame {} failed: {}", time.frame, error);
                    if error.is_fatal() || app.on_frame_error(&error) == FrameErrorAction::Terminate {
                        break ExitStatus::FrameError(error);
                    }
                    failed_frames += 1;
                }
            }
        };

        app.cleanup(&mut self.scene);
        let mut services = FrameServices::new(&mut self.backend, &mut self.assets, FrameTime::default());
        self.scene.release_removed(&mut services);
        log::info!("Engine stopped after {} frames ({:?})", self.frames, exit);

        Ok(RunSummary {
            frames: self.frames,
            failed_frames,
            exit,
        })
    }

    /// Initialize every component of the scene as it stands
    pub fn init(&mut self) -> Result<InitReport, SceneError> {
        let mut services = FrameServices::new(&mut self.backend, &mut self.assets, FrameTime::default());
        self.scene.init(&mut services)
    }

    /// Run one frame: pending releases and inits, then the bracketed
    /// update / collect / draw sequence
    pub fn frame(&mut self, time: FrameTime) -> Result<FrameStats, SceneError> {
        self.frames += 1;
        let mut services = FrameServices::new(&mut self.backend, &mut self.assets, time);

        let released = self.scene.release_removed(&mut services);
        let initialized = self.scene.init_pending(&mut services)?.initialized;

        services.backend.begin_scene(self.scene.clear_color())?;
        let passes = Self::run_passes(&mut self.scene, &mut self.collector, &mut services);
        let presented = services.backend.end_scene();

        let (updated, drawn) = passes?;
        presented?;

        log::trace!("Frame {}: {} updates, {} draws", time.frame, updated, drawn);
        Ok(FrameStats {
            time,
            released,
            initialized,
            updated,
            drawn,
        })
    }

    fn run_passes(
        scene: &mut Scene,
        collector: &mut RenderCollector,
        services: &mut FrameServices<'_>,
    ) -> Result<(usize, usize), SceneError> {
        let updated = scene.update(services)?;
        collector.collect(scene)?;
        let drawn = collector.submit(&mut *services.backend)?;
        Ok((updated, drawn))
    }

    /// The scene driven by this engine
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutable
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Graphics backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Asset loader
    pub fn assets_mut(&mut self) -> &mut L {
        &mut self.assets
    }

    /// Draws collected by the last frame, in submission order
    pub fn render_commands(&self) -> &[DrawCommand] {
        self.collector.commands()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The application failed to build its scene
    #[error("Scene load failed: {0}")]
    SceneLoad(String),

    /// The scene failed to initialize
    #[error("Scene init failed: {0}")]
    SceneInit(#[source] SceneError),

    /// Application logic failed between frames
    #[error("Application error: {0}")]
    Application(String),
}

impl From<AppError> for EngineError {
    fn from(error: AppError) -> Self {
        Self::Application(error.to_string())
    }
}
