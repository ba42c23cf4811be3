//! Cube demo application
//!
//! Builds a scene with a camera, a textured cube and a line of world-space
//! text, then runs it on the headless backend and logs frame statistics.
//!
//! Usage: `cube_demo [config.toml|config.ron]`

use hearth_engine::prelude::*;

const CUBE_MESH: &str = "assets/meshes/cube.mesh";
const FONT: &str = "assets/textures/fonts/consolas.font";
const DEFAULT_FRAMES: u64 = 300;

/// Rotates its game object around the Y axis
struct Spin {
    degrees_per_second: f32,
}

impl Component for Spin {
    fn kind_name(&self) -> &'static str {
        "Spin"
    }

    fn update(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        let angle = self.degrees_per_second.to_radians() * ctx.time().delta;
        let transform = ctx.transform_mut()?;
        let step = Quat::from_axis_angle(&Vec3::y_axis(), angle);
        transform.set_rotation(step * transform.rotation());
        Ok(())
    }
}

fn default_material() -> MaterialDesc {
    MaterialDesc::new(
        "assets/shaders/default_vs.cso",
        "assets/shaders/default_ps.cso",
        "assets/textures/placeholder.png",
    )
}

fn font_material() -> MaterialDesc {
    MaterialDesc::new(
        "assets/shaders/font_vs.cso",
        "assets/shaders/font_ps.cso",
        "assets/textures/fonts/consolas.png",
    )
}

/// Stand-in for the asset pipeline: everything the scene loads, preregistered
fn demo_assets() -> AssetRegistry {
    let mut assets = AssetRegistry::new();
    assets.register_mesh(CUBE_MESH);
    assets.register_material(default_material());
    assets.register_material(font_material());

    let printable: String = (' '..='~').collect();
    assets.register_font(FONT, FontAtlas::monospace_grid(&printable, 16.0, 32.0, 16));
    assets
}

struct CubeApp {
    frame_count: u32,
    last_report: f32,
    total_draws: usize,
}

impl CubeApp {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_report: 0.0,
            total_draws: 0,
        }
    }
}

impl Application for CubeApp {
    fn load_scene(&mut self, scene: &mut Scene, config: &EngineConfig) -> Result<(), AppError> {
        let camera = scene.spawn("Camera");
        let camera_handle = scene.add_component(camera, Camera::for_window(&config.window))?;
        if let Some(transform) = scene.transform_mut(camera) {
            transform.set_position_xyz(3.75, 5.0, 3.75);
            transform.set_rotation_degrees(45.0, 225.0, 0.0);
        }

        let cube = scene.spawn("Cube");
        scene.add_component(cube, Renderer::new())?;
        scene.add_component(cube, Model::new(CUBE_MESH, default_material()))?;
        scene.add_component(cube, Spin { degrees_per_second: 45.0 })?;

        let text = scene.spawn("Text");
        scene.add_component(text, Renderer::new())?;
        scene.add_component(text, Text::new("Hello World", FONT, font_material()))?;
        if let Some(transform) = scene.transform_mut(text) {
            transform.set_position_xyz(1.0, 1.0, 1.0);
            transform.set_uniform_scale(0.005);
        }

        scene.set_camera(camera_handle)?;
        log::info!("Loaded scene with {} game objects", scene.len());
        Ok(())
    }

    fn on_frame_end(&mut self, stats: &FrameStats) {
        self.frame_count += 1;
        self.total_draws += stats.drawn;

        if stats.time.elapsed - self.last_report >= 1.0 {
            let fps = self.frame_count as f32 / (stats.time.elapsed - self.last_report);
            log::info!(
                "FPS: {:.1} | frame time: {:.2}ms | draws: {} | updates: {}",
                fps,
                1000.0 / fps,
                stats.drawn,
                stats.updated
            );
            self.frame_count = 0;
            self.last_report = stats.time.elapsed;
        }
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        log::info!(
            "Shutting down scene '{}' after {} draws",
            scene.name(),
            self.total_draws
        );
    }
}

fn load_config() -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default().with_window(WindowConfig::new("Cube Demo", 800, 600)),
    };
    if config.max_frames.is_none() {
        config.max_frames = Some(DEFAULT_FRAMES);
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    hearth_engine::foundation::logging::init(&config.log_level);

    log::info!("Starting cube demo ({:?} frames)", config.max_frames);

    let mut engine = Engine::new(
        config,
        HeadlessBackend::new(),
        demo_assets(),
        FixedStepTimer::from_rate(60.0),
    )?;
    let mut app = CubeApp::new();
    let summary = engine.run(&mut app)?;

    log::info!(
        "Presented {} frames ({} failed)",
        engine.backend().frames_presented(),
        summary.failed_frames
    );
    match summary.exit {
        ExitStatus::FrameError(error) => Err(error.into()),
        _ => Ok(()),
    }
}
