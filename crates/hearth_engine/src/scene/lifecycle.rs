//! Init and update passes
//!
//! Both passes visit game objects in traversal order and, within each object,
//! components in attachment order. A component is checked out of storage for
//! the duration of its hook so its [`ComponentContext`] can hold the scene
//! mutably; it is always put back before the result is inspected.

use super::{Scene, SceneError};
use crate::core::config::InitPolicy;
use crate::ecs::{ComponentContext, ComponentError, ComponentState, FrameServices};
use crate::foundation::collections::{ComponentId, GameObjectId};

/// A component whose init failed under [`InitPolicy::Degraded`]
#[derive(Debug)]
pub struct InitFailure {
    /// Owner of the component
    pub object: GameObjectId,
    /// Component id
    pub component: ComponentId,
    /// Component kind
    pub kind: &'static str,
    /// What went wrong
    pub error: ComponentError,
}

/// Outcome of an init pass
#[derive(Debug, Default)]
pub struct InitReport {
    /// Components that initialized successfully
    pub initialized: usize,
    /// Components marked `Failed` and skipped from now on
    pub failures: Vec<InitFailure>,
}

impl InitReport {
    /// Check if every component initialized
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Hook {
    Init,
    Update,
}

impl Scene {
    /// Initialize every component of every game object in the scene
    ///
    /// Under [`InitPolicy::ShortCircuit`] the first failure is returned and no
    /// later component is initialized. Under [`InitPolicy::Degraded`] failing
    /// components are marked `Failed`, logged and reported, and the pass
    /// carries on.
    pub fn init(&mut self, services: &mut FrameServices<'_>) -> Result<InitReport, SceneError> {
        log::info!("Initializing scene '{}' ({} game objects)", self.name, self.order.len());
        let report = self.init_pending(services)?;
        log::info!(
            "Scene '{}' initialized: {} components, {} failed",
            self.name,
            report.initialized,
            report.failures.len()
        );
        Ok(report)
    }

    /// Initialize components still in the `Attached` state
    ///
    /// Runs before every frame so objects added between frames complete init
    /// before their first update. Already initialized or failed components
    /// are left alone.
    pub fn init_pending(&mut self, services: &mut FrameServices<'_>) -> Result<InitReport, SceneError> {
        let mut report = InitReport::default();

        for index in 0..self.order.len() {
            let object = self.order[index];
            let count = self.components(object).len();

            for slot in 0..count {
                let id = self.components(object)[slot];
                if self.components.state(id) != Some(ComponentState::Attached) {
                    continue;
                }
                let kind = self.components.kind_name(id).unwrap_or("component");

                match self.run_hook(services, object, id, Hook::Init) {
                    Ok(()) => {
                        self.components.set_state(id, ComponentState::Initialized);
                        report.initialized += 1;
                        log::debug!("Initialized {} on {:?}", kind, object);
                    }
                    Err(error) => {
                        self.components.set_state(id, ComponentState::Failed);
                        match self.init_policy {
                            InitPolicy::ShortCircuit => {
                                log::error!("Failed to initialize {} on {:?}: {}", kind, object, error);
                                return Err(SceneError::ComponentInit {
                                    object,
                                    kind,
                                    source: error,
                                });
                            }
                            InitPolicy::Degraded => {
                                log::warn!("Skipping {} on {:?}: init failed: {}", kind, object, error);
                                report.failures.push(InitFailure {
                                    object,
                                    component: id,
                                    kind,
                                    error,
                                });
                            }
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// Logic pass: run `update` on every initialized component
    ///
    /// Returns the number of components updated. The first failure aborts
    /// the pass. Reaching a component that never initialized is a contract
    /// violation reported as [`SceneError::NotInitialized`].
    pub fn update(&mut self, services: &mut FrameServices<'_>) -> Result<usize, SceneError> {
        let mut updated = 0;

        for index in 0..self.order.len() {
            let object = self.order[index];
            let count = self.components(object).len();

            for slot in 0..count {
                let id = self.components(object)[slot];
                let kind = self.components.kind_name(id).unwrap_or("component");

                match self.components.state(id) {
                    Some(ComponentState::Initialized) => {}
                    Some(ComponentState::Failed) => continue,
                    Some(ComponentState::Attached) => {
                        return Err(SceneError::NotInitialized { object, kind });
                    }
                    None => return Err(SceneError::UnknownComponent(id)),
                }

                self.run_hook(services, object, id, Hook::Update)
                    .map_err(|source| SceneError::ComponentUpdate { object, kind, source })?;
                updated += 1;
            }
        }

        Ok(updated)
    }

    fn run_hook(
        &mut self,
        services: &mut FrameServices<'_>,
        owner: GameObjectId,
        id: ComponentId,
        hook: Hook,
    ) -> Result<(), ComponentError> {
        let mut component = self
            .components
            .take(id)
            .ok_or(SceneError::UnknownComponent(id))?;

        let result = {
            let mut ctx = ComponentContext::new(self, services, owner, id);
            match hook {
                Hook::Init => component.init(&mut ctx),
                Hook::Update => component.update(&mut ctx),
            }
        };

        self.components.restore(id, component);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetRegistry;
    use crate::ecs::Component;
    use crate::render::HeadlessBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        fail_init: bool,
        log: Log,
    }

    impl Recorder {
        fn new(label: &'static str, log: &Log) -> Self {
            Self { label, fail_init: false, log: Rc::clone(log) }
        }

        fn failing(label: &'static str, log: &Log) -> Self {
            Self { fail_init: true, ..Self::new(label, log) }
        }
    }

    impl Component for Recorder {
        fn kind_name(&self) -> &'static str {
            "Recorder"
        }

        fn init(&mut self, _ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
            self.log.borrow_mut().push(format!("init {}", self.label));
            if self.fail_init {
                return Err(ComponentError::Custom(format!("{} refused", self.label)));
            }
            Ok(())
        }

        fn update(&mut self, ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
            self.log.borrow_mut().push(format!("update {}", self.label));
            ctx.transform_mut()?.translate(crate::foundation::math::Vec3::new(1.0, 0.0, 0.0));
            Ok(())
        }
    }

    fn run<R>(scene: &mut Scene, f: impl FnOnce(&mut Scene, &mut FrameServices<'_>) -> R) -> R {
        let mut backend = HeadlessBackend::new();
        let mut assets = AssetRegistry::new();
        let mut services = FrameServices::new(&mut backend, &mut assets, Default::default());
        f(scene, &mut services)
    }

    #[test]
    fn test_short_circuit_stops_at_first_failure() {
        let log = Log::default();
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let x = scene.add_component(object, Recorder::new("X", &log)).unwrap();
        let y = scene.add_component(object, Recorder::failing("Y", &log)).unwrap();
        let z = scene.add_component(object, Recorder::new("Z", &log)).unwrap();

        let result = run(&mut scene, |scene, services| scene.init(services));

        assert!(matches!(result, Err(SceneError::ComponentInit { kind: "Recorder", .. })));
        assert_eq!(*log.borrow(), vec!["init X", "init Y"]);
        assert_eq!(scene.component_state(x), Some(ComponentState::Initialized));
        assert_eq!(scene.component_state(y), Some(ComponentState::Failed));
        assert_eq!(scene.component_state(z), Some(ComponentState::Attached));
    }

    #[test]
    fn test_degraded_skips_failed_components() {
        let log = Log::default();
        let mut scene = Scene::new("test");
        scene.set_init_policy(InitPolicy::Degraded);
        let object = scene.spawn("Object");
        scene.add_component(object, Recorder::new("X", &log)).unwrap();
        let y = scene.add_component(object, Recorder::failing("Y", &log)).unwrap();
        scene.add_component(object, Recorder::new("Z", &log)).unwrap();

        let report = run(&mut scene, |scene, services| scene.init(services)).unwrap();
        assert_eq!(report.initialized, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].component, y.id());

        let updated = run(&mut scene, |scene, services| scene.update(services)).unwrap();
        assert_eq!(updated, 2);
        assert_eq!(
            *log.borrow(),
            vec!["init X", "init Y", "init Z", "update X", "update Z"]
        );
    }

    #[test]
    fn test_init_runs_once() {
        let log = Log::default();
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        scene.add_component(object, Recorder::new("X", &log)).unwrap();

        run(&mut scene, |scene, services| scene.init(services)).unwrap();
        let again = run(&mut scene, |scene, services| scene.init_pending(services)).unwrap();

        assert_eq!(again.initialized, 0);
        assert_eq!(*log.borrow(), vec!["init X"]);
    }

    #[test]
    fn test_update_before_init_is_fatal() {
        let log = Log::default();
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        scene.add_component(object, Recorder::new("X", &log)).unwrap();

        let error = run(&mut scene, |scene, services| scene.update(services)).unwrap_err();
        assert!(matches!(error, SceneError::NotInitialized { kind: "Recorder", .. }));
        assert!(error.is_fatal());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_detached_objects_are_not_initialized() {
        let log = Log::default();
        let mut scene = Scene::new("test");
        let detached = scene.create_game_object("Detached");
        let recorder = scene.add_component(detached, Recorder::new("D", &log)).unwrap();

        run(&mut scene, |scene, services| scene.init(services)).unwrap();
        assert_eq!(scene.component_state(recorder), Some(ComponentState::Attached));

        scene.add_game_object(detached).unwrap();
        run(&mut scene, |scene, services| scene.init_pending(services)).unwrap();
        assert_eq!(scene.component_state(recorder), Some(ComponentState::Initialized));
    }

    #[test]
    fn test_update_mutates_owner_transform() {
        let log = Log::default();
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        scene.add_component(object, Recorder::new("X", &log)).unwrap();

        run(&mut scene, |scene, services| {
            scene.init(services)?;
            scene.update(services)?;
            scene.update(services)
        })
        .unwrap();

        assert_eq!(scene.transform(object).unwrap().position().x, 2.0);
    }
}
