//! Component trait and lifecycle
//!
//! A component goes through `Created -> Attached -> Initialized -> Updating*`
//! and is released when its owner leaves the scene:
//! - **Created**: a plain value, owned by whoever constructed it
//! - **Attached**: moved into the scene by `Scene::add_component`. The value
//!   is consumed, so it can never be bound to a second owner.
//! - **Initialized**: `init` returned `Ok`; from now on `update` runs once per
//!   frame
//! - **Failed**: `init` returned `Err` under the degraded init policy; the
//!   component is skipped by every later pass
//!
//! Removing the owner detaches its components at once. Their `release` hook
//! runs at the start of the next frame, when the backend is available to free
//! what they created.

use std::any::{Any, TypeId};

use thiserror::Error;

use crate::assets::{AssetError, AssetLoader};
use crate::ecs::components::Transform;
use crate::ecs::entity::GameObject;
use crate::foundation::collections::{ComponentHandle, ComponentId, GameObjectId};
use crate::foundation::math::Mat4;
use crate::foundation::time::FrameTime;
use crate::render::{BackendError, GraphicsBackend};
use crate::scene::{Scene, SceneError};

/// Type-erasure helper so `dyn Component` can be downcast
pub trait AsAny: Any {
    /// Borrow as `dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow mutably as `dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior unit attached to exactly one game object
pub trait Component: AsAny {
    /// Human-readable kind, used in logs and errors
    fn kind_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs exactly once, after attach and after the owner joined the scene
    fn init(&mut self, _ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Runs once per frame after a successful `init`
    fn update(&mut self, _ctx: &mut ComponentContext<'_, '_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Runs once after the owner was removed from the scene
    ///
    /// Free backend resources the component created here.
    fn release(&mut self, _services: &mut FrameServices<'_>) {}
}

impl dyn Component {
    /// Concrete type of the erased component
    pub fn kind(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// Downcast to a concrete kind
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast mutably to a concrete kind
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Lifecycle state tracked by the scene for each attached component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    /// Bound to an owner, `init` not yet run
    Attached,
    /// `init` succeeded
    Initialized,
    /// `init` failed and the scene continued without it
    Failed,
}

/// Errors raised by component `init` / `update`
#[derive(Error, Debug)]
pub enum ComponentError {
    /// A required asset could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// A graphics backend call failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A sibling component this one relies on is not attached
    #[error("Missing required component: {kind}")]
    MissingDependency {
        /// Kind that was looked for
        kind: &'static str,
    },

    /// A scene lookup failed
    #[error(transparent)]
    Scene(Box<SceneError>),

    /// Component-specific failure
    #[error("{0}")]
    Custom(String),
}

impl From<SceneError> for ComponentError {
    fn from(error: SceneError) -> Self {
        Self::Scene(Box::new(error))
    }
}

/// Externally owned collaborators handed to every lifecycle call
pub struct FrameServices<'a> {
    /// Graphics backend for resource creation and constant uploads
    pub backend: &'a mut dyn GraphicsBackend,
    /// Asset loader for meshes, materials and fonts
    pub assets: &'a mut dyn AssetLoader,
    /// Timing of the current frame (zeroed during startup init)
    pub time: FrameTime,
}

impl<'a> FrameServices<'a> {
    /// Bundle the collaborators for one pass
    pub fn new(backend: &'a mut dyn GraphicsBackend, assets: &'a mut dyn AssetLoader, time: FrameTime) -> Self {
        Self { backend, assets, time }
    }
}

/// View of the world a component gets while it runs
///
/// Resolves the owner, its transform and the scene lazily through handles.
/// It exposes transform mutation and component lookup but no way to attach,
/// detach or remove anything, so the sets being traversed cannot change
/// underneath the pass.
pub struct ComponentContext<'a, 'b> {
    scene: &'a mut Scene,
    services: &'a mut FrameServices<'b>,
    owner: GameObjectId,
    component: ComponentId,
}

impl<'a, 'b> ComponentContext<'a, 'b> {
    pub(crate) fn new(
        scene: &'a mut Scene,
        services: &'a mut FrameServices<'b>,
        owner: GameObjectId,
        component: ComponentId,
    ) -> Self {
        Self {
            scene,
            services,
            owner,
            component,
        }
    }

    /// Handle of the owning game object
    pub fn owner(&self) -> GameObjectId {
        self.owner
    }

    /// Id of the running component
    pub fn component_id(&self) -> ComponentId {
        self.component
    }

    /// The owning game object
    pub fn game_object(&self) -> Result<&GameObject, SceneError> {
        self.scene
            .game_object(self.owner)
            .ok_or(SceneError::UnknownGameObject(self.owner))
    }

    /// The owner's transform
    pub fn transform(&self) -> Result<&Transform, SceneError> {
        self.game_object().map(GameObject::transform)
    }

    /// The owner's transform, mutable
    pub fn transform_mut(&mut self) -> Result<&mut Transform, SceneError> {
        let owner = self.owner;
        self.scene
            .transform_mut(owner)
            .ok_or(SceneError::UnknownGameObject(owner))
    }

    /// Another object's transform, mutable
    pub fn transform_of_mut(&mut self, object: GameObjectId) -> Result<&mut Transform, SceneError> {
        self.scene
            .transform_mut(object)
            .ok_or(SceneError::UnknownGameObject(object))
    }

    /// The owner's world matrix, including all ancestors
    pub fn world_matrix(&self) -> Result<Mat4, SceneError> {
        self.scene.world_matrix(self.owner)
    }

    /// Read-only access to the whole scene
    pub fn scene(&self) -> &Scene {
        &*self.scene
    }

    /// View and projection of the scene's active camera
    pub fn camera_matrices(&self) -> Result<(Mat4, Mat4), SceneError> {
        self.scene.camera_matrices()
    }

    /// First sibling of kind `T` on the owner
    pub fn sibling<T: Component>(&self) -> Option<&T> {
        let handle = self.scene.get_component::<T>(self.owner)?;
        self.scene.component(handle)
    }

    /// First sibling of kind `T` on the owner, mutable
    pub fn sibling_mut<T: Component>(&mut self) -> Option<&mut T> {
        let handle = self.scene.get_component::<T>(self.owner)?;
        self.scene.component_mut(handle)
    }

    /// Any component in the scene by handle, mutable
    pub fn component_mut<T: Component>(&mut self, handle: ComponentHandle<T>) -> Option<&mut T> {
        self.scene.component_mut(handle)
    }

    /// Graphics backend
    pub fn backend(&mut self) -> &mut dyn GraphicsBackend {
        &mut *self.services.backend
    }

    /// Asset loader
    pub fn assets(&mut self) -> &mut dyn AssetLoader {
        &mut *self.services.assets
    }

    /// Timing of the current frame
    pub fn time(&self) -> FrameTime {
        self.services.time
    }
}
