//! Scene errors

use thiserror::Error;

use crate::ecs::ComponentError;
use crate::foundation::collections::{ComponentId, GameObjectId};
use crate::render::BackendError;

/// Errors raised by scene operations and lifecycle passes
#[derive(Error, Debug)]
pub enum SceneError {
    /// The handle names no game object of this scene
    #[error("Unknown game object {0:?}")]
    UnknownGameObject(GameObjectId),

    /// The handle names no live component of this scene
    #[error("Unknown component {0:?}")]
    UnknownComponent(ComponentId),

    /// The game object already takes part in traversal
    #[error("Game object {0:?} is already in the scene")]
    AlreadyInScene(GameObjectId),

    /// Parenting would make an object its own ancestor
    #[error("Parenting {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle {
        /// Object being reparented
        child: GameObjectId,
        /// Requested parent
        parent: GameObjectId,
    },

    /// Camera matrices were requested with no active camera set
    #[error("Scene has no active camera")]
    NoActiveCamera,

    /// A component reached the update pass without a successful init
    #[error("{kind} on {object:?} was updated before init")]
    NotInitialized {
        /// Owner of the component
        object: GameObjectId,
        /// Component kind
        kind: &'static str,
    },

    /// A component's init failed
    #[error("Failed to initialize {kind} on {object:?}: {source}")]
    ComponentInit {
        /// Owner of the component
        object: GameObjectId,
        /// Component kind
        kind: &'static str,
        /// Underlying failure
        #[source]
        source: ComponentError,
    },

    /// A component's update failed
    #[error("Failed to update {kind} on {object:?}: {source}")]
    ComponentUpdate {
        /// Owner of the component
        object: GameObjectId,
        /// Component kind
        kind: &'static str,
        /// Underlying failure
        #[source]
        source: ComponentError,
    },

    /// Frame bracketing or draw submission failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl SceneError {
    /// Contract violations that must stop the frame loop regardless of policy
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotInitialized { .. })
    }
}
