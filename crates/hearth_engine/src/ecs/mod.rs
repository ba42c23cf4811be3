//! Game object / component composition
//!
//! Game objects are named containers living in the scene arena. Each one owns
//! a [`Transform`] and an ordered list of components. Components are stored in
//! per-kind tables keyed by owner handle, so typed lookup never walks the
//! whole object and no component holds a pointer back to its owner.

pub mod entity;
pub mod component;
pub mod storage;
pub mod components;
pub mod systems;

pub use entity::GameObject;
pub use component::{Component, ComponentContext, ComponentError, ComponentState, FrameServices};
pub use storage::ComponentStorage;
pub use components::{Camera, Model, Renderer, Text, Transform};
pub use crate::foundation::collections::{ComponentHandle, ComponentId, GameObjectId, SceneId};
