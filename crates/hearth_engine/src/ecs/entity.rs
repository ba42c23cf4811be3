//! Game object implementation

use crate::ecs::components::Transform;
use crate::foundation::collections::{ComponentId, GameObjectId};

/// Named container of components
///
/// Names are labels, not keys: several objects may share one. Identity is the
/// [`GameObjectId`] handed out by the scene.
#[derive(Debug, Clone)]
pub struct GameObject {
    id: GameObjectId,
    name: String,
    transform: Transform,
    components: Vec<ComponentId>,
    in_scene: bool,
}

impl GameObject {
    pub(crate) fn new(id: GameObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            components: Vec::new(),
            in_scene: false,
        }
    }

    /// Get the object handle
    pub fn id(&self) -> GameObjectId {
        self.id
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get the transform for mutation
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Attached components in attachment order
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Whether the object has been added to its scene's traversal
    pub fn is_in_scene(&self) -> bool {
        self.in_scene
    }

    pub(crate) fn push_component(&mut self, id: ComponentId) {
        self.components.push(id);
    }

    pub(crate) fn set_in_scene(&mut self, in_scene: bool) {
        self.in_scene = in_scene;
    }
}
