//! Component storage
//!
//! Every component instance sits in one slot map keyed by [`ComponentId`].
//! Alongside it, a per-kind table maps each owner to its components of that
//! kind in attachment order, which keeps `get_component::<T>(owner)` O(1).
//!
//! Ids minted by another scene's storage never resolve here.
//!
//! While a component runs its lifecycle hook it is checked out of its slot
//! (`take` / `restore`), so the rest of the scene can be borrowed mutably
//! through the [`ComponentContext`](super::ComponentContext).

use std::any::TypeId;
use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use super::component::{Component, ComponentState};
use crate::foundation::collections::{ComponentId, ComponentKey, GameObjectId, ObjectKey, SceneId};

struct ComponentSlot {
    owner: GameObjectId,
    kind: TypeId,
    kind_name: &'static str,
    state: ComponentState,
    // `None` while checked out
    component: Option<Box<dyn Component>>,
}

/// Arena of components with per-kind owner indexes
pub struct ComponentStorage {
    scene: SceneId,
    slots: SlotMap<ComponentKey, ComponentSlot>,
    by_kind: HashMap<TypeId, SecondaryMap<ObjectKey, Vec<ComponentId>>>,
}

impl ComponentStorage {
    /// Create empty storage for the scene `scene`
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            slots: SlotMap::with_key(),
            by_kind: HashMap::new(),
        }
    }

    fn slot(&self, id: ComponentId) -> Option<&ComponentSlot> {
        if id.scene() != self.scene {
            return None;
        }
        self.slots.get(id.key())
    }

    fn slot_mut(&mut self, id: ComponentId) -> Option<&mut ComponentSlot> {
        if id.scene() != self.scene {
            return None;
        }
        self.slots.get_mut(id.key())
    }

    /// Store a component for `owner` in the `Attached` state
    pub fn insert<T: Component>(&mut self, owner: GameObjectId, component: T) -> ComponentId {
        let kind = TypeId::of::<T>();
        let kind_name = component.kind_name();
        let key = self.slots.insert(ComponentSlot {
            owner,
            kind,
            kind_name,
            state: ComponentState::Attached,
            component: Some(Box::new(component)),
        });
        let id = ComponentId::new(self.scene, key);

        let table = self.by_kind.entry(kind).or_default();
        match table.get_mut(owner.key()) {
            Some(ids) => ids.push(id),
            None => {
                table.insert(owner.key(), vec![id]);
            }
        }
        id
    }

    /// Borrow a component as its concrete kind
    pub fn get<T: Component>(&self, id: ComponentId) -> Option<&T> {
        let component: &dyn Component = self.slot(id)?.component.as_deref()?;
        component.downcast_ref::<T>()
    }

    /// Mutably borrow a component as its concrete kind
    pub fn get_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        let component: &mut dyn Component = self.slot_mut(id)?.component.as_deref_mut()?;
        component.downcast_mut::<T>()
    }

    /// All components of kind `T` on `owner`, in attachment order
    pub fn of_kind<T: Component>(&self, owner: GameObjectId) -> &[ComponentId] {
        if owner.scene() != self.scene {
            return &[];
        }
        self.by_kind
            .get(&TypeId::of::<T>())
            .and_then(|table| table.get(owner.key()))
            .map_or(&[], Vec::as_slice)
    }

    /// First component of kind `T` on `owner`
    pub fn first_of<T: Component>(&self, owner: GameObjectId) -> Option<ComponentId> {
        self.of_kind::<T>(owner).first().copied()
    }

    /// Owning game object
    pub fn owner(&self, id: ComponentId) -> Option<GameObjectId> {
        self.slot(id).map(|slot| slot.owner)
    }

    /// Concrete kind of a component
    pub fn kind(&self, id: ComponentId) -> Option<TypeId> {
        self.slot(id).map(|slot| slot.kind)
    }

    /// Kind name of a component
    pub fn kind_name(&self, id: ComponentId) -> Option<&'static str> {
        self.slot(id).map(|slot| slot.kind_name)
    }

    /// Lifecycle state of a component
    pub fn state(&self, id: ComponentId) -> Option<ComponentState> {
        self.slot(id).map(|slot| slot.state)
    }

    pub(crate) fn set_state(&mut self, id: ComponentId, state: ComponentState) {
        if let Some(slot) = self.slot_mut(id) {
            slot.state = state;
        }
    }

    /// Check a component out of its slot
    pub(crate) fn take(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        self.slot_mut(id)?.component.take()
    }

    /// Return a checked-out component
    pub(crate) fn restore(&mut self, id: ComponentId, component: Box<dyn Component>) {
        if let Some(slot) = self.slot_mut(id) {
            slot.component = Some(component);
        }
    }

    /// Detach a component from the arena and hand it back for release
    ///
    /// Returns `None` for unknown ids.
    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        if id.scene() != self.scene {
            return None;
        }
        let slot = self.slots.remove(id.key())?;
        if let Some(table) = self.by_kind.get_mut(&slot.kind) {
            if let Some(ids) = table.get_mut(slot.owner.key()) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    table.remove(slot.owner.key());
                }
            }
        }
        log::trace!("Detached {} {:?}", slot.kind_name, id);
        slot.component
    }

    /// Whether the id names a live component
    pub fn contains(&self, id: ComponentId) -> bool {
        self.slot(id).is_some()
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no components are stored
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
