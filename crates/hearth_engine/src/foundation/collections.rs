//! Handle types for the scene arena
//!
//! Game objects and components live in slot maps owned by the
//! [`Scene`](crate::scene::Scene). Everything else refers to them through
//! these generational keys, so stale handles resolve to `None` instead of
//! dangling.
//!
//! Every id also carries the [`SceneId`] of the scene that issued it. Two
//! scenes hand out identical slot keys, so the stamp is what keeps a handle
//! from one scene from resolving in another.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Slot key of a game object inside its scene's arena
    pub struct ObjectKey;

    /// Slot key of a component inside its scene's storage
    pub struct ComponentKey;
}

/// Identity of one scene instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    /// Allocate an id no other scene in this process has
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable identity of a game object within its scene
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameObjectId {
    scene: SceneId,
    key: ObjectKey,
}

impl GameObjectId {
    pub(crate) fn new(scene: SceneId, key: ObjectKey) -> Self {
        Self { scene, key }
    }

    /// Scene that issued this id
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub(crate) fn key(&self) -> ObjectKey {
        self.key
    }
}

impl fmt::Debug for GameObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameObjectId({:?}@{})", self.key.0, self.scene.0)
    }
}

/// Stable identity of one attached component instance
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    scene: SceneId,
    key: ComponentKey,
}

impl ComponentId {
    pub(crate) fn new(scene: SceneId, key: ComponentKey) -> Self {
        Self { scene, key }
    }

    /// Scene that issued this id
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub(crate) fn key(&self) -> ComponentKey {
        self.key
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({:?}@{})", self.key.0, self.scene.0)
    }
}

/// Typed handle to a component of concrete kind `T`
///
/// Two handles compare equal exactly when they name the same instance.
pub struct ComponentHandle<T> {
    id: ComponentId,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> ComponentHandle<T> {
    pub(crate) fn new(id: ComponentId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the untyped component id
    pub fn id(&self) -> ComponentId {
        self.id
    }
}

// Manual impls: derives would add unwanted `T: Clone`/`T: Eq` bounds.
impl<T> Clone for ComponentHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ComponentHandle<T> {}

impl<T> PartialEq for ComponentHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ComponentHandle<T> {}

impl<T> std::hash::Hash for ComponentHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for ComponentHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentHandle")
            .field(&self.id)
            .finish()
    }
}

impl<T> From<ComponentHandle<T>> for ComponentId {
    fn from(handle: ComponentHandle<T>) -> Self {
        handle.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_handle_identity() {
        let scene = SceneId::next();
        let mut keys: SlotMap<ComponentKey, ()> = SlotMap::with_key();
        let a = ComponentId::new(scene, keys.insert(()));
        let b = ComponentId::new(scene, keys.insert(()));

        let ha = ComponentHandle::<Marker>::new(a);
        let ha_copy = ha;
        let hb = ComponentHandle::<Marker>::new(b);

        assert_eq!(ha, ha_copy);
        assert_ne!(ha, hb);
        assert_eq!(ComponentId::from(hb), b);
    }

    #[test]
    fn test_same_key_different_scene_differs() {
        let mut first: SlotMap<ObjectKey, ()> = SlotMap::with_key();
        let mut second: SlotMap<ObjectKey, ()> = SlotMap::with_key();
        let key_a = first.insert(());
        let key_b = second.insert(());
        assert_eq!(key_a, key_b);

        let a = GameObjectId::new(SceneId::next(), key_a);
        let b = GameObjectId::new(SceneId::next(), key_b);
        assert_ne!(a, b);
        assert_ne!(a.scene(), b.scene());
    }
}
