//! Scene management
//!
//! The [`Scene`] is the lifetime root of a world: it owns every game object
//! (in a slot map arena), every component (in [`ComponentStorage`]) and the
//! order in which objects are traversed each frame.
//!
//! ## Ownership
//!
//! ```text
//! Scene
//!  ├─ objects:    SlotMap<ObjectKey, GameObject>      (transform + component ids)
//!  ├─ order:      Vec<GameObjectId>                   (traversal order)
//!  ├─ components: ComponentStorage                    (per-kind tables)
//!  ├─ camera:     Option<ComponentHandle<Camera>>
//!  └─ removed:    Vec<(ComponentId, Box<dyn Component>)> (awaiting release)
//! ```
//!
//! Every id the scene hands out is stamped with its [`SceneId`], so an id
//! from another scene resolves to `None` here even when the slot keys match.
//!
//! Nothing holds a reference back into the scene. Components reach their
//! owner, its transform and the active camera through handle lookups made by
//! the [`ComponentContext`](crate::ecs::ComponentContext) while they run.
//!
//! Game objects can be created detached ([`Scene::create_game_object`]) and
//! given components before they join traversal with
//! [`Scene::add_game_object`]. Only objects in the scene are initialized,
//! updated and collected for drawing.
//!
//! Removing a game object detaches its components immediately. They wait in a
//! release queue until [`Scene::release_removed`] runs their `release` hooks
//! with the frame services, which the engine does at the start of each frame.

mod error;
mod lifecycle;

pub use error::SceneError;
pub use lifecycle::{InitFailure, InitReport};

use crate::core::config::{InitPolicy, SceneConfig};
use crate::ecs::components::{Camera, Renderer, Transform};
use crate::ecs::{Component, ComponentState, ComponentStorage, FrameServices, GameObject};
use crate::foundation::collections::{
    ComponentHandle, ComponentId, GameObjectId, ObjectKey, SceneId, SlotMap,
};
use crate::foundation::math::Mat4;
use crate::render::Color;

/// Aggregate of game objects, components and frame settings
pub struct Scene {
    id: SceneId,
    name: String,
    objects: SlotMap<ObjectKey, GameObject>,
    order: Vec<GameObjectId>,
    components: ComponentStorage,
    camera: Option<ComponentHandle<Camera>>,
    removed: Vec<(ComponentId, Box<dyn Component>)>,
    clear_color: Color,
    init_policy: InitPolicy,
}

impl Scene {
    /// Create an empty scene with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &SceneConfig::default())
    }

    /// Create an empty scene from configuration
    pub fn with_config(name: impl Into<String>, config: &SceneConfig) -> Self {
        let id = SceneId::next();
        Self {
            id,
            name: name.into(),
            objects: SlotMap::with_key(),
            order: Vec::new(),
            components: ComponentStorage::new(id),
            camera: None,
            removed: Vec::new(),
            clear_color: config.clear_color,
            init_policy: config.init_policy,
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity stamped into every id this scene hands out
    pub fn id(&self) -> SceneId {
        self.id
    }

    fn object(&self, id: GameObjectId) -> Option<&GameObject> {
        if id.scene() != self.id {
            return None;
        }
        self.objects.get(id.key())
    }

    fn object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        if id.scene() != self.id {
            return None;
        }
        self.objects.get_mut(id.key())
    }

    // ------------------------------------------------------------------
    // Game objects
    // ------------------------------------------------------------------

    /// Create a game object that is not yet part of traversal
    pub fn create_game_object(&mut self, name: impl Into<String>) -> GameObjectId {
        let name = name.into();
        let scene = self.id;
        let key = self
            .objects
            .insert_with_key(|key| GameObject::new(GameObjectId::new(scene, key), name));
        GameObjectId::new(scene, key)
    }

    /// Append a created game object to the traversal order
    pub fn add_game_object(&mut self, id: GameObjectId) -> Result<(), SceneError> {
        if id.scene() != self.id {
            return Err(SceneError::UnknownGameObject(id));
        }
        let object = self
            .objects
            .get_mut(id.key())
            .ok_or(SceneError::UnknownGameObject(id))?;
        if object.is_in_scene() {
            return Err(SceneError::AlreadyInScene(id));
        }
        object.set_in_scene(true);
        self.order.push(id);
        log::debug!("Added '{}' to scene '{}'", object.name(), self.name);
        Ok(())
    }

    /// Create a game object and add it to the scene in one step
    pub fn spawn(&mut self, name: impl Into<String>) -> GameObjectId {
        let id = self.create_game_object(name);
        if let Some(object) = self.object_mut(id) {
            object.set_in_scene(true);
        }
        self.order.push(id);
        id
    }

    /// Destroy a game object and detach all of its components
    ///
    /// Children are re-rooted: they keep their local transform and lose the
    /// parent link. The active camera is cleared if it belonged to the object.
    /// The detached components are released by the next
    /// [`release_removed`](Self::release_removed).
    pub fn remove_game_object(&mut self, id: GameObjectId) -> Result<(), SceneError> {
        if id.scene() != self.id {
            return Err(SceneError::UnknownGameObject(id));
        }
        let object = self
            .objects
            .remove(id.key())
            .ok_or(SceneError::UnknownGameObject(id))?;

        if let Some(camera) = self.camera {
            if self.components.owner(camera.id()) == Some(id) {
                log::debug!("Active camera removed with '{}'", object.name());
                self.camera = None;
            }
        }

        for component in object.components() {
            if let Some(detached) = self.components.remove(*component) {
                self.removed.push((*component, detached));
            }
        }

        self.order.retain(|other| *other != id);
        for (_, child) in self.objects.iter_mut() {
            if child.transform().parent() == Some(id) {
                child.transform_mut().set_parent(None);
            }
        }

        log::debug!("Removed '{}' from scene '{}'", object.name(), self.name);
        Ok(())
    }

    /// Run `release` on every component detached since the last call
    ///
    /// Components are released in removal order. Returns how many ran.
    pub fn release_removed(&mut self, services: &mut FrameServices<'_>) -> usize {
        let removed = std::mem::take(&mut self.removed);
        let count = removed.len();
        for (id, mut component) in removed {
            component.release(services);
            log::trace!("Released {} {:?}", component.kind_name(), id);
        }
        count
    }

    /// Number of detached components still waiting for `release`
    pub fn pending_releases(&self) -> usize {
        self.removed.len()
    }

    /// Look up a game object
    pub fn game_object(&self, id: GameObjectId) -> Option<&GameObject> {
        self.object(id)
    }

    /// Look up a game object mutably
    pub fn game_object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.object_mut(id)
    }

    /// Game objects in traversal order
    pub fn game_objects(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.order.iter().filter_map(|id| self.object(*id))
    }

    /// Traversal order
    pub fn game_object_ids(&self) -> &[GameObjectId] {
        &self.order
    }

    /// First game object in traversal order with the given name
    pub fn find_by_name(&self, name: &str) -> Option<GameObjectId> {
        self.game_objects()
            .find(|object| object.name() == name)
            .map(GameObject::id)
    }

    /// Number of game objects taking part in traversal
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no game object takes part in traversal
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach a component to a game object
    ///
    /// The value is moved into the scene, so one instance can never be bound
    /// to two owners. It starts out `Attached` and is initialized by the next
    /// [`init`](Self::init) or [`init_pending`](Self::init_pending).
    pub fn add_component<T: Component>(
        &mut self,
        owner: GameObjectId,
        component: T,
    ) -> Result<ComponentHandle<T>, SceneError> {
        if self.object(owner).is_none() {
            return Err(SceneError::UnknownGameObject(owner));
        }
        let id = self.components.insert(owner, component);
        if let Some(object) = self.object_mut(owner) {
            object.push_component(id);
        }
        log::trace!(
            "Attached {} to {:?}",
            self.components.kind_name(id).unwrap_or("component"),
            owner
        );
        Ok(ComponentHandle::new(id))
    }

    /// First component of kind `T` on `owner`, or `None`
    pub fn get_component<T: Component>(&self, owner: GameObjectId) -> Option<ComponentHandle<T>> {
        self.components.first_of::<T>(owner).map(ComponentHandle::new)
    }

    /// All components of kind `T` on `owner`, in attachment order
    pub fn get_components_of<T: Component>(&self, owner: GameObjectId) -> Vec<ComponentHandle<T>> {
        self.components
            .of_kind::<T>(owner)
            .iter()
            .copied()
            .map(ComponentHandle::new)
            .collect()
    }

    /// All components on `owner`, in attachment order
    pub fn components(&self, owner: GameObjectId) -> &[ComponentId] {
        self.object(owner).map_or(&[], |object| object.components())
    }

    /// Resolve a typed handle
    ///
    /// Returns `None` for released components, for handles issued by another
    /// scene, and for the component that is currently running its own hook.
    pub fn component<T: Component>(&self, handle: ComponentHandle<T>) -> Option<&T> {
        self.components.get::<T>(handle.id())
    }

    /// Resolve a typed handle mutably
    pub fn component_mut<T: Component>(&mut self, handle: ComponentHandle<T>) -> Option<&mut T> {
        self.components.get_mut::<T>(handle.id())
    }

    /// Lifecycle state of a component
    pub fn component_state(&self, id: impl Into<ComponentId>) -> Option<ComponentState> {
        self.components.state(id.into())
    }

    /// Kind name of a component
    pub fn component_kind_name(&self, id: impl Into<ComponentId>) -> Option<&'static str> {
        self.components.kind_name(id.into())
    }

    /// Owning game object of a component
    pub fn component_owner(&self, id: impl Into<ComponentId>) -> Option<GameObjectId> {
        self.components.owner(id.into())
    }

    /// Total number of live components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Local transform of a game object
    pub fn transform(&self, id: GameObjectId) -> Option<&Transform> {
        self.object(id).map(GameObject::transform)
    }

    /// Local transform of a game object, mutable
    pub fn transform_mut(&mut self, id: GameObjectId) -> Option<&mut Transform> {
        self.object_mut(id).map(GameObject::transform_mut)
    }

    /// Parent `child` under `parent`, or detach it with `None`
    pub fn set_parent(&mut self, child: GameObjectId, parent: Option<GameObjectId>) -> Result<(), SceneError> {
        if self.object(child).is_none() {
            return Err(SceneError::UnknownGameObject(child));
        }

        if let Some(parent) = parent {
            if self.object(parent).is_none() {
                return Err(SceneError::UnknownGameObject(parent));
            }
            let mut ancestor = Some(parent);
            while let Some(current) = ancestor {
                if current == child {
                    return Err(SceneError::HierarchyCycle { child, parent });
                }
                ancestor = self.object(current).and_then(|o| o.transform().parent());
            }
        }

        if let Some(object) = self.object_mut(child) {
            object.transform_mut().set_parent(parent);
        }
        Ok(())
    }

    /// World matrix of a game object: `parent.world * local`, up to the root
    pub fn world_matrix(&self, id: GameObjectId) -> Result<Mat4, SceneError> {
        let mut object = self.object(id).ok_or(SceneError::UnknownGameObject(id))?;
        let mut world = object.transform().local_matrix();

        // set_parent rejects cycles, so the walk is bounded by the arena size
        let mut depth = 0;
        while let Some(parent) = object.transform().parent() {
            object = self.object(parent).ok_or(SceneError::UnknownGameObject(parent))?;
            world = object.transform().local_matrix() * world;

            depth += 1;
            if depth > self.objects.len() {
                return Err(SceneError::HierarchyCycle { child: id, parent });
            }
        }
        Ok(world)
    }

    // ------------------------------------------------------------------
    // Camera and frame settings
    // ------------------------------------------------------------------

    /// Make a camera component the active camera
    ///
    /// The handle must name a live camera issued by this scene. Its owner does
    /// not have to take part in traversal.
    pub fn set_camera(&mut self, camera: ComponentHandle<Camera>) -> Result<(), SceneError> {
        if self.components.get::<Camera>(camera.id()).is_none() {
            return Err(SceneError::UnknownComponent(camera.id()));
        }
        log::debug!("Active camera set to {:?}", camera.id());
        self.camera = Some(camera);
        Ok(())
    }

    /// Active camera
    pub fn camera(&self) -> Option<ComponentHandle<Camera>> {
        self.camera
    }

    /// Clear the active camera
    pub fn clear_camera(&mut self) {
        self.camera = None;
    }

    /// View and projection matrices of the active camera
    pub fn camera_matrices(&self) -> Result<(Mat4, Mat4), SceneError> {
        let handle = self.camera.ok_or(SceneError::NoActiveCamera)?;
        let camera = self
            .components
            .get::<Camera>(handle.id())
            .ok_or(SceneError::UnknownComponent(handle.id()))?;
        let owner = self
            .components
            .owner(handle.id())
            .ok_or(SceneError::UnknownComponent(handle.id()))?;

        let view = Camera::view_matrix(&self.world_matrix(owner)?);
        Ok((view, camera.projection_matrix()))
    }

    /// Color the backend clears to at the start of each frame
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Set the clear color
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// How init failures are handled
    pub fn init_policy(&self) -> InitPolicy {
        self.init_policy
    }

    /// Set how init failures are handled
    pub fn set_init_policy(&mut self, policy: InitPolicy) {
        self.init_policy = policy;
    }

    /// First visible, initialized renderer of every game object, in traversal order
    ///
    /// This is the second pass of a frame and runs after the update pass. A
    /// hidden or failed renderer is passed over in favor of the next one on
    /// the same object; at most one renderer per object is collected.
    pub fn collect_renderers(&self) -> Vec<ComponentHandle<Renderer>> {
        self.order
            .iter()
            .filter_map(|owner| {
                self.components
                    .of_kind::<Renderer>(*owner)
                    .iter()
                    .copied()
                    .find(|id| self.is_drawable(*id))
            })
            .map(ComponentHandle::new)
            .collect()
    }

    fn is_drawable(&self, id: ComponentId) -> bool {
        self.components.state(id) == Some(ComponentState::Initialized)
            && self
                .components
                .get::<Renderer>(id)
                .is_some_and(Renderer::is_visible)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("objects", &self.order.len())
            .field("components", &self.components.len())
            .field("camera", &self.camera)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetRegistry;
    use crate::foundation::math::Vec3;
    use crate::render::HeadlessBackend;
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);
    impl Component for Marker {}

    #[test]
    fn test_get_component_returns_same_instance() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");

        assert!(scene.get_component::<Marker>(object).is_none());

        let added = scene.add_component(object, Marker(7)).unwrap();
        let found = scene.get_component::<Marker>(object).unwrap();
        assert_eq!(added, found);
        assert_eq!(scene.component(found), Some(&Marker(7)));

        scene.component_mut(added).unwrap().0 = 8;
        assert_eq!(scene.component(found), Some(&Marker(8)));
    }

    #[test]
    fn test_first_of_kind_wins() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let first = scene.add_component(object, Marker(1)).unwrap();
        let second = scene.add_component(object, Marker(2)).unwrap();

        assert_eq!(scene.get_component::<Marker>(object), Some(first));
        assert_eq!(scene.get_components_of::<Marker>(object), vec![first, second]);
    }

    #[test]
    fn test_attachment_order_preserved() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let a = scene.add_component(object, Marker(1)).unwrap();
        let b = scene.add_component(object, Renderer::new()).unwrap();
        let c = scene.add_component(object, Marker(3)).unwrap();

        assert_eq!(scene.components(object), &[a.id(), b.id(), c.id()]);
    }

    #[test]
    fn test_unknown_owner_rejected() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        scene.remove_game_object(object).unwrap();

        assert!(matches!(
            scene.add_component(object, Marker(1)),
            Err(SceneError::UnknownGameObject(_))
        ));
    }

    #[test]
    fn test_add_game_object_once() {
        let mut scene = Scene::new("test");
        let object = scene.create_game_object("Detached");
        assert!(scene.is_empty());

        scene.add_game_object(object).unwrap();
        assert_eq!(scene.game_object_ids(), &[object]);
        assert!(scene.game_object(object).unwrap().is_in_scene());
        assert!(matches!(
            scene.add_game_object(object),
            Err(SceneError::AlreadyInScene(_))
        ));
    }

    #[test]
    fn test_world_matrix_without_parent_is_local() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let transform = scene.transform_mut(object).unwrap();
        transform.set_position_xyz(1.0, 2.0, 3.0);
        transform.set_rotation_degrees(0.0, 90.0, 0.0);

        let local = scene.transform(object).unwrap().local_matrix();
        assert_relative_eq!(scene.world_matrix(object).unwrap(), local);
    }

    #[test]
    fn test_world_matrix_three_level_chain() {
        let mut scene = Scene::new("test");
        let root = scene.spawn("Root");
        let middle = scene.spawn("Middle");
        let leaf = scene.spawn("Leaf");
        scene.set_parent(middle, Some(root)).unwrap();
        scene.set_parent(leaf, Some(middle)).unwrap();

        scene.transform_mut(root).unwrap().set_position_xyz(10.0, 0.0, 0.0);
        scene.transform_mut(root).unwrap().set_uniform_scale(2.0);
        scene.transform_mut(middle).unwrap().set_rotation_degrees(0.0, 0.0, 90.0);
        scene.transform_mut(leaf).unwrap().set_position_xyz(1.0, 0.0, 0.0);

        let root_local = scene.transform(root).unwrap().local_matrix();
        let middle_local = scene.transform(middle).unwrap().local_matrix();
        let leaf_local = scene.transform(leaf).unwrap().local_matrix();

        let world = scene.world_matrix(leaf).unwrap();
        assert_relative_eq!(world, root_local * (middle_local * leaf_local), epsilon = 1e-5);
        assert_relative_eq!(world, (root_local * middle_local) * leaf_local, epsilon = 1e-5);

        // leaf at +1 x, rotated 90 degrees about z, scaled by 2, shifted by 10
        let origin = world.transform_point(&crate::foundation::math::Point3::origin());
        assert_relative_eq!(origin.coords, Vec3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_parent_mutation_visible_immediately() {
        let mut scene = Scene::new("test");
        let parent = scene.spawn("Parent");
        let child = scene.spawn("Child");
        scene.set_parent(child, Some(parent)).unwrap();

        scene.transform_mut(parent).unwrap().set_position_xyz(0.0, 5.0, 0.0);
        let world = scene.world_matrix(child).unwrap();
        assert_relative_eq!(world[(1, 3)], 5.0);
    }

    #[test]
    fn test_hierarchy_cycle_rejected() {
        let mut scene = Scene::new("test");
        let a = scene.spawn("A");
        let b = scene.spawn("B");
        scene.set_parent(b, Some(a)).unwrap();

        assert!(matches!(
            scene.set_parent(a, Some(b)),
            Err(SceneError::HierarchyCycle { .. })
        ));
        assert!(matches!(
            scene.set_parent(a, Some(a)),
            Err(SceneError::HierarchyCycle { .. })
        ));
    }

    #[test]
    fn test_remove_reroots_children_and_clears_camera() {
        let mut scene = Scene::new("test");
        let parent = scene.spawn("Parent");
        let child = scene.spawn("Child");
        scene.set_parent(child, Some(parent)).unwrap();
        let camera = scene.add_component(parent, Camera::default()).unwrap();
        scene.set_camera(camera).unwrap();

        scene.remove_game_object(parent).unwrap();

        assert!(scene.camera().is_none());
        assert!(scene.component(camera).is_none());
        assert_eq!(scene.transform(child).unwrap().parent(), None);
        assert_eq!(scene.game_object_ids(), &[child]);
        assert_eq!(scene.component_count(), 0);
    }

    #[test]
    fn test_camera_matrices_follow_owner() {
        let mut scene = Scene::new("test");
        assert!(matches!(scene.camera_matrices(), Err(SceneError::NoActiveCamera)));

        let eye = scene.spawn("Camera");
        scene.transform_mut(eye).unwrap().set_position_xyz(0.0, 0.0, 5.0);
        let camera = scene.add_component(eye, Camera::default()).unwrap();
        scene.set_camera(camera).unwrap();

        let (view, projection) = scene.camera_matrices().unwrap();
        assert_relative_eq!(view[(2, 3)], -5.0, epsilon = 1e-5);
        assert_relative_eq!(projection, Camera::default().projection_matrix());
    }

    #[test]
    fn test_set_camera_requires_camera() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let camera = scene.add_component(object, Camera::default()).unwrap();
        scene.remove_game_object(object).unwrap();

        assert!(matches!(
            scene.set_camera(camera),
            Err(SceneError::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_find_by_name() {
        let mut scene = Scene::new("test");
        let cube = scene.spawn("Cube");
        scene.spawn("Text");

        assert_eq!(scene.find_by_name("Cube"), Some(cube));
        assert_eq!(scene.find_by_name("Missing"), None);
    }

    #[test]
    fn test_ids_from_another_scene_do_not_resolve() {
        let mut first = Scene::new("first");
        let mut second = Scene::new("second");
        let a = first.spawn("A");
        let camera_a = first.add_component(a, Camera::default()).unwrap();
        let b = second.spawn("B");
        second
            .add_component(b, Camera::perspective(90.0, 1.0, 0.1, 100.0))
            .unwrap();

        assert!(second.game_object(a).is_none());
        assert!(second.component(camera_a).is_none());
        assert!(second.get_component::<Camera>(a).is_none());
        assert!(second.world_matrix(a).is_err());
        assert!(matches!(
            second.set_camera(camera_a),
            Err(SceneError::UnknownComponent(_))
        ));
        assert!(second.camera().is_none());
        assert!(matches!(
            second.add_component(a, Marker(1)),
            Err(SceneError::UnknownGameObject(_))
        ));
        assert!(second.set_parent(b, Some(a)).is_err());
        assert!(second.remove_game_object(a).is_err());
        assert_eq!(second.len(), 1);

        assert_eq!(first.game_object(a).unwrap().name(), "A");
        assert!(first.component(camera_a).is_some());
    }

    struct Releasing(Rc<Cell<u32>>);

    impl Component for Releasing {
        fn release(&mut self, _services: &mut FrameServices<'_>) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_removed_components_wait_for_release() {
        let released = Rc::new(Cell::new(0));
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let handle = scene.add_component(object, Releasing(Rc::clone(&released))).unwrap();

        scene.remove_game_object(object).unwrap();
        assert!(scene.component(handle).is_none());
        assert_eq!(scene.pending_releases(), 1);
        assert_eq!(released.get(), 0);

        let mut backend = HeadlessBackend::new();
        let mut assets = AssetRegistry::new();
        let mut services = FrameServices::new(&mut backend, &mut assets, Default::default());
        assert_eq!(scene.release_removed(&mut services), 1);
        assert_eq!(scene.release_removed(&mut services), 0);
        assert_eq!(released.get(), 1);
        assert_eq!(scene.pending_releases(), 0);
    }

    #[test]
    fn test_hidden_first_renderer_yields_to_next() {
        let mut scene = Scene::new("test");
        let object = scene.spawn("Object");
        let hidden = scene.add_component(object, Renderer::new()).unwrap();
        let shown = scene.add_component(object, Renderer::new()).unwrap();
        scene.add_component(object, Renderer::new()).unwrap();

        let mut backend = HeadlessBackend::new();
        let mut assets = AssetRegistry::new();
        let mut services = FrameServices::new(&mut backend, &mut assets, Default::default());
        scene.init(&mut services).unwrap();
        scene.component_mut(hidden).unwrap().set_visible(false);

        assert_eq!(scene.collect_renderers(), vec![shown]);

        scene.component_mut(hidden).unwrap().set_visible(true);
        assert_eq!(scene.collect_renderers(), vec![hidden]);
    }
}
