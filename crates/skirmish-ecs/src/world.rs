//! World - entity store with stable IDs and named entities

use crate::component::{Component, ComponentNames};
use crate::entity::EntityInfo;
use bimap::BiMap;
use hecs::{ComponentError, Ref, RefMut};
use skirmish_core::{EntityId, Result, SkirmishError};
use std::collections::HashMap;

/// The entity store for Skirmish
///
/// Wraps hecs::World with:
/// - Stable EntityId mapping
/// - Named entity lookup (names appear in error messages)
/// - Spawn-ordered iteration so every tick visits entities deterministically
pub struct World {
    /// The underlying hecs world
    world: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    /// Entity name <-> EntityId mapping
    name_map: BiMap<String, EntityId>,
    /// Component names attached to each entity
    components: HashMap<EntityId, ComponentNames>,
    /// Entities in spawn order
    order: Vec<EntityId>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            name_map: BiMap::new(),
            components: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Spawn a new, componentless entity with a unique name
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();

        if self.name_map.contains_left(&name) {
            return Err(SkirmishError::DuplicateEntityName(name));
        }

        let entity_id = EntityId::new();
        let hecs_entity = self.world.spawn(());

        self.id_map.insert(entity_id, hecs_entity);
        self.name_map.insert(name, entity_id);
        self.components.insert(entity_id, ComponentNames::new());
        self.order.push(entity_id);

        Ok(entity_id)
    }

    /// Despawn an entity and all of its components
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        let hecs_entity = self.hecs_entity(id)?;

        self.world
            .despawn(hecs_entity)
            .map_err(|_| SkirmishError::EntityNotFound(id.to_string()))?;

        self.id_map.remove_by_left(&id);
        self.name_map.remove_by_right(&id);
        self.components.remove(&id);
        self.order.retain(|e| *e != id);

        Ok(())
    }

    /// Attach a component, silently replacing any existing one of the same type
    pub fn add<T: Component>(&mut self, id: EntityId, component: T) -> Result<()> {
        let hecs_entity = self.hecs_entity(id)?;

        if self.has::<T>(id) {
            log::trace!("replacing component '{}' on '{}'", T::NAME, self.label(id));
        }

        self.world
            .insert_one(hecs_entity, component)
            .map_err(|_| SkirmishError::EntityNotFound(id.to_string()))?;

        if let Some(names) = self.components.get_mut(&id) {
            names.insert(T::NAME);
        }
        Ok(())
    }

    /// Borrow a component; fails with `MissingComponent` when absent
    pub fn get<T: Component>(&self, id: EntityId) -> Result<Ref<'_, T>> {
        let hecs_entity = self.hecs_entity(id)?;
        self.world
            .get::<&T>(hecs_entity)
            .map_err(|err| self.component_error::<T>(id, err))
    }

    /// Mutably borrow a component; fails with `MissingComponent` when absent
    ///
    /// Borrows are checked at runtime per component type, so different
    /// component types of the same entity may be borrowed at once.
    pub fn get_mut<T: Component>(&self, id: EntityId) -> Result<RefMut<'_, T>> {
        let hecs_entity = self.hecs_entity(id)?;
        self.world
            .get::<&mut T>(hecs_entity)
            .map_err(|err| self.component_error::<T>(id, err))
    }

    /// Non-failing presence probe
    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        self.id_map
            .get_by_left(&id)
            .and_then(|e| self.world.entity(*e).ok())
            .map(|entity| entity.has::<T>())
            .unwrap_or(false)
    }

    /// Detach a component, returning it if it was present
    pub fn remove<T: Component>(&mut self, id: EntityId) -> Result<Option<T>> {
        let hecs_entity = self.hecs_entity(id)?;
        match self.world.remove_one::<T>(hecs_entity) {
            Ok(component) => {
                if let Some(names) = self.components.get_mut(&id) {
                    names.remove(T::NAME);
                }
                Ok(Some(component))
            }
            Err(ComponentError::MissingComponent(_)) => Ok(None),
            Err(ComponentError::NoSuchEntity) => {
                Err(SkirmishError::EntityNotFound(id.to_string()))
            }
        }
    }

    /// Get entity ID by name
    pub fn get_id(&self, name: &str) -> Option<EntityId> {
        self.name_map.get_by_left(name).copied()
    }

    /// Get entity name by ID
    pub fn get_name(&self, id: EntityId) -> Option<&str> {
        self.name_map.get_by_right(&id).map(|s| s.as_str())
    }

    /// Name of the entity, falling back to its raw ID
    pub fn label(&self, id: EntityId) -> String {
        match self.get_name(id) {
            Some(name) => name.to_string(),
            None => id.to_string(),
        }
    }

    /// All entity IDs in spawn order
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    /// Get info about all entities, in spawn order
    pub fn all_entities(&self) -> Vec<EntityInfo> {
        self.order
            .iter()
            .map(|id| {
                let components = self
                    .components
                    .get(id)
                    .map(|c| c.to_vec())
                    .unwrap_or_default();
                EntityInfo::new(*id, self.label(*id)).with_components(components)
            })
            .collect()
    }

    /// Get number of entities
    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    /// Check if an entity exists
    pub fn contains(&self, id: EntityId) -> bool {
        self.id_map.contains_left(&id)
    }

    /// Clear the world
    pub fn clear(&mut self) {
        self.world.clear();
        self.id_map.clear();
        self.name_map.clear();
        self.components.clear();
        self.order.clear();
    }

    fn hecs_entity(&self, id: EntityId) -> Result<hecs::Entity> {
        self.id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| SkirmishError::EntityNotFound(id.to_string()))
    }

    fn component_error<T: Component>(&self, id: EntityId, err: ComponentError) -> SkirmishError {
        match err {
            ComponentError::MissingComponent(_) => {
                SkirmishError::missing_component(self.label(id), T::NAME)
            }
            ComponentError::NoSuchEntity => SkirmishError::EntityNotFound(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Speed(f32);

    impl Component for Speed {
        const NAME: &'static str = "speed";
    }

    #[derive(Debug, PartialEq)]
    struct Tag;

    impl Component for Tag {
        const NAME: &'static str = "tag";
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut world = World::new();
        let id = world.spawn("player").unwrap();

        assert!(world.contains(id));
        assert_eq!(world.get_id("player"), Some(id));
        assert_eq!(world.get_name(id), Some("player"));
        assert_eq!(world.label(id), "player");
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_duplicate_name() {
        let mut world = World::new();
        world.spawn("player").unwrap();

        assert!(matches!(
            world.spawn("player"),
            Err(SkirmishError::DuplicateEntityName(_))
        ));
    }

    #[test]
    fn test_add_get_has() {
        let mut world = World::new();
        let id = world.spawn("player").unwrap();

        assert!(!world.has::<Speed>(id));
        world.add(id, Speed(400.0)).unwrap();
        assert!(world.has::<Speed>(id));
        assert_eq!(world.get::<Speed>(id).unwrap().0, 400.0);

        world.get_mut::<Speed>(id).unwrap().0 = 250.0;
        assert_eq!(*world.get::<Speed>(id).unwrap(), Speed(250.0));
    }

    #[test]
    fn test_add_overwrites_silently() {
        let mut world = World::new();
        let id = world.spawn("player").unwrap();

        world.add(id, Speed(1.0)).unwrap();
        world.add(id, Speed(2.0)).unwrap();

        assert_eq!(world.get::<Speed>(id).unwrap().0, 2.0);
        assert_eq!(world.all_entities()[0].components, vec!["speed"]);
    }

    #[test]
    fn test_missing_component_names_entity_and_component() {
        let mut world = World::new();
        let id = world.spawn("player").unwrap();

        match world.get::<Speed>(id) {
            Err(SkirmishError::MissingComponent { entity, component }) => {
                assert_eq!(entity, "player");
                assert_eq!(component, "speed");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected a missing component error"),
        };
    }

    #[test]
    fn test_distinct_component_borrows() {
        let mut world = World::new();
        let id = world.spawn("player").unwrap();
        world.add(id, Speed(1.0)).unwrap();
        world.add(id, Tag).unwrap();

        let mut speed = world.get_mut::<Speed>(id).unwrap();
        let tag = world.get::<Tag>(id).unwrap();
        speed.0 = 3.0;
        assert_eq!(*tag, Tag);
    }

    #[test]
    fn test_remove_and_despawn() {
        let mut world = World::new();
        let id = world.spawn("dummy").unwrap();
        world.add(id, Speed(5.0)).unwrap();

        assert_eq!(world.remove::<Speed>(id).unwrap(), Some(Speed(5.0)));
        assert_eq!(world.remove::<Speed>(id).unwrap(), None);

        world.despawn(id).unwrap();
        assert!(!world.contains(id));
        assert!(world.get_id("dummy").is_none());
        assert!(matches!(
            world.get::<Speed>(id),
            Err(SkirmishError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_spawn_order_is_stable() {
        let mut world = World::new();
        let a = world.spawn("a").unwrap();
        let b = world.spawn("b").unwrap();
        let c = world.spawn("c").unwrap();
        world.despawn(b).unwrap();

        assert_eq!(world.entity_ids(), vec![a, c]);
    }
}
