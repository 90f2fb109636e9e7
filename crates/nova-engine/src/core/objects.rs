use std::rc::Rc;

use crate::components::game_object::{GameObject, GameObjectRef};
use crate::core::events::EventManager;

/// Registry of live game objects.
///
/// A flat Vec searched linearly by name; scenes hold hundreds of objects, not millions.
#[derive(Debug, Default)]
pub struct GameObjectsManager {
    objects: Vec<GameObjectRef>,
    /// Instantiated since the last start flush.
    pending_start: Vec<GameObjectRef>,
}

impl GameObjectsManager {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(256),
            pending_start: Vec::new(),
        }
    }

    /// Register an object and queue it for `start` on the next frame.
    pub fn instantiate(&mut self, object: GameObject) -> GameObjectRef {
        self.instantiate_ref(object.into_ref())
    }

    /// Register an already shared object. Registering the same name twice is ignored.
    pub fn instantiate_ref(&mut self, object: GameObjectRef) -> GameObjectRef {
        let name = object.borrow().name().to_string();
        if self.contains(&name) {
            log::warn!("game object `{name}` is already registered");
            return object;
        }
        self.objects.push(Rc::clone(&object));
        self.pending_start.push(Rc::clone(&object));
        object
    }

    /// Remove `object` and purge its event subscriptions.
    /// Returns the removed handle, or `None` when it is not registered.
    pub fn destroy(&mut self, object: &GameObjectRef, events: &mut EventManager) -> Option<GameObjectRef> {
        let name = object.borrow().name().to_string();
        self.destroy_by_name(&name, events)
    }

    pub fn destroy_by_name(&mut self, name: &str, events: &mut EventManager) -> Option<GameObjectRef> {
        let idx = self.objects.iter().position(|o| o.borrow().name() == name)?;
        let removed = self.objects.remove(idx);
        self.pending_start.retain(|o| o.borrow().name() != name);
        events.remove_event_listeners_by_game_object(name);
        Some(removed)
    }

    /// Clear the registry, the pending start queue and every event subscription.
    pub fn destroy_all(&mut self, events: &mut EventManager) {
        self.objects.clear();
        self.pending_start.clear();
        events.clear();
    }

    /// Every live object, highest rendering layer first. Ties keep insertion order.
    pub fn get_all(&mut self) -> Vec<GameObjectRef> {
        self.objects
            .sort_by_key(|o| std::cmp::Reverse(o.borrow().rendering_layer));
        self.objects.clone()
    }

    pub fn get_by_name(&self, name: &str) -> Option<GameObjectRef> {
        self.objects
            .iter()
            .find(|o| o.borrow().name() == name)
            .cloned()
    }

    /// Take the objects waiting for their `start` call. A second drain in the
    /// same tick is empty.
    pub fn drain_pending_start(&mut self) -> Vec<GameObjectRef> {
        std::mem::take(&mut self.pending_start)
    }

    /// Registered but its `start` has not run yet.
    pub fn is_pending_start(&self, name: &str) -> bool {
        self.pending_start.iter().any(|o| o.borrow().name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.iter().any(|o| o.borrow().name() == name)
    }

    /// Whether this very handle is registered. A destroyed object whose name
    /// was reused by a newer one is not.
    pub fn contains_ref(&self, object: &GameObjectRef) -> bool {
        self.objects.iter().any(|o| Rc::ptr_eq(o, object))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, layer: i32) -> GameObject {
        GameObject::new().with_name(name).with_layer(layer)
    }

    #[test]
    fn instantiate_and_lookup() {
        let mut objects = GameObjectsManager::new();
        objects.instantiate(named("a", 0));
        assert_eq!(objects.len(), 1);
        assert!(objects.get_by_name("a").is_some());
        assert!(objects.get_by_name("missing").is_none());
    }

    #[test]
    fn destroy_twice_reports_not_found() {
        let mut objects = GameObjectsManager::new();
        let mut events = EventManager::new();
        let a = objects.instantiate(named("a", 0));
        assert!(objects.destroy(&a, &mut events).is_some());
        assert!(objects.destroy(&a, &mut events).is_none());
        assert!(objects.is_empty());
    }

    #[test]
    fn destroy_purges_subscriptions() {
        let mut objects = GameObjectsManager::new();
        let mut events = EventManager::new();
        let a = objects.instantiate(named("a", 0));
        let b = objects.instantiate(named("b", 0));
        events.listen_for_event(&a, "ping", |_, _| {});
        events.listen_for_event(&b, "ping", |_, _| {});
        objects.destroy(&a, &mut events);
        assert_eq!(events.listener_count("ping"), 1);
    }

    #[test]
    fn get_all_sorts_by_layer_descending_and_is_stable() {
        let mut objects = GameObjectsManager::new();
        objects.instantiate(named("low", -1));
        objects.instantiate(named("first-mid", 2));
        objects.instantiate(named("top", 9));
        objects.instantiate(named("second-mid", 2));
        let names: Vec<String> = objects
            .get_all()
            .iter()
            .map(|o| o.borrow().name().to_string())
            .collect();
        assert_eq!(names, vec!["top", "first-mid", "second-mid", "low"]);
    }

    #[test]
    fn pending_start_drains_once() {
        let mut objects = GameObjectsManager::new();
        objects.instantiate(named("a", 0));
        objects.instantiate(named("b", 0));
        assert!(objects.is_pending_start("a"));
        assert_eq!(objects.drain_pending_start().len(), 2);
        assert!(!objects.is_pending_start("a"));
        assert!(objects.drain_pending_start().is_empty());
    }

    #[test]
    fn reused_name_is_a_different_object() {
        let mut objects = GameObjectsManager::new();
        let mut events = EventManager::new();
        let old = objects.instantiate(named("play", 0));
        objects.destroy_all(&mut events);
        let new = objects.instantiate(named("play", 0));
        assert!(objects.contains("play"));
        assert!(!objects.contains_ref(&old));
        assert!(objects.contains_ref(&new));
    }

    #[test]
    fn destroy_all_clears_everything() {
        let mut objects = GameObjectsManager::new();
        let mut events = EventManager::new();
        let a = objects.instantiate(named("a", 0));
        events.listen_for_event(&a, "ping", |_, _| {});
        objects.destroy_all(&mut events);
        assert!(objects.is_empty());
        assert!(objects.drain_pending_start().is_empty());
        assert_eq!(events.listener_count("ping"), 0);
    }
}
