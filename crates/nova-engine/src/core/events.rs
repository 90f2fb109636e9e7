use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::api::context::EngineContext;
use crate::api::types::EventData;
use crate::components::game_object::GameObjectRef;

pub(crate) type EventCallback = Rc<RefCell<dyn FnMut(&EventData, &mut EngineContext)>>;

struct Subscription {
    id: u64,
    /// Name of the subscribing object.
    subscriber: String,
    callback: EventCallback,
}

/// Named-event pub/sub. Listeners are kept per event in subscription order and
/// remembered by the subscribing object's name, so destroying the object drops them.
///
/// Dispatch goes through [`EngineContext::dispatch_event`] so callbacks can
/// change engine state.
#[derive(Default)]
pub struct EventManager {
    listeners: HashMap<String, Vec<Subscription>>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `subscriber` to `event_name`.
    pub fn listen_for_event<F>(&mut self, subscriber: &GameObjectRef, event_name: impl Into<String>, callback: F)
    where
        F: FnMut(&EventData, &mut EngineContext) + 'static,
    {
        let subscriber = subscriber.borrow().name().to_string();
        let id = self.next_id;
        self.next_id += 1;
        self.listeners
            .entry(event_name.into())
            .or_default()
            .push(Subscription {
                id,
                subscriber,
                callback: Rc::new(RefCell::new(callback)),
            });
    }

    /// Listeners of `event_name` as they stand now, in subscription order.
    pub(crate) fn snapshot(&self, event_name: &str) -> Vec<(u64, EventCallback)> {
        self.listeners.get(event_name).map_or_else(Vec::new, |subscriptions| {
            subscriptions
                .iter()
                .map(|s| (s.id, Rc::clone(&s.callback)))
                .collect()
        })
    }

    /// Whether subscription `id` to `event_name` is still registered.
    pub(crate) fn is_active(&self, event_name: &str, id: u64) -> bool {
        self.listeners
            .get(event_name)
            .is_some_and(|subscriptions| subscriptions.iter().any(|s| s.id == id))
    }

    /// Drop every subscription made by the object called `subscriber`.
    pub fn remove_event_listeners_by_game_object(&mut self, subscriber: &str) {
        for subscriptions in self.listeners.values_mut() {
            subscriptions.retain(|s| s.subscriber != subscriber);
        }
        self.listeners.retain(|_, subscriptions| !subscriptions.is_empty());
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of listeners currently registered for `event_name`.
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners.get(event_name).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(name, subs)| (name.as_str(), subs.len()))
            .collect();
        f.debug_struct("EventManager").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::game_object::GameObject;
    use serde_json::json;

    #[test]
    fn dispatch_fans_out_in_order() {
        let mut ctx = EngineContext::default();
        let a = GameObject::new().into_ref();
        let b = GameObject::new().into_ref();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        ctx.events
            .listen_for_event(&a, "score", move |data, _| sink.borrow_mut().push(format!("a:{data}")));
        let sink = Rc::clone(&log);
        ctx.events
            .listen_for_event(&b, "score", move |data, _| sink.borrow_mut().push(format!("b:{data}")));

        ctx.dispatch_event("score", &json!(10));
        assert_eq!(*log.borrow(), vec!["a:10".to_string(), "b:10".to_string()]);
    }

    #[test]
    fn unknown_event_is_a_no_op() {
        let mut ctx = EngineContext::default();
        ctx.dispatch_event("nobody-listens", &json!(null));
        assert_eq!(ctx.events.listener_count("nobody-listens"), 0);
    }

    #[test]
    fn callbacks_can_change_the_world() {
        let mut ctx = EngineContext::default();
        let a = ctx.instantiate(GameObject::new().with_name("a"));
        let b = ctx.instantiate(GameObject::new().with_name("b"));
        let log = Rc::new(RefCell::new(Vec::new()));

        let victim = Rc::clone(&b);
        ctx.events.listen_for_event(&a, "boom", move |_, ctx| {
            ctx.destroy(&victim);
            ctx.instantiate(GameObject::new().with_name("debris"));
        });
        let sink = Rc::clone(&log);
        ctx.events
            .listen_for_event(&b, "boom", move |_, _| sink.borrow_mut().push("b heard boom"));

        ctx.dispatch_event("boom", &json!(null));
        assert!(log.borrow().is_empty());
        assert!(ctx.objects.contains("debris"));
        assert!(!ctx.objects.contains("b"));
        assert_eq!(ctx.events.listener_count("boom"), 1);
    }

    #[test]
    fn listener_added_during_dispatch_waits_for_the_next_one() {
        let mut ctx = EngineContext::default();
        let a = ctx.instantiate(GameObject::new().with_name("a"));
        let count = Rc::new(RefCell::new(0));

        let subscriber = Rc::clone(&a);
        let counter = Rc::clone(&count);
        ctx.events.listen_for_event(&a, "tick", move |_, ctx| {
            *counter.borrow_mut() += 1;
            let counter = Rc::clone(&counter);
            ctx.events
                .listen_for_event(&subscriber, "tick", move |_, _| *counter.borrow_mut() += 100);
        });

        ctx.dispatch_event("tick", &json!(null));
        assert_eq!(*count.borrow(), 1);
        ctx.dispatch_event("tick", &json!(null));
        assert_eq!(*count.borrow(), 102);
    }

    #[test]
    fn removing_a_subscriber_keeps_neighbours() {
        let mut events = EventManager::new();
        let a = GameObject::new().into_ref();
        let b = GameObject::new().into_ref();
        // Adjacent subscriptions from the same object must all go.
        events.listen_for_event(&a, "tick", |_, _| {});
        events.listen_for_event(&a, "tick", |_, _| {});
        events.listen_for_event(&b, "tick", |_, _| {});
        events.listen_for_event(&a, "other", |_, _| {});

        let name = a.borrow().name().to_string();
        events.remove_event_listeners_by_game_object(&name);
        assert_eq!(events.listener_count("tick"), 1);
        assert_eq!(events.listener_count("other"), 0);
    }
}
