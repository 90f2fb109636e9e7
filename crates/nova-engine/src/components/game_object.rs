use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

use crate::api::behaviour::Behaviour;
use crate::components::collider::Collider;
use crate::components::color::Color;
use crate::components::sprite::SpriteComponent;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle to a live game object.
///
/// The engine runs on one thread; every component that holds a handle may
/// mutate the object in place, one borrow at a time.
pub type GameObjectRef = Rc<RefCell<GameObject>>;

/// What the renderer paints for an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    /// Invisible (logic-only or collider-only objects).
    #[default]
    None,
    /// Filled rectangle centered on the position.
    Rect { size: Vec2, color: Color },
    /// Filled circle centered on the position.
    Circle { radius: f32, color: Color },
    /// Stroke from the position to `end` (both world space).
    Line { end: Vec2, width: f32, color: Color },
    /// Text centered on the position.
    Text {
        text: String,
        font_size: f32,
        font_name: String,
        color: Color,
    },
    /// Image frame centered on the position, rotated by `angle` degrees.
    Sprite {
        sprite: Option<SpriteComponent>,
        size: Vec2,
        angle: f32,
        alpha: f32,
    },
}

/// Fat game object: identity, transform, optional collider, drawable and behaviour.
pub struct GameObject {
    name: String,
    /// Position in world (virtual) space. For rect shapes and colliders this is the center.
    pub position: Vec2,
    /// Paint and update ordering key.
    pub rendering_layer: i32,
    pub collider: Option<Collider>,
    /// When false the object ignores camera panning (HUD elements).
    pub affected_by_camera: bool,
    pub shape: Shape,
    behaviour: Option<Box<dyn Behaviour>>,
}

impl GameObject {
    /// Create an object at the origin with a generated unique name.
    pub fn new() -> Self {
        let id = NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            name: format!("gameObject-{id:08}"),
            position: Vec2::ZERO,
            rendering_layer: 0,
            collider: None,
            affected_by_camera: true,
            shape: Shape::None,
            behaviour: None,
        }
    }

    // -- Builder pattern --

    /// Override the generated name. Names are identities; keep them unique.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_layer(mut self, rendering_layer: i32) -> Self {
        self.rendering_layer = rendering_layer;
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_affected_by_camera(mut self, affected: bool) -> Self {
        self.affected_by_camera = affected;
        self
    }

    pub fn with_behaviour(mut self, behaviour: impl Behaviour + 'static) -> Self {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_behaviour(&self) -> bool {
        self.behaviour.is_some()
    }

    pub fn into_ref(self) -> GameObjectRef {
        Rc::new(RefCell::new(self))
    }

    /// Run `f` against the object's behaviour with no borrow of the object held,
    /// so the callback is free to mutate its own object through `this`.
    ///
    /// A re-entrant call for the same object while its behaviour is running is skipped.
    pub(crate) fn invoke<F>(this: &GameObjectRef, f: F)
    where
        F: FnOnce(&mut dyn Behaviour),
    {
        let taken = this.borrow_mut().behaviour.take();
        let Some(mut behaviour) = taken else {
            return;
        };
        f(behaviour.as_mut());
        let mut object = this.borrow_mut();
        if object.behaviour.is_none() {
            object.behaviour = Some(behaviour);
        }
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rendering_layer", &self.rendering_layer)
            .field("collider", &self.collider)
            .field("affected_by_camera", &self.affected_by_camera)
            .field("shape", &self.shape)
            .field("has_behaviour", &self.behaviour.is_some())
            .finish()
    }
}

/// Identity comparison: two handles denote the same object when their names match.
pub fn same_object(a: &GameObjectRef, b: &GameObjectRef) -> bool {
    Rc::ptr_eq(a, b) || a.borrow().name == b.borrow().name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::context::EngineContext;

    #[test]
    fn generated_names_are_unique() {
        let a = GameObject::new();
        let b = GameObject::new();
        assert_ne!(a.name(), b.name());
        assert!(a.name().starts_with("gameObject-"));
    }

    #[test]
    fn builder_sets_fields() {
        let obj = GameObject::new()
            .with_name("hero")
            .with_position(Vec2::new(1.0, 2.0))
            .with_layer(3)
            .with_collider(Collider::circle(4.0))
            .with_affected_by_camera(false);
        assert_eq!(obj.name(), "hero");
        assert_eq!(obj.position, Vec2::new(1.0, 2.0));
        assert_eq!(obj.rendering_layer, 3);
        assert_eq!(obj.collider, Some(Collider::circle(4.0)));
        assert!(!obj.affected_by_camera);
    }

    struct Mover;

    impl Behaviour for Mover {
        fn update(&mut self, this: &GameObjectRef, _ctx: &mut EngineContext) {
            this.borrow_mut().position.x += 1.0;
        }
    }

    #[test]
    fn invoke_lets_behaviour_mutate_its_object() {
        let obj = GameObject::new().with_behaviour(Mover).into_ref();
        let mut ctx = EngineContext::default();
        GameObject::invoke(&obj, |b| b.update(&obj, &mut ctx));
        GameObject::invoke(&obj, |b| b.update(&obj, &mut ctx));
        assert_eq!(obj.borrow().position.x, 2.0);
        assert!(obj.borrow().has_behaviour());
    }

    #[test]
    fn same_object_compares_names() {
        let a = GameObject::new().with_name("x").into_ref();
        let b = GameObject::new().with_name("x").into_ref();
        let c = GameObject::new().into_ref();
        assert!(same_object(&a, &a));
        assert!(same_object(&a, &b));
        assert!(!same_object(&a, &c));
    }
}
