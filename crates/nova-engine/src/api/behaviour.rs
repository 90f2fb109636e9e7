use glam::Vec2;

use crate::api::context::EngineContext;
use crate::api::types::Collision;
use crate::components::game_object::GameObjectRef;

/// Game logic attached to a game object.
///
/// Every hook has an empty default, so a behaviour only implements what it needs.
/// `this` is the object the behaviour belongs to; it is not borrowed while the
/// hook runs.
pub trait Behaviour {
    /// Called once, on the frame after the object was instantiated, before its first `update`.
    fn start(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {}

    /// Called every frame while the window is visible.
    fn update(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {}

    /// Called from the fixed loop when another collider overlaps this one.
    fn on_collision(&mut self, _this: &GameObjectRef, _collision: &Collision, _ctx: &mut EngineContext) {}

    /// The pointer clicked (or a finger lifted) inside this object's collider.
    fn on_mouse_click(&mut self, _this: &GameObjectRef, _point: Vec2, _ctx: &mut EngineContext) {}

    /// The pointer entered this object's collider.
    fn on_mouse_over(&mut self, _this: &GameObjectRef, _point: Vec2, _ctx: &mut EngineContext) {}

    /// The pointer left this object's collider.
    fn on_mouse_out(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {}

    fn on_window_focus_lost(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {}

    fn on_window_focus_gained(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {}

    /// Called after the scaling manager picked up the new viewport size.
    fn on_window_resized(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {}
}
