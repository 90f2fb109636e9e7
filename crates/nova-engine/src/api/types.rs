use std::fmt;

use glam::Vec2;

use crate::components::game_object::GameObjectRef;

/// Payload carried by engine events. Any JSON value.
pub type EventData = serde_json::Value;

/// A detected collision, as seen by the object receiving the callback.
#[derive(Clone)]
pub struct Collision {
    /// The other object of the pair.
    pub game_object: GameObjectRef,
    /// Contact point in world space (unscaled, camera included).
    pub point: Vec2,
}

impl fmt::Debug for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collision")
            .field("game_object", &self.game_object.borrow().name())
            .field("point", &self.point)
            .finish()
    }
}
