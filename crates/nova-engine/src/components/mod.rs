pub mod collider;
pub mod color;
pub mod game_object;
pub mod sprite;

pub use collider::Collider;
pub use color::Color;
pub use game_object::{GameObject, GameObjectRef, Shape};
pub use sprite::SpriteComponent;
