pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod math;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::behaviour::Behaviour;
pub use api::config::{CollisionOptions, CoreOptions, DebugOptions, Environment, RendererOptions};
pub use api::context::{EngineContext, WindowState};
pub use api::types::{Collision, EventData};
pub use assets::loader::{FileFetcher, MemoryFetcher, ResourceFetcher, ResourceKind, ResourceLoader};
pub use assets::manifest::SceneResources;
pub use components::collider::Collider;
pub use components::color::Color;
pub use components::game_object::{same_object, GameObject, GameObjectRef, Shape};
pub use components::sprite::SpriteComponent;
pub use core::engine::Core;
pub use core::game_loop::{HeadlessRunner, StopHandle};
pub use core::scene::Scene;
pub use error::{EngineError, ResourceError};
pub use input::state::{InputEvent, MouseButton, WindowEvent};
pub use math::{Vector2, Vector2Ext};
pub use renderer::{Camera, CanvasRenderer, DrawCommand, RecordingSurface, Renderer, Surface};
pub use systems::sound::SoundCommand;
