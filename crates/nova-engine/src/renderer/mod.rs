pub mod camera;
pub mod draw_list;

use crate::api::context::EngineContext;
use crate::components::game_object::GameObjectRef;

pub use camera::Camera;
pub use draw_list::{CanvasRenderer, DrawCommand, FpsCounter, RecordingSurface, Surface};

/// Debug overlays a renderer can paint on top of the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugFlags {
    pub fps: bool,
    pub colliders: bool,
}

/// Contract between the frame loop and whatever paints the scene.
///
/// Implementors must place objects through [`ScalingManager::world_to_screen`]
/// with the [`Camera`] offset, the same path collision detection uses, so hits
/// land where things are drawn.
///
/// [`ScalingManager::world_to_screen`]: crate::core::scaling::ScalingManager::world_to_screen
pub trait Renderer {
    /// Queue an object for the next `flush`.
    fn add_to_drawing_queue(&mut self, object: GameObjectRef);

    /// Paint the queue in ascending rendering layer order, then empty it.
    fn flush(&mut self, ctx: &EngineContext);

    fn toggle_debug_fps_rendering(&mut self);

    fn toggle_debug_collider_rendering(&mut self);

    fn debug_flags(&self) -> DebugFlags;
}
