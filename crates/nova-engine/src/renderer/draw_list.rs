use glam::Vec2;

use crate::api::context::EngineContext;
use crate::components::collider::Collider;
use crate::components::color::Color;
use crate::components::game_object::{GameObject, GameObjectRef, Shape};
use crate::renderer::{DebugFlags, Renderer};

/// Fill used for the debug collider overlay.
pub const DEBUG_COLLIDER_COLOR: Color = Color::rgba_const(200, 50, 129, 0.6);
/// Color of the debug FPS counter.
pub const DEBUG_FPS_COLOR: Color = Color::rgba_const(19, 196, 196, 1.0);
pub const DEBUG_FPS_FONT: &str = "18px Nova Mono";
pub const DEBUG_FPS_POSITION: Vec2 = Vec2::new(10.0, 20.0);

/// One paint operation, already in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear,
    Rect {
        top_left: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Round-capped stroke.
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// `position` is the text center when `centered`, otherwise the left baseline.
    Text {
        text: String,
        position: Vec2,
        font: String,
        color: Color,
        centered: bool,
    },
    /// Atlas frame `source` (x, y, w, h) drawn centered on `center`, rotated by `angle` degrees.
    Sprite {
        image: String,
        source: [f32; 4],
        center: Vec2,
        size: Vec2,
        angle: f32,
        alpha: f32,
        smoothing: bool,
    },
}

/// Something that can paint a frame's worth of draw commands.
pub trait Surface {
    fn present(&mut self, commands: &[DrawCommand]);
}

/// Surface that keeps the last frame. Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub last_frame: Vec<DrawCommand>,
    pub frames_presented: u64,
}

impl Surface for RecordingSurface {
    fn present(&mut self, commands: &[DrawCommand]) {
        self.last_frame.clear();
        self.last_frame.extend_from_slice(commands);
        self.frames_presented += 1;
    }
}

/// Rolling FPS estimate: the average of the last 5 per-frame samples.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    displayed: u32,
    samples: Vec<u32>,
}

impl FpsCounter {
    const SAMPLES: usize = 5;

    pub fn new() -> Self {
        Self {
            displayed: 60,
            samples: Vec::with_capacity(Self::SAMPLES),
        }
    }

    /// Value currently shown.
    pub fn displayed(&self) -> u32 {
        self.displayed
    }

    /// Feed one frame's delta time in seconds. A zero or non-finite delta counts as 60 FPS.
    pub fn record(&mut self, delta_time: f32) {
        let fps = (1.0 / delta_time).round();
        let fps = if fps.is_finite() { fps.max(0.0) as u32 } else { 60 };
        self.samples.push(fps);
        if self.samples.len() < Self::SAMPLES {
            return;
        }
        let sum: u32 = self.samples.iter().sum();
        self.displayed = (sum as f32 / Self::SAMPLES as f32).round() as u32;
        self.samples.clear();
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renderer that turns the queued objects into [`DrawCommand`]s and hands
/// them to a [`Surface`].
pub struct CanvasRenderer<S: Surface> {
    surface: S,
    queue: Vec<GameObjectRef>,
    commands: Vec<DrawCommand>,
    debug: DebugFlags,
    fps: FpsCounter,
}

impl<S: Surface> CanvasRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            queue: Vec::with_capacity(256),
            commands: Vec::with_capacity(256),
            debug: DebugFlags::default(),
            fps: FpsCounter::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Objects waiting for the next flush.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn push_shape(&mut self, object: &GameObject, ctx: &EngineContext) {
        let scaling = &ctx.scaling;
        let offset = ctx.camera.offset_for(object);
        let at = scaling.world_to_screen(object.position, offset);
        let uniform = scaling.scale().x.min(scaling.scale().y);

        let command = match &object.shape {
            Shape::None => return,
            Shape::Rect { size, color } => {
                let size = scaling.box_size_virtual_to_screen(*size);
                DrawCommand::Rect {
                    top_left: at - size / 2.0,
                    size,
                    color: *color,
                }
            }
            Shape::Circle { radius, color } => DrawCommand::Circle {
                center: at,
                radius: scaling.circle_radius_virtual_to_screen(*radius),
                color: *color,
            },
            Shape::Line { end, width, color } => DrawCommand::Line {
                from: at,
                to: scaling.world_to_screen(*end, offset),
                width: width * uniform,
                color: *color,
            },
            Shape::Text {
                text,
                font_size,
                font_name,
                color,
            } => DrawCommand::Text {
                text: text.clone(),
                position: at,
                font: format!("{}px {}", font_size * uniform, font_name),
                color: *color,
                centered: true,
            },
            Shape::Sprite {
                sprite,
                size,
                angle,
                alpha,
            } => {
                let Some(sprite) = sprite else {
                    log::warn!(
                        "sprite object `{}` has no sprite assigned, it cannot be rendered",
                        object.name()
                    );
                    return;
                };
                DrawCommand::Sprite {
                    image: sprite.image.clone(),
                    source: [sprite.atlas_x, sprite.atlas_y, sprite.width, sprite.height],
                    center: at,
                    size: scaling.box_size_virtual_to_screen(*size),
                    angle: *angle,
                    alpha: alpha.clamp(0.0, 1.0),
                    smoothing: ctx.options.renderer_options.image_smoothing_enabled,
                }
            }
        };
        self.commands.push(command);
    }

    fn push_collider(&mut self, object: &GameObject, ctx: &EngineContext) {
        let Some(collider) = object.collider else {
            return;
        };
        let scaling = &ctx.scaling;
        let center = scaling.world_to_screen(collider.center(object.position), ctx.camera.offset_for(object));
        let command = match collider {
            Collider::Rect { size, .. } => {
                let size = scaling.box_size_virtual_to_screen(size);
                DrawCommand::Rect {
                    top_left: center - size / 2.0,
                    size,
                    color: DEBUG_COLLIDER_COLOR,
                }
            }
            Collider::Circle { radius, .. } => DrawCommand::Circle {
                center,
                radius: scaling.circle_radius_virtual_to_screen(radius),
                color: DEBUG_COLLIDER_COLOR,
            },
        };
        self.commands.push(command);
    }
}

impl<S: Surface> Renderer for CanvasRenderer<S> {
    fn add_to_drawing_queue(&mut self, object: GameObjectRef) {
        self.queue.push(object);
    }

    fn flush(&mut self, ctx: &EngineContext) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);

        // Stable: equal layers paint in queue order.
        let mut queue = std::mem::take(&mut self.queue);
        queue.sort_by_key(|o| o.borrow().rendering_layer);

        for object in &queue {
            let object = object.borrow();
            self.push_shape(&object, ctx);
            if self.debug.colliders {
                self.push_collider(&object, ctx);
            }
        }

        if self.debug.fps {
            self.commands.push(DrawCommand::Text {
                text: format!("FPS: {}", self.fps.displayed()),
                position: DEBUG_FPS_POSITION,
                font: DEBUG_FPS_FONT.to_string(),
                color: DEBUG_FPS_COLOR,
                centered: false,
            });
            self.fps.record(ctx.time.delta_time);
        }

        self.surface.present(&self.commands);

        // Reuse the allocation for the next frame.
        queue.clear();
        self.queue = queue;
    }

    fn toggle_debug_fps_rendering(&mut self) {
        self.debug.fps = !self.debug.fps;
    }

    fn toggle_debug_collider_rendering(&mut self) {
        self.debug.colliders = !self.debug.colliders;
    }

    fn debug_flags(&self) -> DebugFlags {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::SpriteComponent;

    fn renderer() -> CanvasRenderer<RecordingSurface> {
        CanvasRenderer::new(RecordingSurface::default())
    }

    #[test]
    fn paints_in_ascending_layer_order() {
        let ctx = EngineContext::default();
        let mut r = renderer();
        let top = GameObject::new()
            .with_layer(5)
            .with_shape(Shape::Circle { radius: 1.0, color: Color::BLACK })
            .into_ref();
        let bottom = GameObject::new()
            .with_layer(-2)
            .with_shape(Shape::Rect { size: Vec2::splat(2.0), color: Color::WHITE })
            .into_ref();
        r.add_to_drawing_queue(top);
        r.add_to_drawing_queue(bottom);
        r.flush(&ctx);

        let frame = &r.surface().last_frame;
        assert_eq!(frame.len(), 3);
        assert_eq!(frame[0], DrawCommand::Clear);
        assert!(matches!(frame[1], DrawCommand::Rect { .. }));
        assert!(matches!(frame[2], DrawCommand::Circle { .. }));
        assert_eq!(r.queued(), 0);
    }

    #[test]
    fn rect_is_centered_on_position_and_scaled() {
        let mut ctx = EngineContext::default();
        ctx.scaling.update_scale(Vec2::new(960.0, 540.0));
        ctx.camera.position = Vec2::new(20.0, 0.0);
        let mut r = renderer();
        r.add_to_drawing_queue(
            GameObject::new()
                .with_position(Vec2::new(100.0, 100.0))
                .with_shape(Shape::Rect { size: Vec2::new(40.0, 20.0), color: Color::BLACK })
                .into_ref(),
        );
        r.flush(&ctx);
        assert_eq!(
            r.surface().last_frame[1],
            DrawCommand::Rect {
                top_left: Vec2::new(30.0, 45.0),
                size: Vec2::new(20.0, 10.0),
                color: Color::BLACK,
            }
        );
    }

    #[test]
    fn debug_overlays_follow_toggles() {
        let ctx = EngineContext::default();
        let mut r = renderer();
        r.toggle_debug_collider_rendering();
        r.toggle_debug_fps_rendering();
        r.add_to_drawing_queue(
            GameObject::new()
                .with_collider(Collider::circle(3.0))
                .into_ref(),
        );
        r.flush(&ctx);
        let frame = &r.surface().last_frame;
        assert_eq!(
            frame[1],
            DrawCommand::Circle { center: Vec2::ZERO, radius: 3.0, color: DEBUG_COLLIDER_COLOR }
        );
        assert!(matches!(
            &frame[2],
            DrawCommand::Text { text, position, centered: false, .. }
                if text == "FPS: 60" && *position == DEBUG_FPS_POSITION
        ));

        r.toggle_debug_fps_rendering();
        r.flush(&ctx);
        assert_eq!(r.surface().last_frame.len(), 1);
        assert_eq!(r.debug_flags(), DebugFlags { fps: false, colliders: true });
    }

    #[test]
    fn sprite_without_image_is_skipped() {
        let ctx = EngineContext::default();
        let mut r = renderer();
        r.add_to_drawing_queue(
            GameObject::new()
                .with_shape(Shape::Sprite { sprite: None, size: Vec2::ONE, angle: 0.0, alpha: 1.0 })
                .into_ref(),
        );
        r.add_to_drawing_queue(
            GameObject::new()
                .with_shape(Shape::Sprite {
                    sprite: Some(SpriteComponent::whole("hero", 32.0, 32.0)),
                    size: Vec2::splat(64.0),
                    angle: 90.0,
                    alpha: 0.5,
                })
                .into_ref(),
        );
        r.flush(&ctx);
        let frame = &r.surface().last_frame;
        assert_eq!(frame.len(), 2);
        assert!(matches!(&frame[1], DrawCommand::Sprite { image, .. } if image == "hero"));
    }

    #[test]
    fn fps_counter_averages_five_samples() {
        let mut fps = FpsCounter::new();
        for _ in 0..4 {
            fps.record(1.0 / 30.0);
        }
        assert_eq!(fps.displayed(), 60);
        fps.record(0.0);
        // (30 * 4 + 60) / 5
        assert_eq!(fps.displayed(), 36);
    }
}
