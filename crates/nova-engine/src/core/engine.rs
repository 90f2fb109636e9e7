use std::time::Duration;

use glam::Vec2;

use crate::api::config::CoreOptions;
use crate::api::context::EngineContext;
use crate::assets::loader::ResourceFetcher;
use crate::components::game_object::GameObject;
use crate::core::collision::check_collision_between_game_objects;
use crate::core::scene::{Scene, SceneManager};
use crate::error::EngineError;
use crate::input::listeners::Listeners;
use crate::input::state::{InputEvent, WindowEvent};
use crate::renderer::Renderer;

/// Owns the engine state and drives both loops.
///
/// The host calls [`Core::frame`] from its display-refresh callback and
/// [`Core::fixed_step`] from a timer every [`Core::fixed_interval`]. Both run
/// on the same thread and never overlap.
pub struct Core<R: Renderer> {
    ctx: EngineContext,
    renderer: R,
    scenes: SceneManager,
    listeners: Listeners,
    render_loop_started: bool,
    fixed_loop_started: bool,
    previous_timestamp: Option<f64>,
}

impl<R: Renderer> Core<R> {
    /// Build the engine for a viewport currently `viewport` pixels large.
    pub fn new(options: CoreOptions, mut renderer: R, viewport: Vec2) -> Self {
        if options.debug.toggle_fps_rendering_at_start {
            renderer.toggle_debug_fps_rendering();
        }
        if options.debug.toggle_debug_collider_rendering_at_start {
            renderer.toggle_debug_collider_rendering();
        }
        Self {
            ctx: EngineContext::new(options, viewport),
            renderer,
            scenes: SceneManager::new(),
            listeners: Listeners::new(),
            render_loop_started: false,
            fixed_loop_started: false,
            previous_timestamp: None,
        }
    }

    pub fn add_scene(&mut self, name: impl Into<String>, scene: impl Scene + 'static) {
        self.scenes.add(name, scene);
    }

    /// Switch scenes without touching the loop state. The previous scene's
    /// objects leave the hover set without an `on_mouse_out`.
    pub fn load_scene(&mut self, name: &str, fetcher: &mut dyn ResourceFetcher) -> Result<(), EngineError> {
        self.scenes.load(name, &mut self.ctx, fetcher)?;
        self.listeners.clear_hovered();
        Ok(())
    }

    /// Load a scene, then mark both loops as running. Calling it again only
    /// switches the scene; the loops are started once.
    pub fn load_scene_and_run(&mut self, name: &str, fetcher: &mut dyn ResourceFetcher) -> Result<(), EngineError> {
        self.load_scene(name, fetcher)?;
        if !self.render_loop_started {
            self.render_loop_started = true;
            log::info!("render loop started");
        }
        if !self.fixed_loop_started {
            self.fixed_loop_started = true;
            if self.ctx.options.collisions.enabled {
                log::info!(
                    "fixed loop started, one pass every {} ms",
                    self.ctx.options.collisions.fixed_loop_wait_in_ms
                );
            } else {
                log::info!("collisions disabled, fixed loop stays idle");
            }
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.render_loop_started
    }

    /// Wait between two [`Core::fixed_step`] calls.
    pub fn fixed_interval(&self) -> Duration {
        self.ctx.options.fixed_loop_interval()
    }

    /// One render-loop iteration for the host frame stamped `timestamp` (ms).
    pub fn frame(&mut self, timestamp: f64) {
        if !self.render_loop_started {
            return;
        }
        let ctx = &mut self.ctx;
        ctx.time.advance(timestamp, self.previous_timestamp);

        for object in ctx.objects.drain_pending_start() {
            GameObject::invoke(&object, |b| b.start(&object, ctx));
        }

        let objects = ctx.objects.get_all();
        for object in &objects {
            self.renderer.add_to_drawing_queue(object.clone());
        }

        if !ctx.window.hidden {
            for object in &objects {
                // Destroyed earlier in this pass, or spawned by a `start` above
                // and waiting for its own `start` next frame.
                if !ctx.objects.contains_ref(object) || ctx.objects.is_pending_start(object.borrow().name()) {
                    continue;
                }
                GameObject::invoke(object, |b| b.update(object, ctx));
            }
        }

        ctx.camera.advance_shake(ctx.time.delta_time * 1000.0);
        self.renderer.flush(ctx);
        self.listeners.call_mouse_out_on_unhovered(ctx);
        self.previous_timestamp = Some(timestamp);
    }

    /// One collision pass. Returns how many `on_collision` callbacks ran.
    ///
    /// Every ordered pair of collider-carrying objects is tested, and only the
    /// second object of a colliding pair is notified, with the first as the
    /// other party. Over the full pass each object of a colliding pair hears
    /// about the other exactly once.
    pub fn fixed_step(&mut self) -> usize {
        if !self.fixed_loop_started || !self.ctx.options.collisions.enabled {
            return 0;
        }
        let ctx = &mut self.ctx;
        let with_collider: Vec<_> = ctx
            .objects
            .get_all()
            .into_iter()
            .filter(|o| o.borrow().collider.is_some())
            .collect();

        let mut delivered = 0;
        for first in &with_collider {
            for second in &with_collider {
                let Some(collision) = check_collision_between_game_objects(first, second, &ctx.scaling, &ctx.camera)
                else {
                    continue;
                };
                // A callback earlier in this pass may have destroyed either side.
                if !ctx.objects.contains_ref(first) || !ctx.objects.contains_ref(second) {
                    continue;
                }
                GameObject::invoke(second, |b| b.on_collision(second, &collision, ctx));
                delivered += 1;
            }
        }
        delivered
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.listeners.handle_input(event, &mut self.ctx, &mut self.renderer);
    }

    pub fn handle_window_event(&mut self, event: WindowEvent) {
        self.listeners.handle_window(event, &mut self.ctx);
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }
}
