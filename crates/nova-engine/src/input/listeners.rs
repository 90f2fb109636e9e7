use std::rc::Rc;

use glam::Vec2;

use crate::api::context::EngineContext;
use crate::components::game_object::{GameObject, GameObjectRef};
use crate::core::collision::point_inside_game_object;
use crate::input::state::{keys, InputEvent, WindowEvent};
use crate::renderer::Renderer;

/// Turns raw host events into behaviour callbacks.
///
/// Holds the objects the cursor is currently over so `on_mouse_over` fires
/// once per entry and `on_mouse_out` once per exit.
#[derive(Debug, Default)]
pub struct Listeners {
    mouse_over: Vec<GameObjectRef>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects currently under the cursor.
    pub fn hovered(&self) -> &[GameObjectRef] {
        &self.mouse_over
    }

    /// Forget every hovered object without calling `on_mouse_out`.
    /// Used when a scene change destroys them.
    pub fn clear_hovered(&mut self) {
        self.mouse_over.clear();
    }

    pub fn handle_input(&mut self, event: InputEvent, ctx: &mut EngineContext, renderer: &mut dyn Renderer) {
        ctx.input.apply(&event);
        match event {
            InputEvent::MouseClick => {
                let point = ctx.input.mouse_position();
                click_objects_at(point, ctx);
            }
            InputEvent::MouseMove { .. } => self.hover_objects(ctx),
            InputEvent::TouchEnd { .. } => {
                let point = ctx.input.touch.released_position();
                click_objects_at(point, ctx);
            }
            InputEvent::KeyDown { key_code } if !ctx.options.is_production() => match key_code {
                keys::DIGIT_1 => renderer.toggle_debug_fps_rendering(),
                keys::DIGIT_2 => renderer.toggle_debug_collider_rendering(),
                _ => {}
            },
            _ => {}
        }
    }

    pub fn handle_window(&mut self, event: WindowEvent, ctx: &mut EngineContext) {
        match event {
            WindowEvent::Resized { width, height } => {
                ctx.scaling.update_scale(Vec2::new(width, height));
                for object in ctx.objects.get_all() {
                    GameObject::invoke(&object, |b| b.on_window_resized(&object, ctx));
                }
            }
            WindowEvent::FocusGained => {
                ctx.window.focused = true;
                for object in ctx.objects.get_all() {
                    GameObject::invoke(&object, |b| b.on_window_focus_gained(&object, ctx));
                }
            }
            WindowEvent::FocusLost => {
                ctx.window.focused = false;
                for object in ctx.objects.get_all() {
                    GameObject::invoke(&object, |b| b.on_window_focus_lost(&object, ctx));
                }
            }
            WindowEvent::VisibilityChanged { hidden } => ctx.window.hidden = hidden,
        }
    }

    /// Fire `on_mouse_out` for every hovered object the cursor has left.
    /// Runs at the end of each frame.
    pub fn call_mouse_out_on_unhovered(&mut self, ctx: &mut EngineContext) {
        let point = ctx.input.mouse_position();
        let hovered = std::mem::take(&mut self.mouse_over);
        for object in hovered {
            if !ctx.objects.contains_ref(&object) {
                continue;
            }
            if contains_point(&object, point, ctx) {
                self.mouse_over.push(object);
            } else {
                GameObject::invoke(&object, |b| b.on_mouse_out(&object, ctx));
            }
        }
    }

    fn hover_objects(&mut self, ctx: &mut EngineContext) {
        let point = ctx.input.mouse_position();
        for object in ctx.objects.get_all() {
            if self.mouse_over.iter().any(|h| Rc::ptr_eq(h, &object)) {
                continue;
            }
            if contains_point(&object, point, ctx) {
                let world = ctx.scaling.screen_to_world(point, ctx.camera.position);
                self.mouse_over.push(Rc::clone(&object));
                GameObject::invoke(&object, |b| b.on_mouse_over(&object, world, ctx));
            }
        }
    }
}

fn contains_point(object: &GameObjectRef, point: Vec2, ctx: &EngineContext) -> bool {
    point_inside_game_object(point, &object.borrow(), &ctx.scaling, &ctx.camera)
}

/// `on_mouse_click` on every object whose collider contains the screen `point`.
fn click_objects_at(point: Vec2, ctx: &mut EngineContext) {
    let world = ctx.scaling.screen_to_world(point, ctx.camera.position);
    for object in ctx.objects.get_all() {
        if contains_point(&object, point, ctx) {
            GameObject::invoke(&object, |b| b.on_mouse_click(&object, world, ctx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::behaviour::Behaviour;
    use crate::api::config::Environment;
    use crate::components::collider::Collider;
    use crate::renderer::{CanvasRenderer, RecordingSurface};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Behaviour for Recorder {
        fn on_mouse_click(&mut self, _this: &GameObjectRef, point: Vec2, _ctx: &mut EngineContext) {
            self.0.borrow_mut().push(format!("click {} {}", point.x, point.y));
        }

        fn on_mouse_over(&mut self, _this: &GameObjectRef, _point: Vec2, _ctx: &mut EngineContext) {
            self.0.borrow_mut().push("over".into());
        }

        fn on_mouse_out(&mut self, _this: &GameObjectRef, _ctx: &mut EngineContext) {
            self.0.borrow_mut().push("out".into());
        }

        fn on_window_resized(&mut self, _this: &GameObjectRef, ctx: &mut EngineContext) {
            let scale = ctx.scaling.scale();
            self.0.borrow_mut().push(format!("resized {} {}", scale.x, scale.y));
        }
    }

    fn setup() -> (EngineContext, CanvasRenderer<RecordingSurface>, Rc<RefCell<Vec<String>>>) {
        let mut ctx = EngineContext::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        ctx.instantiate(
            GameObject::new()
                .with_position(Vec2::new(100.0, 100.0))
                .with_collider(Collider::rect(Vec2::new(20.0, 20.0)))
                .with_behaviour(Recorder(Rc::clone(&log))),
        );
        (ctx, CanvasRenderer::new(RecordingSurface::default()), log)
    }

    #[test]
    fn click_inside_collider_reaches_behaviour() {
        let (mut ctx, mut renderer, log) = setup();
        let mut listeners = Listeners::new();
        listeners.handle_input(InputEvent::MouseMove { x: 95.0, y: 105.0 }, &mut ctx, &mut renderer);
        listeners.handle_input(InputEvent::MouseClick, &mut ctx, &mut renderer);
        listeners.handle_input(InputEvent::MouseMove { x: 500.0, y: 500.0 }, &mut ctx, &mut renderer);
        listeners.handle_input(InputEvent::MouseClick, &mut ctx, &mut renderer);
        assert_eq!(*log.borrow(), vec!["over".to_string(), "click 95 105".to_string()]);
    }

    #[test]
    fn hover_fires_over_once_and_out_on_exit() {
        let (mut ctx, mut renderer, log) = setup();
        let mut listeners = Listeners::new();
        listeners.handle_input(InputEvent::MouseMove { x: 100.0, y: 100.0 }, &mut ctx, &mut renderer);
        listeners.handle_input(InputEvent::MouseMove { x: 101.0, y: 100.0 }, &mut ctx, &mut renderer);
        listeners.call_mouse_out_on_unhovered(&mut ctx);
        assert_eq!(listeners.hovered().len(), 1);

        listeners.handle_input(InputEvent::MouseMove { x: 300.0, y: 100.0 }, &mut ctx, &mut renderer);
        listeners.call_mouse_out_on_unhovered(&mut ctx);
        assert!(listeners.hovered().is_empty());
        assert_eq!(*log.borrow(), vec!["over".to_string(), "out".to_string()]);
    }

    #[test]
    fn touch_end_clicks_where_the_finger_lifted() {
        let (mut ctx, mut renderer, log) = setup();
        let mut listeners = Listeners::new();
        listeners.handle_input(
            InputEvent::TouchChanged { points: vec![Vec2::new(100.0, 100.0)] },
            &mut ctx,
            &mut renderer,
        );
        listeners.handle_input(InputEvent::TouchEnd { points: vec![] }, &mut ctx, &mut renderer);
        assert_eq!(*log.borrow(), vec!["click 100 100".to_string()]);
        assert!(!ctx.input.touch.screen_is_touched);
    }

    #[test]
    fn resize_rescales_before_notifying() {
        let (mut ctx, _renderer, log) = setup();
        let mut listeners = Listeners::new();
        listeners.handle_window(WindowEvent::Resized { width: 960.0, height: 540.0 }, &mut ctx);
        assert_eq!(*log.borrow(), vec!["resized 0.5 0.5".to_string()]);
    }

    #[test]
    fn visibility_and_focus_update_window_state() {
        let (mut ctx, _renderer, _log) = setup();
        let mut listeners = Listeners::new();
        listeners.handle_window(WindowEvent::VisibilityChanged { hidden: true }, &mut ctx);
        listeners.handle_window(WindowEvent::FocusLost, &mut ctx);
        assert!(ctx.window.hidden);
        assert!(!ctx.window.focused);
    }

    #[test]
    fn debug_keys_only_work_in_development() {
        let (mut ctx, mut renderer, _log) = setup();
        let mut listeners = Listeners::new();
        listeners.handle_input(InputEvent::KeyDown { key_code: keys::DIGIT_1 }, &mut ctx, &mut renderer);
        listeners.handle_input(InputEvent::KeyDown { key_code: keys::DIGIT_2 }, &mut ctx, &mut renderer);
        assert!(renderer.debug_flags().fps && renderer.debug_flags().colliders);

        ctx.options.environment = Environment::Production;
        listeners.handle_input(InputEvent::KeyDown { key_code: keys::DIGIT_1 }, &mut ctx, &mut renderer);
        assert!(renderer.debug_flags().fps);
        assert!(ctx.input.key_down(keys::DIGIT_1));
    }
}
