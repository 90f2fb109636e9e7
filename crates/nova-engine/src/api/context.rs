use crate::api::config::CoreOptions;
use crate::api::types::EventData;
use crate::assets::loader::ResourceLoader;
use crate::components::game_object::{GameObject, GameObjectRef};
use crate::core::events::EventManager;
use crate::core::objects::GameObjectsManager;
use crate::core::scaling::ScalingManager;
use crate::core::time::Time;
use crate::input::state::Input;
use crate::renderer::camera::Camera;
use crate::systems::locale::Locale;
use crate::systems::sound::SoundManager;

/// Host window flags the loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Page hidden or backgrounded. Updates are skipped while set.
    pub hidden: bool,
    pub focused: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            hidden: false,
            focused: true,
        }
    }
}

/// Mutable access to engine state, passed to every behaviour hook and scene load.
#[derive(Debug)]
pub struct EngineContext {
    pub objects: GameObjectsManager,
    pub events: EventManager,
    pub camera: Camera,
    pub scaling: ScalingManager,
    pub input: Input,
    pub time: Time,
    pub resources: ResourceLoader,
    pub sounds: SoundManager,
    pub locale: Locale,
    pub window: WindowState,
    pub options: CoreOptions,
}

impl EngineContext {
    /// Build a context for `options`, with the viewport currently `viewport` pixels wide and high.
    pub fn new(options: CoreOptions, viewport: glam::Vec2) -> Self {
        let reference = options.renderer_options.resolution;
        Self {
            objects: GameObjectsManager::new(),
            events: EventManager::new(),
            camera: Camera::new(),
            scaling: ScalingManager::new(reference, viewport),
            input: Input::new(),
            time: Time::default(),
            resources: ResourceLoader::new(),
            sounds: SoundManager::new(),
            locale: Locale::new(options.language.clone()),
            window: WindowState::default(),
            options,
        }
    }

    /// Register `object`; its `start` runs on the next frame.
    pub fn instantiate(&mut self, object: GameObject) -> GameObjectRef {
        self.objects.instantiate(object)
    }

    /// Destroy `object` and drop its event subscriptions.
    /// Returns `None` when it was already gone.
    pub fn destroy(&mut self, object: &GameObjectRef) -> Option<GameObjectRef> {
        self.objects.destroy(object, &mut self.events)
    }

    /// Call every listener of `event_name` in subscription order, handing each
    /// the context. Listeners removed by an earlier callback in the same
    /// dispatch are skipped, and ones added during it first hear the next event.
    pub fn dispatch_event(&mut self, event_name: &str, data: &EventData) {
        for (id, callback) in self.events.snapshot(event_name) {
            if !self.events.is_active(event_name, id) {
                continue;
            }
            let Ok(mut callback) = callback.try_borrow_mut() else {
                log::warn!("listener of `{event_name}` dispatched the same event again; skipped");
                continue;
            };
            (&mut *callback)(data, self);
        }
    }

    /// Play a loaded sound. Unknown or unloaded sounds are logged and ignored.
    pub fn play_sound(&mut self, name: &str, looped: bool, volume: f32) {
        if let Err(err) = self.sounds.play(&self.resources, name, looped, volume) {
            log::warn!("{err}");
        }
    }

    /// Localized text for `key` in the current language.
    pub fn text(&self, locale_name: &str, key: &str) -> String {
        self.locale.get_or_key(&self.resources, locale_name, key)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        let options = CoreOptions::default();
        let viewport = options.renderer_options.resolution;
        Self::new(options, viewport)
    }
}
