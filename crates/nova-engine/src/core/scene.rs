use std::collections::HashMap;

use crate::api::context::EngineContext;
use crate::assets::loader::ResourceFetcher;
use crate::assets::manifest::SceneResources;
use crate::error::EngineError;

/// A level or screen: the resources it needs and the objects it spawns.
pub trait Scene {
    /// Resources to load before [`Scene::load`] runs.
    fn resources(&self) -> SceneResources {
        SceneResources::default()
    }

    /// Spawn the scene's objects. Runs after the previous scene's objects were destroyed.
    fn load(&mut self, ctx: &mut EngineContext);
}

/// Named scenes and the transition between them.
#[derive(Default)]
pub struct SceneManager {
    scenes: HashMap<String, Box<dyn Scene>>,
    current: Option<String>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scene` under `name`, replacing any scene with that name.
    pub fn add(&mut self, name: impl Into<String>, scene: impl Scene + 'static) {
        self.scenes.insert(name.into(), Box::new(scene));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Name of the last scene loaded.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Load the resources of scene `name`, clear the world and let the scene populate it.
    ///
    /// A resource failure leaves the current scene untouched.
    pub fn load(
        &mut self,
        name: &str,
        ctx: &mut EngineContext,
        fetcher: &mut dyn ResourceFetcher,
    ) -> Result<(), EngineError> {
        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| EngineError::SceneNotFound(name.to_string()))?;

        scene.resources().enqueue(&mut ctx.resources);
        ctx.resources.load_all_resources(fetcher)?;

        ctx.objects.destroy_all(&mut ctx.events);
        ctx.camera.cancel_shake();
        scene.load(ctx);
        self.current = Some(name.to_string());
        log::info!("scene `{name}` loaded with {} objects", ctx.objects.len());
        Ok(())
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SceneManager")
            .field("scenes", &names)
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::loader::MemoryFetcher;
    use crate::components::game_object::GameObject;
    use crate::error::ResourceError;

    struct Menu;

    impl Scene for Menu {
        fn resources(&self) -> SceneResources {
            SceneResources {
                images: vec!["img/logo.png".into()],
                ..Default::default()
            }
        }

        fn load(&mut self, ctx: &mut EngineContext) {
            ctx.resources
                .get_image_by_name("logo")
                .expect("logo is loaded before the scene");
            ctx.instantiate(GameObject::new().with_name("logo"));
        }
    }

    struct Empty;

    impl Scene for Empty {
        fn load(&mut self, _ctx: &mut EngineContext) {}
    }

    #[test]
    fn load_replaces_the_world() {
        let mut scenes = SceneManager::new();
        scenes.add("menu", Menu);
        let mut ctx = EngineContext::default();
        ctx.instantiate(GameObject::new().with_name("leftover"));
        let mut fetcher = MemoryFetcher::new().with("img/logo.png", vec![0u8]);

        scenes.load("menu", &mut ctx, &mut fetcher).unwrap();
        assert!(ctx.objects.get_by_name("leftover").is_none());
        assert!(ctx.objects.get_by_name("logo").is_some());
        assert_eq!(scenes.current(), Some("menu"));
    }

    #[test]
    fn unknown_scene_is_an_error() {
        let mut scenes = SceneManager::new();
        scenes.add("empty", Empty);
        let mut ctx = EngineContext::default();
        let err = scenes.load("nope", &mut ctx, &mut MemoryFetcher::new()).unwrap_err();
        assert!(matches!(err, EngineError::SceneNotFound(ref name) if name == "nope"));
    }

    #[test]
    fn resource_failure_keeps_current_world() {
        let mut scenes = SceneManager::new();
        scenes.add("menu", Menu);
        let mut ctx = EngineContext::default();
        ctx.instantiate(GameObject::new().with_name("leftover"));
        let err = scenes.load("menu", &mut ctx, &mut MemoryFetcher::new()).unwrap_err();
        assert!(matches!(err, EngineError::Resource(ResourceError::Fetch { .. })));
        assert!(ctx.objects.get_by_name("leftover").is_some());
        assert_eq!(scenes.current(), None);
    }
}
