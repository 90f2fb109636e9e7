use serde::{Deserialize, Serialize};

use crate::assets::loader::ResourceLoader;

/// Resources a scene needs before it can load, as URLs.
/// Can be written in code or loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneResources {
    pub images: Vec<String>,
    pub fonts: Vec<String>,
    pub sounds: Vec<String>,
    pub locales: Vec<String>,
}

impl SceneResources {
    /// Parse a resource list from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.fonts.is_empty() && self.sounds.is_empty() && self.locales.is_empty()
    }

    /// Put every listed URL on the loader's queues.
    pub fn enqueue(&self, loader: &mut ResourceLoader) {
        for url in &self.images {
            loader.add_image_to_queue(url);
        }
        for url in &self.fonts {
            loader.add_font_to_queue(url);
        }
        for url in &self.sounds {
            loader.add_sound_to_queue(url);
        }
        for url in &self.locales {
            loader.add_locale_to_queue(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_manifest() {
        let json = r#"{
            "images": ["img/hero.png", "img/tiles.png"],
            "sounds": ["sfx/jump.wav"]
        }"#;
        let resources = SceneResources::from_json(json).unwrap();
        assert_eq!(resources.images.len(), 2);
        assert_eq!(resources.sounds, vec!["sfx/jump.wav".to_string()]);
        assert!(resources.fonts.is_empty());
        assert!(!resources.is_empty());
    }

    #[test]
    fn enqueue_fills_the_loader() {
        let resources = SceneResources {
            images: vec!["a.png".into()],
            locales: vec!["menu.json".into()],
            ..Default::default()
        };
        let mut loader = ResourceLoader::new();
        resources.enqueue(&mut loader);
        assert_eq!(loader.progress(), (0, 2));
    }
}
