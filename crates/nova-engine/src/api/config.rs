use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Build environment of the host page. Debug key toggles only work in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererOptions {
    /// Reference ("virtual") resolution game logic is authored against,
    /// written as `[x, y]` or `{ "x": .., "y": .. }`.
    #[serde(deserialize_with = "vec2_from_seq_or_map")]
    pub resolution: Vec2,
    pub image_smoothing_enabled: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            resolution: Vec2::new(1920.0, 1080.0),
            image_smoothing_enabled: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Vec2Repr {
    Seq([f32; 2]),
    Map { x: f32, y: f32 },
}

fn vec2_from_seq_or_map<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
    Ok(match Vec2Repr::deserialize(deserializer)? {
        Vec2Repr::Seq([x, y]) => Vec2::new(x, y),
        Vec2Repr::Map { x, y } => Vec2::new(x, y),
    })
}

/// Debug overlays switched on at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebugOptions {
    pub toggle_fps_rendering_at_start: bool,
    pub toggle_debug_collider_rendering_at_start: bool,
}

/// Fixed collision loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollisionOptions {
    /// When false the fixed loop never runs.
    pub enabled: bool,
    /// Pause between two collision passes, in milliseconds.
    pub fixed_loop_wait_in_ms: u64,
}

impl Default for CollisionOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            fixed_loop_wait_in_ms: 10,
        }
    }
}

/// Configuration for the engine, loaded once at startup.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use nova_engine::CoreOptions;
///
/// let options = CoreOptions::from_json(r#"{
///     "language": "de",
///     "rendererOptions": { "resolution": [1280, 720] },
///     "collisions": { "enabled": true, "fixedLoopWaitInMs": 16 }
/// }"#).unwrap();
/// assert_eq!(options.language, "de");
/// assert_eq!(options.collisions.fixed_loop_wait_in_ms, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreOptions {
    pub language: String,
    pub environment: Environment,
    pub renderer_options: RendererOptions,
    pub debug: DebugOptions,
    pub collisions: CollisionOptions,
}

impl Default for CoreOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            environment: Environment::default(),
            renderer_options: RendererOptions::default(),
            debug: DebugOptions::default(),
            collisions: CollisionOptions::default(),
        }
    }
}

impl CoreOptions {
    /// Parse options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::InvalidOptions)
    }

    /// Wait between two fixed-loop passes.
    pub fn fixed_loop_interval(&self) -> Duration {
        Duration::from_millis(self.collisions.fixed_loop_wait_in_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
