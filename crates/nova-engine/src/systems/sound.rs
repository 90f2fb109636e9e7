use serde::Serialize;

use crate::assets::loader::ResourceLoader;
use crate::error::ResourceError;

/// Playback request for the host's audio backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SoundCommand {
    Play { name: String, looped: bool, volume: f32 },
    SetVolume { name: String, volume: f32 },
    Stop { name: String },
}

/// Validates sound requests against the loader and queues them for the host.
/// The host drains the queue once per frame.
#[derive(Debug, Clone)]
pub struct SoundManager {
    global_volume: f32,
    commands: Vec<SoundCommand>,
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

impl SoundManager {
    pub fn new() -> Self {
        Self {
            global_volume: 1.0,
            commands: Vec::with_capacity(32),
        }
    }

    /// Queue playback of a loaded sound. A non-positive `volume` falls back
    /// to the global volume.
    pub fn play(&mut self, loader: &ResourceLoader, name: &str, looped: bool, volume: f32) -> Result<(), ResourceError> {
        loader.get_sound_by_name(name)?;
        let volume = if volume > 0.0 { clamp_volume(volume) } else { self.global_volume };
        self.commands.push(SoundCommand::Play {
            name: name.to_string(),
            looped,
            volume,
        });
        Ok(())
    }

    pub fn set_volume(&mut self, loader: &ResourceLoader, name: &str, volume: f32) -> Result<(), ResourceError> {
        loader.get_sound_by_name(name)?;
        self.commands.push(SoundCommand::SetVolume {
            name: name.to_string(),
            volume: clamp_volume(volume),
        });
        Ok(())
    }

    pub fn stop(&mut self, loader: &ResourceLoader, name: &str) -> Result<(), ResourceError> {
        loader.get_sound_by_name(name)?;
        self.commands.push(SoundCommand::Stop { name: name.to_string() });
        Ok(())
    }

    /// Volume used by `play` calls without their own volume.
    pub fn set_global_volume(&mut self, volume: f32) {
        self.global_volume = clamp_volume(volume);
    }

    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    /// Take every queued command.
    pub fn drain(&mut self) -> Vec<SoundCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new()
    }
}
