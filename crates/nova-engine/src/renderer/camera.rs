use glam::Vec2;

use crate::components::game_object::GameObject;
use crate::core::rng::Rng;

/// Length of one shake slice. Each slice shows one jitter sample.
pub const SHAKE_TICK_MS: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
struct CameraShake {
    /// Camera position before the shake started; restored when it ends.
    original: Vec2,
    duration_ms: f32,
    intensity: f32,
    elapsed_ms: f32,
}

/// World-space pan offset shared by the renderer, collisions and input hit-testing.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Subtracted from the screen position of every camera-affected object.
    pub position: Vec2,
    shake: Option<CameraShake>,
    rng: Rng,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_seed(0x5EED_CA3E)
    }

    /// Camera whose shake jitter is drawn from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            position: Vec2::ZERO,
            shake: None,
            rng: Rng::new(seed),
        }
    }

    /// Offset to subtract from `object`'s position: zero for objects that
    /// opt out of camera following.
    pub fn offset_for(&self, object: &GameObject) -> Vec2 {
        if object.affected_by_camera {
            self.position
        } else {
            Vec2::ZERO
        }
    }

    /// Start a shake of `duration_ms` whose jitter decays linearly from `intensity`.
    ///
    /// A shake already running is cancelled first: the camera goes back to
    /// where that shake started, and the new shake starts from there.
    pub fn shake(&mut self, duration_ms: f32, intensity: f32) {
        self.cancel_shake();
        if !(duration_ms > 0.0) {
            return;
        }
        self.shake = Some(CameraShake {
            original: self.position,
            duration_ms,
            intensity: intensity.abs(),
            elapsed_ms: 0.0,
        });
    }

    /// Stop a running shake and restore the position it started from.
    pub fn cancel_shake(&mut self) {
        if let Some(shake) = self.shake.take() {
            self.position = shake.original;
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Advance a running shake by `delta_ms` of wall time.
    pub fn advance_shake(&mut self, delta_ms: f32) {
        let Some(shake) = self.shake.as_mut() else {
            return;
        };
        shake.elapsed_ms += delta_ms.max(0.0);
        if shake.elapsed_ms >= shake.duration_ms {
            self.cancel_shake();
            return;
        }

        let slice = (shake.elapsed_ms / SHAKE_TICK_MS).floor();
        let intensity = shake.intensity * (1.0 - slice * SHAKE_TICK_MS / shake.duration_ms);
        let original = shake.original;
        let jitter = Vec2::new(
            self.rng.range(-intensity, intensity),
            self.rng.range(-intensity, intensity),
        );
        self.position = original + jitter;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
