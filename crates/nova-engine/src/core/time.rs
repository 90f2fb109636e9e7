use std::time::Duration;

/// Frame timing shared with every behaviour through the context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds since the previous frame, rounded to 4 decimals. Zero on the first frame.
    pub delta_time: f32,
    /// Host timestamp of the current frame in milliseconds.
    pub timestamp: f64,
}

impl Time {
    /// Advance to the frame stamped `timestamp`. `previous` is the last frame's stamp,
    /// `None` on the very first frame.
    pub fn advance(&mut self, timestamp: f64, previous: Option<f64>) {
        let delta = previous.map_or(0.0, |prev| (timestamp - prev) / 1000.0);
        self.delta_time = ((delta * 10_000.0).round() / 10_000.0) as f32;
        self.timestamp = timestamp;
    }
}

/// Wall-clock gate for the fixed collision loop.
///
/// Unlike a physics accumulator it never catches up: however long the host
/// stalled, a due interval yields exactly one pass.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    wait: Duration,
    elapsed: Duration,
}

impl FixedInterval {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            elapsed: Duration::ZERO,
        }
    }

    /// Add wall time. Returns true when a pass is due; the counter then restarts.
    pub fn accumulate(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.wait {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Time left before the next pass.
    pub fn remaining(&self) -> Duration {
        self.wait.saturating_sub(self.elapsed)
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}
