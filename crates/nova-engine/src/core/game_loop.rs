use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::core::engine::Core;
use crate::core::time::FixedInterval;
use crate::renderer::Renderer;

/// Render cadence of the headless runner (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Cloneable stop flag, checked between loop iterations.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives a [`Core`] without a browser: frames at 60 Hz and collision passes
/// at the configured interval, both on the calling thread.
pub struct HeadlessRunner<R: Renderer> {
    core: Core<R>,
    frames: FixedInterval,
    fixed: FixedInterval,
    clock: Duration,
    stop: StopHandle,
}

impl<R: Renderer> HeadlessRunner<R> {
    /// `core` should already have a scene loaded with `load_scene_and_run`.
    pub fn new(core: Core<R>) -> Self {
        let fixed = FixedInterval::new(core.fixed_interval());
        Self {
            core,
            frames: FixedInterval::new(FRAME_INTERVAL),
            fixed,
            clock: Duration::ZERO,
            stop: StopHandle::new(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn core(&self) -> &Core<R> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut Core<R> {
        &mut self.core
    }

    pub fn into_core(self) -> Core<R> {
        self.core
    }

    /// Move the runner's clock forward by `dt` and run whatever became due.
    /// The frame runs before the collision pass when both are due.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        if self.frames.accumulate(dt) {
            self.core.frame(self.clock.as_secs_f64() * 1000.0);
        }
        if self.fixed.accumulate(dt) {
            self.core.fixed_step();
        }
    }

    /// Run until the stop handle fires.
    pub fn run(&mut self) {
        self.run_until(|_| false);
    }

    /// Run for `limit` of wall time, or until stopped.
    pub fn run_for(&mut self, limit: Duration) {
        let end = self.clock + limit;
        self.run_until(|clock| clock >= end);
    }

    fn run_until<F: Fn(Duration) -> bool>(&mut self, done: F) {
        log::info!("headless runner started");
        let mut last = Instant::now();
        while !self.stop.is_stopped() && !done(self.clock) {
            let now = Instant::now();
            self.advance(now - last);
            last = now;
            let nap = self.frames.remaining().min(self.fixed.remaining());
            if !nap.is_zero() {
                thread::sleep(nap);
            }
        }
        log::info!("headless runner stopped after {:?}", self.clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::CoreOptions;
    use crate::api::context::EngineContext;
    use crate::assets::loader::MemoryFetcher;
    use crate::core::scene::Scene;
    use crate::renderer::{CanvasRenderer, RecordingSurface};

    struct Empty;

    impl Scene for Empty {
        fn load(&mut self, _ctx: &mut EngineContext) {}
    }

    fn runner() -> HeadlessRunner<CanvasRenderer<RecordingSurface>> {
        let options = CoreOptions::default();
        let viewport = options.renderer_options.resolution;
        let mut core = Core::new(options, CanvasRenderer::new(RecordingSurface::default()), viewport);
        core.add_scene("empty", Empty);
        core.load_scene_and_run("empty", &mut MemoryFetcher::new()).unwrap();
        HeadlessRunner::new(core)
    }

    #[test]
    fn advance_runs_frames_at_sixty_hertz() {
        let mut runner = runner();
        for _ in 0..100 {
            runner.advance(Duration::from_millis(10));
        }
        // 1 s of clock time in 10 ms steps: a frame whenever 16.667 ms piled up.
        let frames = runner.core().renderer().surface().frames_presented;
        assert_eq!(frames, 50);
    }

    #[test]
    fn stopped_runner_returns_immediately() {
        let mut runner = runner();
        runner.stop_handle().stop();
        runner.run();
        assert_eq!(runner.core().renderer().surface().frames_presented, 0);
    }

    #[test]
    fn run_for_stops_on_its_own() {
        let mut runner = runner();
        runner.run_for(Duration::from_millis(50));
        assert!(runner.core().renderer().surface().frames_presented >= 1);
    }
}
