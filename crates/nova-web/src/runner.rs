use glam::Vec2;
use nova_engine::{
    CanvasRenderer, Core, CoreOptions, EngineError, InputEvent, MemoryFetcher, Scene, WindowEvent,
};
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::surface::CanvasSurface;

/// Engine plus everything the page hands over, driven from JavaScript.
///
/// A page creates one runner in a `thread_local!` (see [`export_engine!`]),
/// because wasm-bindgen cannot export generic structs directly.
///
/// [`export_engine!`]: crate::export_engine
pub struct WebRunner {
    core: Core<CanvasRenderer<CanvasSurface>>,
    /// Resource bytes fetched by the page, keyed by URL.
    fetcher: MemoryFetcher,
}

impl WebRunner {
    /// `options_json` may be empty, in which case every option takes its default.
    pub fn new(canvas: HtmlCanvasElement, options_json: &str) -> Result<Self, EngineError> {
        let options = if options_json.trim().is_empty() {
            CoreOptions::default()
        } else {
            CoreOptions::from_json(options_json)?
        };
        let viewport = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let surface = CanvasSurface::from_canvas(canvas)?;
        Ok(Self {
            core: Core::new(options, CanvasRenderer::new(surface), viewport),
            fetcher: MemoryFetcher::new(),
        })
    }

    pub fn add_scene(&mut self, name: impl Into<String>, scene: impl Scene + 'static) {
        self.core.add_scene(name, scene);
    }

    /// Bytes for a resource URL a scene lists.
    pub fn add_resource(&mut self, url: &str, bytes: Vec<u8>) {
        self.fetcher.insert(url, bytes);
    }

    /// Decoded image the canvas draws sprites from, under its resource name.
    pub fn add_image(&mut self, name: &str, image: HtmlImageElement) {
        self.core.renderer_mut().surface_mut().add_image(name, image);
    }

    /// Load a scene and start both loops.
    pub fn load_scene(&mut self, name: &str) -> Result<(), EngineError> {
        self.core.load_scene_and_run(name, &mut self.fetcher)
    }

    /// Called from `requestAnimationFrame` with its timestamp.
    pub fn frame(&mut self, timestamp: f64) {
        self.core.frame(timestamp);
    }

    /// Called from a `setTimeout` chain every [`WebRunner::fixed_interval_ms`].
    pub fn fixed_tick(&mut self) -> u32 {
        self.core.fixed_step() as u32
    }

    pub fn fixed_interval_ms(&self) -> u32 {
        self.core.fixed_interval().as_millis() as u32
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.core.handle_input(event);
    }

    pub fn push_window_event(&mut self, event: WindowEvent) {
        if let WindowEvent::Resized { width, height } = event {
            self.core.renderer_mut().surface_mut().resize(width as u32, height as u32);
        }
        self.core.handle_window_event(event);
    }

    /// Sound commands queued since the last call, as a JSON array.
    pub fn drain_sound_commands(&mut self) -> String {
        let commands = self.core.context_mut().sounds.drain();
        serde_json::to_string(&commands).unwrap_or_else(|err| {
            log::error!("failed to encode sound commands: {err}");
            "[]".to_string()
        })
    }

    pub fn core(&self) -> &Core<CanvasRenderer<CanvasSurface>> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut Core<CanvasRenderer<CanvasSurface>> {
        &mut self.core
    }
}

/// Pair up a flat `[x0, y0, x1, y1, ...]` array from a touch handler.
/// A trailing odd value is dropped.
pub fn points_from_flat(coords: &[f32]) -> Vec<Vec2> {
    coords.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect()
}
