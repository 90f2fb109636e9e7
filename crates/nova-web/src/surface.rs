use std::collections::HashMap;
use std::f64::consts::TAU;

use nova_engine::renderer::Surface;
use nova_engine::{DrawCommand, EngineError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Paints draw commands onto an HTML canvas through its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Decoded images by resource name, handed over by the page.
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(EngineError::MissingDrawingContext)?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    pub fn add_image(&mut self, name: impl Into<String>, image: HtmlImageElement) {
        self.images.insert(name.into(), image);
    }

    /// Resize the backing store to the new viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn paint(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear => {
                ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
            }
            DrawCommand::Rect { top_left, size, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(top_left.x as f64, top_left.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::Circle { center, radius, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Line { from, to, width, color } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Text { text, position, font, color, centered } => {
                ctx.set_font(font);
                ctx.set_fill_style_str(&color.to_css());
                let mut x = position.x as f64;
                if *centered {
                    x -= ctx.measure_text(text)?.width() / 2.0;
                }
                ctx.fill_text(text, x, position.y as f64)?;
            }
            DrawCommand::Sprite {
                image,
                source,
                center,
                size,
                angle,
                alpha,
                smoothing,
            } => {
                let Some(element) = self.images.get(image) else {
                    log::warn!("image `{image}` was never handed to the canvas");
                    return Ok(());
                };
                ctx.save();
                ctx.set_image_smoothing_enabled(*smoothing);
                ctx.set_global_alpha(*alpha as f64);
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(angle.to_radians() as f64)?;
                let [sx, sy, sw, sh] = source.map(f64::from);
                let result = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    element,
                    sx,
                    sy,
                    sw,
                    sh,
                    -size.x as f64 / 2.0,
                    -size.y as f64 / 2.0,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
                result?;
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn present(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            if let Err(err) = self.paint(command) {
                log::warn!("canvas call failed: {err:?}");
            }
        }
    }
}
