//! Drawing seam between the field and whatever it paints on.
//!
//! `ParticleField` only ever talks to a `Surface`; the browser build uses
//! `CanvasSurface`, tests use an in-memory recorder.

use crate::palette::Rgba;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    /// Pixel width; 0 means "not laid out yet".
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// False once the host has removed the surface; draws become no-ops.
    fn is_attached(&self) -> bool {
        true
    }

    fn has_valid_size(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    fn resize(&mut self, width: f64, height: f64);

    fn clear(&mut self);

    /// Fill the whole surface with a radial gradient centered at `(cx, cy)`
    /// going from `inner` at the center to transparent at `radius`.
    fn radial_wash(&mut self, cx: f64, cy: f64, radius: f64, inner: Rgba);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
}

/// 2-D canvas element plus its rendering context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, crate::FieldError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(crate::FieldError::NoContext)?
            .dyn_into()
            .map_err(|_| crate::FieldError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// CSS layout size of the canvas element (what the container gives it).
    pub fn client_size(&self) -> (f64, f64) {
        (
            self.canvas.client_width().max(0) as f64,
            self.canvas.client_height().max(0) as f64,
        )
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn is_attached(&self) -> bool {
        self.canvas.is_connected()
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn radial_wash(&mut self, cx: f64, cy: f64, radius: f64, inner: Rgba) {
        // Negative radius throws in the browser; nothing to draw anyway.
        if radius <= 0.0 {
            return;
        }
        let Ok(gradient) = self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &inner.to_string());
        let _ = gradient.add_color_stop(1.0, &Rgba::TRANSPARENT.to_string());
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }
}
