use glam::Vec2;
use osmo_core::surface::{RadialGradient, Rect};
use osmo_core::{DrawingSurface, Rgba};
use web_sys as web;

/// `DrawingSurface` over a canvas 2D context.
///
/// Browser failures (gradient creation, bad color stops) drop the affected
/// primitive and log once per primitive; the frame continues.
pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn full_rect(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn gradient(&self, g: &RadialGradient) -> Option<web::CanvasGradient> {
        let (cx, cy) = (g.center.x as f64, g.center.y as f64);
        let grad = match self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, g.radius as f64) {
            Ok(grad) => grad,
            Err(e) => {
                log::error!("[frame] createRadialGradient failed: {:?}", e);
                return None;
            }
        };
        for stop in &g.stops {
            if let Err(e) = grad.add_color_stop(stop.offset, &stop.color.to_css()) {
                log::error!("[frame] addColorStop failed: {:?}", e);
                return None;
            }
        }
        Some(grad)
    }
}

impl DrawingSurface for Canvas2dSurface {
    fn clear(&mut self) {
        let (w, h) = self.full_rect();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_opaque_rect(&mut self, color: Rgba, rect: Rect) {
        self.ctx.set_fill_style_str(&color.with_alpha(1.0).to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_with_gradient(&mut self, gradient: &RadialGradient, rect: Rect) {
        if let Some(grad) = self.gradient(gradient) {
            self.ctx.set_fill_style_canvas_gradient(&grad);
            self.ctx
                .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn set_size(&mut self, width: f32, height: f32) {
        // Assigning the same size still wipes the canvas, so skip no-ops.
        let (w, h) = (width.max(0.0).round() as u32, height.max(0.0).round() as u32);
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }
}
