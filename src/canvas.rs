use efield_viz::Surface;
use efield_viz::color::Rgb;
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d as Ctx2d, HtmlCanvasElement};

const HUD_FONT: &str = "16px ui-monospace, monospace";

/// `Surface` over a 2D canvas context. Draw calls hit the backing store
/// immediately, so `present` has nothing to flush.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: Ctx2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<Self, JsValue> {
        let ctx: Ctx2d = canvas
            .get_context("2d")?
            .ok_or(JsValue::from_str("no 2d context"))?
            .dyn_into::<Ctx2d>()?;

        // backing store matches the simulation viewport; CSS does the scaling
        canvas.set_width(width);
        canvas.set_height(height);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");

        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgb) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Rgb) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn draw_text(&mut self, text: &str, at: DVec2, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.set_font(HUD_FONT);
        self.ctx.set_text_baseline("top");
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }

    // one path per line instead of one per segment
    fn draw_polyline(&mut self, points: &[DVec2], width: f64, color: Rgb) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }
}
