//! Canvas2D scene drawing: background, tap zone, circles, particles

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Circle, GameState, Particle};

/// Zone tint used for the band, borders and labels
const ZONE_COLOR: &str = "#667eea";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one frame. `time` is the rAF timestamp (ms), used only for the
    /// pulse animations.
    pub fn render(&self, state: &GameState, settings: &Settings, time: f64) {
        self.draw_background();
        self.draw_target_zone(settings, time);

        for circle in &state.circles {
            self.draw_circle(circle, settings, time);
        }

        // Newest particles win when the quality preset caps the draw count
        let cap = settings.max_particles();
        let skip = state.particles.len().saturating_sub(cap);
        for particle in state.particles.iter().skip(skip) {
            self.draw_particle(particle);
        }
    }

    fn draw_background(&self) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        gradient.add_color_stop(0.0, "#ffffff").ok();
        gradient.add_color_stop(1.0, "#f0f0f0").ok();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_target_zone(&self, settings: &Settings, time: f64) {
        let ctx = &self.ctx;
        let zone_top = ZONE_TOP as f64;

        let gradient = ctx.create_linear_gradient(0.0, zone_top, 0.0, self.height);
        gradient.add_color_stop(0.0, "rgba(102, 126, 234, 0.15)").ok();
        gradient.add_color_stop(0.5, "rgba(102, 126, 234, 0.25)").ok();
        gradient.add_color_stop(1.0, "rgba(102, 126, 234, 0.35)").ok();
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, zone_top, self.width, self.height - zone_top);

        // Pulsing dashed top border
        let pulse_offset = if settings.effective_zone_pulse() {
            (time / 300.0).sin() * 3.0
        } else {
            0.0
        };
        ctx.set_stroke_style_str(ZONE_COLOR);
        ctx.set_line_width(4.0);
        let dash = js_sys::Array::of2(&JsValue::from_f64(15.0), &JsValue::from_f64(8.0));
        ctx.set_line_dash(&dash).ok();
        ctx.begin_path();
        ctx.move_to(0.0, zone_top + pulse_offset);
        ctx.line_to(self.width, zone_top + pulse_offset);
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new()).ok();

        ctx.set_fill_style_str("rgba(102, 126, 234, 0.8)");
        ctx.set_font("bold 20px Arial");
        ctx.set_text_align("center");
        ctx.fill_text("⬇ TAP ZONE ⬇", self.width / 2.0, zone_top + 25.0).ok();

        ctx.set_font("14px Arial");
        ctx.set_fill_style_str("rgba(102, 126, 234, 0.6)");
        ctx.fill_text(
            "Match color when circle is here!",
            self.width / 2.0,
            zone_top + 50.0,
        )
        .ok();

        // Solid bottom border marks the end of the scoring band
        ctx.set_stroke_style_str(ZONE_COLOR);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(0.0, ZONE_INNER_BOTTOM as f64);
        ctx.line_to(self.width, ZONE_INNER_BOTTOM as f64);
        ctx.stroke();
    }

    fn draw_circle(&self, circle: &Circle, settings: &Settings, time: f64) {
        let ctx = &self.ctx;
        let (x, y, r) = (circle.x as f64, circle.y as f64, circle.radius as f64);
        let css = circle.color.css();

        if circle.in_zone && settings.effective_zone_glow() {
            ctx.save();
            ctx.set_shadow_blur(25.0);
            ctx.set_shadow_color(css);

            // Pulsing ring around the circle
            let pulse_size = (time / 200.0).sin() * 6.0 + 6.0;
            ctx.set_stroke_style_str(css);
            ctx.set_line_width(5.0);
            ctx.begin_path();
            ctx.arc(x, y, r + pulse_size, 0.0, TAU).ok();
            ctx.stroke();
            ctx.restore();
        }

        // Drop shadow
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.1)");
        ctx.begin_path();
        ctx.arc(x + 3.0, y + 3.0, r, 0.0, TAU).ok();
        ctx.fill();

        // Body
        ctx.set_fill_style_str(css);
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, TAU).ok();
        ctx.fill();

        // Highlight
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
        ctx.begin_path();
        ctx.arc(x - 8.0, y - 8.0, 8.0, 0.0, TAU).ok();
        ctx.fill();

        // Border, thicker inside the zone
        ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
        ctx.set_line_width(if circle.in_zone { 4.0 } else { 3.0 });
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, TAU).ok();
        ctx.stroke();

        if circle.in_zone {
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
            ctx.set_font("bold 24px Arial");
            ctx.set_text_align("center");
            ctx.fill_text("▼", x, y + 8.0).ok();
        }
    }

    fn draw_particle(&self, particle: &Particle) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(particle.alpha.max(0.0) as f64);
        ctx.set_fill_style_str(particle.color.css());
        ctx.begin_path();
        ctx.arc(
            particle.pos.x as f64,
            particle.pos.y as f64,
            particle.size.max(0.1) as f64,
            0.0,
            TAU,
        )
        .ok();
        ctx.fill();
        ctx.restore();
    }
}
