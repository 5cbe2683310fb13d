//! Browser host bindings (wasm32 only)
//!
//! The page owns the frame loop and key handling; it calls `update` with the
//! frame time and the current button state, then `render`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::cartridge::{Cartridge, Galattica};
use crate::consts::{MAX_SUBSTEPS, PLAY_HEIGHT, PLAY_WIDTH, SIM_DT};
use crate::persistence::LocalStorageStore;
use crate::renderer::{Canvas, Rgba};
use crate::settings::Settings;
use crate::sim::TickInput;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    log::info!("Galattica (wasm) starting...");
}

fn css(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

/// `Canvas` over a 2D rendering context, scaled to the element size
struct Context2d<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl Canvas for Context2d<'_> {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str("#e8f0d8");
        self.ctx
            .fill_rect(0.0, 0.0, PLAY_WIDTH as f64, PLAY_HEIGHT as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.set_font(&format!("bold {}px monospace", size));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

/// Page-facing game handle
#[wasm_bindgen]
pub struct WebGalattica {
    cart: Galattica<LocalStorageStore>,
    ctx: CanvasRenderingContext2d,
    input: TickInput,
    accumulator: f32,
}

#[wasm_bindgen]
impl WebGalattica {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<WebGalattica, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let scale = canvas.width() as f64 / PLAY_WIDTH as f64;
        ctx.scale(scale, scale)?;
        Ok(Self {
            cart: Galattica::with_settings(
                LocalStorageStore::new(),
                Settings::load_from_store(&LocalStorageStore::new()),
            ),
            ctx,
            input: TickInput::default(),
            accumulator: 0.0,
        })
    }

    /// Held buttons, sampled every frame
    pub fn set_held(&mut self, left: bool, right: bool, up: bool, down: bool, a: bool) {
        self.input.left = left;
        self.input.right = right;
        self.input.up = up;
        self.input.down = down;
        self.input.a_held = a;
    }

    pub fn press_start(&mut self) {
        self.input.start_pressed = true;
    }

    pub fn press_a(&mut self) {
        self.input.a_pressed = true;
    }

    pub fn press_b(&mut self) {
        self.input.b_pressed = true;
    }

    /// Run fixed simulation steps for `dt` seconds of wall time
    pub fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.cart.update(SIM_DT, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Pulses fire once
            self.input.start_pressed = false;
            self.input.a_pressed = false;
            self.input.b_pressed = false;
        }

        // The page reads `message` for feedback; events only go to the log
        for event in self.cart.drain_events() {
            log::debug!("{:?}", event);
        }
    }

    pub fn render(&self) {
        let mut canvas = Context2d { ctx: &self.ctx };
        self.cart.render(&mut canvas);
    }

    pub fn reset(&mut self) {
        self.cart.reset();
    }

    pub fn back(&mut self) {
        self.cart.back();
    }

    pub fn hud_left(&self) -> String {
        self.cart.hud().0
    }

    pub fn hud_right(&self) -> String {
        self.cart.hud().1
    }

    pub fn message(&self) -> String {
        self.cart.state().message.clone()
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        let mut settings = self.cart.settings().clone();
        settings.reduced_motion = on;
        if let Err(e) = settings.save_to_store(&mut LocalStorageStore::new()) {
            log::warn!("Failed to save settings: {}", e);
        }
        self.cart.set_settings(settings);
    }
}
