use flock_core::{Bounds, FlockConfig, FrameLimiter, Preset, Simulation, Surface, Vector2D};
use flock_shared::{Settings, StatusReport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, TouchEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

const BACKGROUND: &str = "#0a0a0a";
const OUTLINE: &str = "rgba(255, 255, 255, 0.3)";

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Cyan for slow agents, shading to blue at the speed limit.
fn shade_color(shade: f32) -> String {
    let hue = 180.0 + shade.clamp(0.0, 1.0) * 60.0;
    format!("hsl({:.0}, 70%, 60%)", hue)
}

/// Draws on a 2D canvas context.
struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    type Error = JsValue;

    fn clear(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.context.set_fill_style_str(BACKGROUND);
        self.context.fill_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn draw_circle(&mut self, center: Vector2D, radius: f32, shade: f32) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.context.close_path();

        self.context.set_stroke_style_str(&shade_color(shade));
        self.context.set_line_width(1.0);
        self.context.stroke();
        Ok(())
    }

    fn draw_polygon(&mut self, vertices: &[Vector2D], shade: f32) -> Result<(), JsValue> {
        let Some((first, rest)) = vertices.split_first() else {
            return Ok(());
        };

        self.context.begin_path();
        self.context.move_to(first.x as f64, first.y as f64);
        for vertex in rest {
            self.context.line_to(vertex.x as f64, vertex.y as f64);
        }
        self.context.close_path();

        self.context.set_fill_style_str(&shade_color(shade));
        self.context.fill();

        self.context.set_stroke_style_str(OUTLINE);
        self.context.set_line_width(1.0);
        self.context.stroke();
        Ok(())
    }
}

#[wasm_bindgen]
pub struct FlockSimulation {
    simulation: Simulation,
    limiter: FrameLimiter,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl FlockSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        preset: &str,
    ) -> Result<FlockSimulation, JsValue> {
        let settings = Settings {
            preset: Some(preset.to_string()),
            width: Some(width as f32),
            height: Some(height as f32),
            ..Settings::default()
        };
        Self::build(canvas_id, &settings)
    }

    /// Builds a simulation from a JSON settings document.
    pub fn from_settings(
        canvas_id: &str,
        settings_json: &str,
    ) -> Result<FlockSimulation, JsValue> {
        let settings = Settings::from_json(settings_json).map_err(js_error)?;
        Self::build(canvas_id, &settings)
    }

    /// Animation-frame callback: renders and advances one tick when the frame
    /// limiter lets `now_ms` through. Returns whether a frame was produced.
    pub fn frame(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        if !self.limiter.ready(now_ms) {
            return Ok(false);
        }
        self.render()?;
        self.update();
        Ok(true)
    }

    pub fn update(&mut self) {
        self.simulation.update();
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let mut surface = CanvasSurface {
            context: &self.context,
        };
        self.simulation.render(&mut surface)
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.simulation
            .resize(width as f32, height as f32)
            .map_err(js_error)?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.limiter.reset();
        console_log!(
            "Resized to {}x{}, {} agents",
            width,
            height,
            self.simulation.agents().len()
        );
        Ok(())
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.simulation
            .set_pointer(Some(Vector2D::new(x as f32, y as f32)));
    }

    pub fn clear_pointer(&mut self) {
        self.simulation.set_pointer(None);
    }

    pub fn add_agent_at(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.simulation
            .spawn_random_at(Vector2D::new(x as f32, y as f32))
            .map_err(js_error)?;
        console_log!(
            "Added agent at ({}, {}). Total agents: {}",
            x,
            y,
            self.simulation.agents().len()
        );
        Ok(())
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        let (x, y) = self.canvas_point(event.client_x(), event.client_y());
        self.set_pointer(x, y);
    }

    pub fn handle_mouse_leave(&mut self) {
        self.clear_pointer();
    }

    pub fn handle_mouse_click(&mut self, event: MouseEvent) -> Result<(), JsValue> {
        let (x, y) = self.canvas_point(event.client_x(), event.client_y());
        self.add_agent_at(x, y)
    }

    pub fn handle_touch(&mut self, event: TouchEvent) -> Result<(), JsValue> {
        let touches = event.touches();
        for i in 0..touches.length() {
            if let Some(touch) = touches.item(i) {
                let (x, y) = self.canvas_point(touch.client_x(), touch.client_y());
                self.add_agent_at(x, y)?;
            }
        }
        Ok(())
    }

    pub fn agent_count(&self) -> usize {
        self.simulation.agents().len()
    }

    pub fn ticks(&self) -> u64 {
        self.simulation.ticks()
    }

    pub fn status_json(&self) -> Result<String, JsValue> {
        StatusReport::from_simulation(&self.simulation)
            .to_json()
            .map_err(js_error)
    }

    pub fn set_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset: Preset = name.parse().map_err(js_error)?;
        self.simulation.apply_preset(preset).map_err(js_error)?;
        console_log!(
            "Switched to {} preset, {} agents",
            preset,
            self.simulation.agents().len()
        );
        Ok(())
    }

    pub fn set_separation_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.tune(|config| config.separation_weight = weight as f32)
    }

    pub fn set_alignment_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.tune(|config| config.alignment_weight = weight as f32)
    }

    pub fn set_cohesion_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.tune(|config| config.cohesion_weight = weight as f32)
    }

    pub fn set_pointer_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.tune(|config| config.pointer_weight = weight as f32)
    }

    pub fn set_speed_limit(&mut self, speed: f64) -> Result<(), JsValue> {
        self.tune(|config| config.speed_limit = speed as f32)
    }

    pub fn set_jitter(&mut self, jitter: f64) -> Result<(), JsValue> {
        self.tune(|config| config.jitter = jitter as f32)
    }
}

impl FlockSimulation {
    fn build(canvas_id: &str, settings: &Settings) -> Result<FlockSimulation, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let width = match settings.width {
            Some(width) => width,
            None => window.inner_width()?.as_f64().unwrap_or(800.0) as f32,
        };
        let height = match settings.height {
            Some(height) => height,
            None => window.inner_height()?.as_f64().unwrap_or(600.0) as f32,
        };

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let bounds = Bounds::new(width, height).map_err(js_error)?;
        let seed = settings
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
        let simulation = Simulation::with_config(
            settings.flock_config().map_err(js_error)?,
            settings.glyph().map_err(js_error)?,
            settings.density().map_err(js_error)?,
            bounds,
            seed,
        )
        .map_err(js_error)?;
        let limiter = FrameLimiter::new(settings.fps()).map_err(js_error)?;

        console_log!(
            "Initializing flock simulation with {} agents ({}x{})",
            simulation.agents().len(),
            width,
            height
        );

        Ok(FlockSimulation {
            simulation,
            limiter,
            canvas,
            context,
        })
    }

    fn canvas_point(&self, client_x: i32, client_y: i32) -> (f64, f64) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        (client_x as f64 - rect.left(), client_y as f64 - rect.top())
    }

    fn tune(&mut self, change: impl FnOnce(&mut FlockConfig)) -> Result<(), JsValue> {
        let mut config = *self.simulation.config();
        change(&mut config);
        self.simulation.set_config(config).map_err(js_error)
    }
}
