#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod graph;
pub mod math;
pub mod numeric;
pub mod random;
pub mod render;
pub mod scene;
pub mod shape;

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub use color::{Color, ColorParseError};
pub use graph::{Graph, GraphOptions, NumberLine, OptionsError};
pub use math::{Mat2x2, Mat3x3, Mat4x4, Vec2, Vec3};
pub use random::Prng;
pub use render::{CanvasContext, CommandRecorder, DrawCommand, RenderContext, RenderError};
pub use scene::{Mesh3D, Scene3D, SceneOptions};
pub use shape::{Drawable, FunctionGraph, Shape2D, Sprite, Text2D};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // a second initialize() keeps the logger that is already installed
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Getallijn-instellingen zoals ze vanuit JavaScript binnenkomen.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct NumberLineOptions {
    step: f64,
    offset_x: f64,
    offset_y: f64,
    min: Option<f64>,
    max: Option<f64>,
    color: String,
    font: String,
}

impl Default for NumberLineOptions {
    fn default() -> Self {
        Self {
            step: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            min: None,
            max: None,
            color: "black".to_owned(),
            font: "30px arial".to_owned(),
        }
    }
}

impl NumberLineOptions {
    fn into_number_line(self) -> Result<NumberLine, JsValue> {
        Ok(NumberLine {
            step: self.step,
            offset: Vec2::new(self.offset_x, self.offset_y),
            min: self.min.unwrap_or(f64::NEG_INFINITY),
            max: self.max.unwrap_or(f64::INFINITY),
            color: parse_color(&self.color)?,
            font: self.font,
        })
    }
}

/// Tekenoppervlak voor grafieken op een HTML-canvas.
#[wasm_bindgen]
pub struct CanvasPlot {
    graph: Graph<CanvasContext>,
}

#[wasm_bindgen]
impl CanvasPlot {
    /// Maak een plot op de gegeven 2D-context. `options` mag `undefined` zijn.
    #[wasm_bindgen(constructor)]
    pub fn new(ctx: CanvasRenderingContext2d, options: JsValue) -> Result<CanvasPlot, JsValue> {
        let options: GraphOptions = options_from_js(options)?;
        let context = CanvasContext::new(ctx).map_err(to_js_error)?;
        let graph = Graph::with_options(context, &options).map_err(to_js_error)?;
        debug_log!("CanvasPlot aangemaakt ({}x{})", options.width, options.height);
        Ok(CanvasPlot { graph })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.graph.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.graph.height()
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(js_error("canvasgrootte moet positief en eindig zijn"));
        }
        self.graph.set_size(width, height);
        Ok(())
    }

    /// Zet de oorsprong in het midden van het canvas.
    pub fn center(&mut self) {
        self.graph.center();
    }

    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.graph.set_translation(x, y);
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.graph.translate(x, y);
    }

    pub fn set_scale(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        if !(x.is_finite() && y.is_finite()) || x == 0.0 || y == 0.0 {
            return Err(js_error("schaal moet eindig en niet nul zijn"));
        }
        self.graph.set_scale(x, y);
        Ok(())
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.graph.scale(x, y);
    }

    /// Zet pixelcoördinaten (bijv. van een muisevent) om naar grafiekcoördinaten.
    pub fn to_graph(&self, px: f64, py: f64) -> Vec<f64> {
        let pos = self.graph.to_graph(px, py);
        vec![pos.x, pos.y]
    }

    pub fn clear_background(&mut self) {
        self.graph.clear_background();
    }

    pub fn fill_background(&mut self, color: &str) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.graph.fill_background(&color);
        Ok(())
    }

    pub fn draw_axis(&mut self, line_width: Option<f64>, color: Option<String>) -> Result<(), JsValue> {
        let color = optional_color(color.as_deref(), Color::BLACK)?;
        self.graph
            .draw_axis(line_width.unwrap_or(graph::DEFAULT_AXIS_WIDTH), &color);
        Ok(())
    }

    pub fn draw_grid(&mut self, step: f64, line_width: Option<f64>, color: Option<String>) -> Result<(), JsValue> {
        let color = optional_color(color.as_deref(), Color::BLACK)?;
        self.graph.draw_grid(step, line_width.unwrap_or(1.0), &color);
        Ok(())
    }

    /// Getallen langs de x-as. `options` volgt `{ step, offset_x, offset_y, min, max, color, font }`.
    pub fn draw_number_line_x(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: NumberLineOptions = options_from_js(options)?;
        let line = options.into_number_line()?;
        self.graph.draw_number_line_x(&line).map_err(to_js_error)
    }

    pub fn draw_number_line_y(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: NumberLineOptions = options_from_js(options)?;
        let line = options.into_number_line()?;
        self.graph.draw_number_line_y(&line).map_err(to_js_error)
    }

    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, line_width: Option<f64>) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.graph.draw_line(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            &color,
            line_width.unwrap_or(shape::DEFAULT_LINE_WIDTH),
        );
        Ok(())
    }

    pub fn draw_arrow(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, line_width: Option<f64>) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.graph.draw_arrow(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            &color,
            line_width.unwrap_or(shape::DEFAULT_LINE_WIDTH),
        );
        Ok(())
    }

    pub fn draw_point(&mut self, x: f64, y: f64, color: &str, radius: Option<f64>) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.graph
            .draw_point(
                Vec2::new(x, y),
                &color,
                radius.unwrap_or(graph::DEFAULT_POINT_RADIUS),
            )
            .map_err(to_js_error)
    }

    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Option<String>, size: Option<f64>) -> Result<(), JsValue> {
        let mut label = Text2D::new(text, Vec2::new(x, y))
            .with_color(optional_color(color.as_deref(), Color::BLACK)?);
        if let Some(size) = size {
            label = label.with_size(size);
        }
        self.graph.draw_text(&label).map_err(to_js_error)
    }

    /// Teken `y = f(x)` voor een uitdrukking in `x` over het zichtbare bereik.
    pub fn plot_function(&mut self, expression: &str, color: &str, step: Option<f64>) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        let function = self
            .graph
            .function_graph_expression(
                expression,
                color,
                step.unwrap_or(shape::DEFAULT_STEP),
                shape::DEFAULT_PRECISION,
            )
            .map_err(to_js_error)?;
        self.graph.draw_function_graph(&function);
        Ok(())
    }

    /// Teken een OBJ-model, gedraaid om de x-, y- en z-as (radialen).
    pub fn draw_obj(
        &mut self,
        obj: &str,
        color: &str,
        angle_x: f64,
        angle_y: f64,
        angle_z: f64,
        options: JsValue,
    ) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        let options: SceneOptions = options_from_js(options)?;
        let mesh = Mesh3D::from_obj(obj, color).map_err(to_js_error)?;
        let matrix =
            Mat3x3::rotation_x(angle_x) * Mat3x3::rotation_y(angle_y) * Mat3x3::rotation_z(angle_z);
        let scene = Scene3D::with_options(vec![mesh], matrix, &options);
        self.graph.draw_scene3d(&scene);
        Ok(())
    }

    /// Registreer een geladen afbeelding onder `key` voor `draw_sprite`.
    pub fn register_texture(&mut self, key: &str, image: HtmlImageElement) {
        self.graph.context_mut().register_texture(key, image);
    }

    pub fn draw_sprite(
        &mut self,
        key: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        angle: Option<f64>,
    ) -> Result<(), JsValue> {
        let mut sprite = Sprite::with_size(key, Vec2::new(x, y), Vec2::new(width, height));
        sprite.angle = angle.unwrap_or(0.0);
        self.graph.draw_sprite(&sprite).map_err(to_js_error)
    }
}

/// Teken assen en `y = f(x)` zonder canvas en geef de tekenopdrachten terug.
#[wasm_bindgen]
pub fn function_plot_commands(expression: &str, color: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options: GraphOptions = options_from_js(options)?;
    let color = parse_color(color)?;
    let recorder = CommandRecorder::new(options.width, options.height);
    let mut graph = Graph::with_options(recorder, &options).map_err(to_js_error)?;

    let function = graph
        .function_graph_expression(expression, color, shape::DEFAULT_STEP, shape::DEFAULT_PRECISION)
        .map_err(to_js_error)?;
    graph.draw_axis(graph::DEFAULT_AXIS_WIDTH, &Color::BLACK);
    graph.draw_function_graph(&function);

    let commands = graph.into_context().take_commands();
    serde_wasm_bindgen::to_value(&commands).map_err(|err| JsError::new(&err.to_string()).into())
}

/// Deterministische willekeurige kleur als `#rrggbb`.
#[wasm_bindgen]
pub fn random_color(seed: u32) -> String {
    let mut rng = Prng::new(u64::from(seed));
    random::random_color(&mut rng)
}

fn options_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

fn parse_color(text: &str) -> Result<Color, JsValue> {
    text.parse().map_err(to_js_error)
}

fn optional_color(text: Option<&str>, fallback: Color) -> Result<Color, JsValue> {
    text.map_or(Ok(fallback), parse_color)
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
