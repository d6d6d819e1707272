use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{
    LineCap, RenderContext, RenderError, RenderResult, TextAlign, TextBaseline, check_radius,
};

/// [`RenderContext`] backed by a browser `CanvasRenderingContext2d`.
pub struct CanvasContext {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
    textures: HashMap<String, HtmlImageElement>,
}

fn canvas_error(call: &'static str) -> impl FnOnce(JsValue) -> RenderError {
    move |err| RenderError::Canvas {
        call,
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl CanvasContext {
    /// Wraps a context. Fails when the context is detached from its canvas.
    pub fn new(ctx: CanvasRenderingContext2d) -> RenderResult<Self> {
        let canvas = ctx.canvas().ok_or(RenderError::MissingCanvas)?;
        Ok(Self {
            ctx,
            canvas,
            textures: HashMap::new(),
        })
    }

    pub fn register_texture(&mut self, key: impl Into<String>, image: HtmlImageElement) {
        self.textures.insert(key.into(), image);
    }

    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl RenderContext for CanvasContext {
    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> RenderResult<()> {
        check_radius(radius)?;
        self.ctx
            .arc(x, y, radius, start_angle, end_angle)
            .map_err(canvas_error("arc"))
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> RenderResult<()> {
        self.ctx
            .fill_text(text, x, y)
            .map_err(canvas_error("fill_text"))
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn draw_image(
        &mut self,
        texture: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> RenderResult<()> {
        let image = self
            .textures
            .get(texture)
            .ok_or_else(|| RenderError::UnknownTexture(texture.to_owned()))?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
            .map_err(canvas_error("draw_image"))
    }

    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()> {
        self.ctx.translate(x, y).map_err(canvas_error("translate"))
    }

    fn rotate(&mut self, angle: f64) -> RenderResult<()> {
        self.ctx.rotate(angle).map_err(canvas_error("rotate"))
    }

    fn reset_transform(&mut self) -> RenderResult<()> {
        self.ctx
            .reset_transform()
            .map_err(canvas_error("reset_transform"))
    }
}
