//! Coordinate system and drawing routines on top of a [`RenderContext`].
//!
//! Graph coordinates map to canvas pixels per axis:
//! `pixel = graph * scale + translation`. With the default negative y scale
//! the y axis points up.

mod config;

use std::f64::consts::TAU;

use crate::color::Color;
use crate::math::Vec2;
use crate::numeric;
use crate::render::{LineCap, RenderContext, RenderResult, TextAlign, TextBaseline};
use crate::scene::Scene3D;
use crate::shape::{
    DEFAULT_LINE_WIDTH, Drawable, ExpressionError, FunctionGraph, Shape2D, Sprite, Text2D,
};

pub use config::{DEFAULT_CANVAS_SIZE, DEFAULT_FONT, DEFAULT_SCALE, GraphOptions, OptionsError};

/// Default radius of [`Graph::draw_point`], in pixels.
pub const DEFAULT_POINT_RADIUS: f64 = DEFAULT_LINE_WIDTH + 2.0;
/// Default line width of the axes, in pixels.
pub const DEFAULT_AXIS_WIDTH: f64 = 3.0;
/// Grid lines and labels closer than this many pixels are not drawn.
pub const MIN_GRID_SPACING: f64 = 1.0;
/// Length of the two strokes of an arrow head, in pixels.
const ARROW_HEAD: f64 = 25.0;

/// Labels drawn along an axis by [`Graph::draw_number_line_x`] and
/// [`Graph::draw_number_line_y`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLine {
    /// Distance between labels, in graph units.
    pub step: f64,
    /// Label displacement from the axis, in graph units.
    pub offset: Vec2,
    /// Only values in `[min, max]` are labeled.
    pub min: f64,
    pub max: f64,
    pub color: Color,
    pub font: String,
}

impl Default for NumberLine {
    fn default() -> Self {
        Self {
            step: 1.0,
            offset: Vec2::ZERO,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            color: Color::BLACK,
            font: "30px arial".to_owned(),
        }
    }
}

/// A scaled and translated coordinate system drawn through `C`.
pub struct Graph<C: RenderContext> {
    ctx: C,
    scale: Vec2,
    translation: Vec2,
}

impl<C: RenderContext> Graph<C> {
    /// Wraps `ctx` keeping its size; scale is `(40, -40)`, origin top-left.
    pub fn new(mut ctx: C) -> Self {
        ctx.set_line_cap(LineCap::Round);
        ctx.set_font(DEFAULT_FONT);
        Self {
            ctx,
            scale: Vec2::new(DEFAULT_SCALE, -DEFAULT_SCALE),
            translation: Vec2::ZERO,
        }
    }

    /// Validates `options`, resizes the context and applies the options.
    pub fn with_options(mut ctx: C, options: &GraphOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        ctx.set_size(options.width, options.height);
        ctx.set_line_cap(options.line_cap);
        ctx.set_font(&options.font);

        let mut graph = Self {
            ctx,
            scale: Vec2::new(options.scale_x, options.scale_y),
            translation: Vec2::new(options.translation_x, options.translation_y),
        };
        if options.centered {
            graph.center();
        }
        log::debug!(
            "graph created: {}x{} px, scale {}, translation {}",
            options.width,
            options.height,
            graph.scale,
            graph.translation
        );
        Ok(graph)
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn width(&self) -> f64 {
        self.ctx.width()
    }

    pub fn height(&self) -> f64 {
        self.ctx.height()
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.ctx.set_size(width, height);
    }

    /// Current per-axis scale, in pixels per graph unit.
    pub fn scale_factors(&self) -> Vec2 {
        self.scale
    }

    /// Pixel position of the graph origin.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    // ── coordinate system ───────────────────────────────────────────────────

    /// Puts the origin in the middle of the canvas.
    pub fn center(&mut self) {
        self.center_x();
        self.center_y();
    }

    pub fn center_x(&mut self) {
        self.translation.x = self.width() * 0.5;
    }

    pub fn center_y(&mut self) {
        self.translation.y = self.height() * 0.5;
    }

    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.translation = Vec2::new(x, y);
    }

    pub fn set_translation_x(&mut self, x: f64) {
        self.translation.x = x;
    }

    pub fn set_translation_y(&mut self, y: f64) {
        self.translation.y = y;
    }

    /// Moves the origin by `(x, y)` pixels.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.translation += Vec2::new(x, y);
    }

    pub fn set_scale(&mut self, x: f64, y: f64) {
        self.scale = Vec2::new(x, y);
    }

    pub fn set_scale_x(&mut self, x: f64) {
        self.scale.x = x;
    }

    pub fn set_scale_y(&mut self, y: f64) {
        self.scale.y = y;
    }

    /// Multiplies the current scale per axis.
    pub fn scale(&mut self, x: f64, y: f64) {
        self.scale.x *= x;
        self.scale.y *= y;
    }

    /// Graph position to canvas pixels.
    pub fn to_pixel(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x * self.scale.x + self.translation.x,
            pos.y * self.scale.y + self.translation.y,
        )
    }

    /// Canvas pixels to graph position, e.g. for pointer coordinates relative
    /// to the canvas.
    pub fn to_graph(&self, px: f64, py: f64) -> Vec2 {
        Vec2::new(
            (px - self.translation.x) / self.scale.x,
            (py - self.translation.y) / self.scale.y,
        )
    }

    /// Samples `f` across the visible x range with one unit of margin.
    pub fn function_graph(
        &self,
        f: impl Fn(f64) -> f64,
        color: Color,
        step: f64,
        precision: i32,
    ) -> FunctionGraph {
        let (start, end) = self.visible_x_range();
        FunctionGraph::with_step(f, start, end, color, step, precision)
    }

    /// [`Graph::function_graph`] for an expression in `x`.
    pub fn function_graph_expression(
        &self,
        expression: &str,
        color: Color,
        step: f64,
        precision: i32,
    ) -> Result<FunctionGraph, ExpressionError> {
        let (start, end) = self.visible_x_range();
        FunctionGraph::from_expression(expression, start, end, color, step, precision)
    }

    fn visible_x_range(&self) -> (f64, f64) {
        let start = (-self.translation.x / self.scale.x).trunc() - 1.0;
        let end = ((-self.translation.x + self.width()) / self.scale.x).trunc() + 1.0;
        (start, end)
    }

    // ── background, axes and grids ──────────────────────────────────────────

    pub fn clear_background(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    pub fn fill_background(&mut self, color: &Color) {
        let (width, height) = (self.width(), self.height());
        self.ctx.set_fill_style(&color.to_string());
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    /// Both axes through the origin, across the whole canvas.
    pub fn draw_axis(&mut self, line_width: f64, color: &Color) {
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.trace_axis_x();
        self.trace_axis_y();
        self.ctx.set_stroke_style(&color.to_string());
        self.ctx.stroke();
    }

    pub fn draw_axis_x(&mut self, line_width: f64, color: &Color) {
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.trace_axis_x();
        self.ctx.set_stroke_style(&color.to_string());
        self.ctx.stroke();
    }

    pub fn draw_axis_y(&mut self, line_width: f64, color: &Color) {
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.trace_axis_y();
        self.ctx.set_stroke_style(&color.to_string());
        self.ctx.stroke();
    }

    fn trace_axis_x(&mut self) {
        let width = self.width();
        self.ctx.move_to(0.0, self.translation.y);
        self.ctx.line_to(width, self.translation.y);
    }

    fn trace_axis_y(&mut self) {
        let height = self.height();
        self.ctx.move_to(self.translation.x, 0.0);
        self.ctx.line_to(self.translation.x, height);
    }

    /// Labels the x axis every `line.step` units.
    pub fn draw_number_line_x(&mut self, line: &NumberLine) -> RenderResult<()> {
        let positions = grid_positions(self.translation.x, self.scale.x * line.step, self.width());
        self.ctx.set_fill_style(&line.color.to_string());
        self.ctx.set_text_align(TextAlign::Center);
        self.ctx.set_text_baseline(TextBaseline::Top);
        self.ctx.set_font(&line.font);

        let label_y = self.translation.y + line.offset.y * self.scale.y;
        for x in positions {
            let value = (x - self.translation.x) / self.scale.x;
            if value >= line.min && value <= line.max {
                let label_x = x + line.offset.x * self.scale.x;
                self.ctx.fill_text(&format_label(value), label_x, label_y)?;
            }
        }
        Ok(())
    }

    /// Labels the y axis every `line.step` units.
    pub fn draw_number_line_y(&mut self, line: &NumberLine) -> RenderResult<()> {
        let positions = grid_positions(self.translation.y, self.scale.y * line.step, self.height());
        self.ctx.set_fill_style(&line.color.to_string());
        self.ctx.set_text_align(TextAlign::Right);
        self.ctx.set_text_baseline(TextBaseline::Middle);
        self.ctx.set_font(&line.font);

        let label_x = self.translation.x + line.offset.x * self.scale.x;
        for y in positions {
            let value = (y - self.translation.y) / self.scale.y;
            if value >= line.min && value <= line.max {
                let label_y = y + line.offset.y * self.scale.y;
                self.ctx.fill_text(&format_label(value), label_x, label_y)?;
            }
        }
        Ok(())
    }

    /// Vertical and horizontal grid lines every `step` units.
    pub fn draw_grid(&mut self, step: f64, line_width: f64, color: &Color) {
        self.stroke_grid(step, line_width, color, true, true);
    }

    /// Vertical grid lines only.
    pub fn draw_grid_x(&mut self, step: f64, line_width: f64, color: &Color) {
        self.stroke_grid(step, line_width, color, true, false);
    }

    /// Horizontal grid lines only.
    pub fn draw_grid_y(&mut self, step: f64, line_width: f64, color: &Color) {
        self.stroke_grid(step, line_width, color, false, true);
    }

    fn stroke_grid(&mut self, step: f64, line_width: f64, color: &Color, vertical: bool, horizontal: bool) {
        let (width, height) = (self.width(), self.height());
        let xs = grid_positions(self.translation.x, self.scale.x * step, width);
        let ys = grid_positions(self.translation.y, self.scale.y * step, height);
        let (Some(&start_x), Some(&start_y)) = (xs.first(), ys.first()) else {
            return;
        };

        self.ctx.set_stroke_style(&color.to_string());
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        if vertical {
            for &x in &xs {
                self.ctx.move_to(x, start_y);
                self.ctx.line_to(x, height);
            }
        }
        if horizontal {
            for &y in &ys {
                self.ctx.move_to(start_x, y);
                self.ctx.line_to(width, y);
            }
        }
        self.ctx.stroke();
    }

    // ── primitives ──────────────────────────────────────────────────────────

    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: &Color, line_width: f64) {
        let (a, b) = (self.to_pixel(start), self.to_pixel(end));
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style(&color.to_string());
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.stroke();
    }

    /// Line from `start` to `end` with a fixed-size head at `end`.
    pub fn draw_arrow(&mut self, start: Vec2, end: Vec2, color: &Color, line_width: f64) {
        let s = Vec2::new(start.x * self.scale.x, start.y * self.scale.y);
        let e = Vec2::new(end.x * self.scale.x, end.y * self.scale.y);
        let shaft = e - s;
        let length = shaft.length();
        let angle = shaft.angle();

        let head_left = Vec2::new(length - ARROW_HEAD, -ARROW_HEAD).rotate(angle) + s;
        let head_right = Vec2::new(length - ARROW_HEAD, ARROW_HEAD).rotate(angle) + s;

        let t = self.translation;
        self.ctx.begin_path();
        self.ctx.move_to(s.x + t.x, s.y + t.y);
        self.ctx.line_to(e.x + t.x, e.y + t.y);
        self.ctx.move_to(head_left.x + t.x, head_left.y + t.y);
        self.ctx.line_to(e.x + t.x, e.y + t.y);
        self.ctx.line_to(head_right.x + t.x, head_right.y + t.y);
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style(&color.to_string());
        self.ctx.stroke();
    }

    /// Filled disc with a radius in pixels.
    pub fn draw_point(&mut self, pos: Vec2, color: &Color, radius: f64) -> RenderResult<()> {
        self.draw_points(&[pos], color, radius)
    }

    pub fn draw_points(&mut self, points: &[Vec2], color: &Color, radius: f64) -> RenderResult<()> {
        self.ctx.set_fill_style(&color.to_string());
        for &point in points {
            let p = self.to_pixel(point);
            self.ctx.begin_path();
            self.ctx.arc(p.x, p.y, radius, 0.0, TAU)?;
            self.ctx.fill();
        }
        Ok(())
    }

    /// Strokes the samples; a non-finite `y` lifts the pen.
    pub fn draw_function_graph(&mut self, graph: &FunctionGraph) {
        self.ctx.set_stroke_style(&graph.outline_color.to_string());
        self.ctx.set_line_width(graph.outline_width);
        self.ctx.begin_path();

        let mut pen_down = false;
        for &point in &graph.points {
            if !point.y.is_finite() {
                if pen_down {
                    self.ctx.stroke();
                    self.ctx.begin_path();
                }
                pen_down = false;
                continue;
            }
            let p = self.to_pixel(point);
            if pen_down {
                self.ctx.line_to(p.x, p.y);
            } else {
                self.ctx.move_to(p.x, p.y);
                pen_down = true;
            }
        }
        self.ctx.stroke();
    }

    pub fn draw_shape(&mut self, shape: &Shape2D) {
        let Some(&first) = shape.points.first() else {
            return;
        };
        let first = self.to_pixel(first);

        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for &point in &shape.points[1..] {
            let p = self.to_pixel(point);
            self.ctx.line_to(p.x, p.y);
        }

        if shape.closed {
            self.ctx.line_to(first.x, first.y);
            if shape.fill {
                self.ctx.set_global_alpha(shape.fill_opacity);
                self.ctx.set_fill_style(&shape.fill_color.to_string());
                self.ctx.fill();
                self.ctx.set_global_alpha(1.0);
            }
        }
        if shape.outline_width > 0.0 {
            self.ctx.set_stroke_style(&shape.outline_color.to_string());
            self.ctx.set_line_width(shape.outline_width);
            self.ctx.stroke();
        }
    }

    pub fn draw_text(&mut self, text: &Text2D) -> RenderResult<()> {
        let p = self.to_pixel(text.pos);
        self.ctx.set_font(&text.css_font());
        self.ctx.set_text_baseline(text.baseline);
        self.ctx.set_text_align(text.align);
        self.ctx.set_fill_style(&text.color.to_string());
        self.ctx.fill_text(&text.text, p.x, p.y)
    }

    /// Projects the scene and paints its faces in depth order.
    pub fn draw_scene3d(&mut self, scene: &Scene3D) {
        self.ctx.set_line_width(scene.line_width);
        for face in scene.project() {
            let Some(&first) = face.points.first() else {
                continue;
            };
            let style = face.color.to_string();
            let first = self.to_pixel(first);

            self.ctx.begin_path();
            self.ctx.move_to(first.x, first.y);
            for &point in &face.points[1..] {
                let p = self.to_pixel(point);
                self.ctx.line_to(p.x, p.y);
            }
            self.ctx.line_to(first.x, first.y);
            if scene.fill {
                self.ctx.set_fill_style(&style);
                self.ctx.fill();
            }
            self.ctx.set_stroke_style(&style);
            self.ctx.stroke();
        }
    }

    /// Draws the texture rotated by `sprite.angle` around its center.
    pub fn draw_sprite(&mut self, sprite: &Sprite) -> RenderResult<()> {
        let center = self.to_pixel(sprite.center);
        let pos = self.to_pixel(sprite.pos);
        let width = sprite.size.x * self.scale.x;
        let height = sprite.size.y * self.scale.y;

        self.ctx.translate(center.x, center.y)?;
        self.ctx.rotate(-sprite.angle)?;
        self.ctx.translate(-center.x, -center.y)?;
        let drawn = self.ctx.draw_image(&sprite.texture, pos.x, pos.y, width, height);
        // leave the context untransformed even when the image is missing
        self.ctx.reset_transform()?;
        drawn
    }

    pub fn draw(&mut self, drawable: &Drawable) -> RenderResult<()> {
        match drawable {
            Drawable::Shape(shape) => self.draw_shape(shape),
            Drawable::Function(graph) => self.draw_function_graph(graph),
            Drawable::Text(text) => self.draw_text(text)?,
            Drawable::Sprite(sprite) => self.draw_sprite(sprite)?,
            Drawable::Scene(scene) => self.draw_scene3d(scene),
        }
        Ok(())
    }
}

/// Pixel positions `start, start + step, ...` below `end`, where `start` is
/// the last multiple of `step` (offset by `origin`) left of the canvas.
///
/// Empty when the lines would be closer than [`MIN_GRID_SPACING`] pixels.
fn grid_positions(origin: f64, step: f64, end: f64) -> Vec<f64> {
    let step = step.abs();
    if step < MIN_GRID_SPACING || !step.is_finite() || !origin.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let start = origin % step - step;
    let count = ((end - start) / step).ceil().max(0.0) as usize;
    (0..count)
        .map(|i| start + i as f64 * step)
        .take_while(|&position| position < end)
        .collect()
}

/// Axis label: float noise rounded away and `-0` printed as `0`.
fn format_label(value: f64) -> String {
    let rounded = numeric::round(value, 10);
    if rounded == 0.0 {
        return "0".to_owned();
    }
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_positions_start_left_of_canvas() {
        assert_eq!(grid_positions(100.0, 40.0, 100.0), vec![-20.0, 20.0, 60.0]);
        assert_eq!(grid_positions(0.0, -40.0, 50.0), vec![-40.0, 0.0, 40.0]);
        assert!(grid_positions(0.0, 0.0, 100.0).is_empty());
    }

    #[test]
    fn grid_positions_skip_sub_pixel_steps() {
        assert!(grid_positions(0.0, 1e-9, 1000.0).is_empty());
        assert!(grid_positions(0.0, 0.5, 1000.0).is_empty());
        assert_eq!(grid_positions(0.0, 1.0, 1000.0).len(), 1001);
        assert!(grid_positions(-4e18, 40.0, 100.0).len() <= 4);
    }

    #[test]
    fn labels_are_clean() {
        assert_eq!(format_label(-0.0), "0");
        assert_eq!(format_label(0.30000000000000004), "0.3");
        assert_eq!(format_label(-2.0), "-2");
        assert_eq!(format_label(12.5), "12.5");
    }
}
