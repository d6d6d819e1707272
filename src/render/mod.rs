//! Drawing backends.
//!
//! [`RenderContext`] is the slice of the Canvas 2D API the plotting code
//! uses. Coordinates are canvas pixels; the graph-to-pixel mapping happens in
//! [`crate::graph::Graph`] before anything reaches a context.

mod canvas;
mod recorder;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use canvas::CanvasContext;
pub use recorder::{CommandRecorder, DrawCommand};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("canvas call `{call}` failed: {message}")]
    Canvas { call: &'static str, message: String },
    #[error("unknown texture `{0}`")]
    UnknownTexture(String),
    #[error("invalid argument for `{call}`: {message}")]
    InvalidArgument { call: &'static str, message: String },
    #[error("rendering context is not attached to a canvas")]
    MissingCanvas,
}

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
    #[default]
    Center,
    Start,
    End,
}

impl TextAlign {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    Alphabetic,
    Ideographic,
    #[default]
    Bottom,
}

impl TextBaseline {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Hanging => "hanging",
            Self::Middle => "middle",
            Self::Alphabetic => "alphabetic",
            Self::Ideographic => "ideographic",
            Self::Bottom => "bottom",
        }
    }
}

/// A 2D drawing surface with Canvas 2D semantics.
///
/// Styles are CSS strings. Calls the browser can reject return
/// [`RenderResult`].
pub trait RenderContext {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn set_size(&mut self, width: f64, height: f64);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn set_global_alpha(&mut self, alpha: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64)
    -> RenderResult<()>;
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> RenderResult<()>;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Draws a registered texture scaled into the given rectangle.
    fn draw_image(&mut self, texture: &str, x: f64, y: f64, width: f64, height: f64)
    -> RenderResult<()>;

    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()>;
    fn rotate(&mut self, angle: f64) -> RenderResult<()>;
    fn reset_transform(&mut self) -> RenderResult<()>;
}

/// Canvas rejects negative radii with an `IndexSizeError`.
pub(crate) fn check_radius(radius: f64) -> RenderResult<()> {
    if radius < 0.0 || radius.is_nan() {
        return Err(RenderError::InvalidArgument {
            call: "arc",
            message: format!("radius must be non-negative, got {radius}"),
        });
    }
    Ok(())
}
