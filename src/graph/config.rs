use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::LineCap;

pub const DEFAULT_CANVAS_SIZE: f64 = 1000.0;
pub const DEFAULT_SCALE: f64 = 40.0;
pub const DEFAULT_FONT: &str = "30px Arial";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionsError {
    #[error("canvas size must be positive and finite, got {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("scale on the {axis} axis must be finite and non-zero, got {value}")]
    InvalidScale { axis: char, value: f64 },
    #[error("translation must be finite, got ({x}, {y})")]
    InvalidTranslation { x: f64, y: f64 },
}

/// Initial state of a [`super::Graph`]. Every field is optional when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    /// Negative so that y grows upward on screen.
    pub scale_y: f64,
    pub translation_x: f64,
    pub translation_y: f64,
    /// Put the origin in the middle of the canvas, overriding the translation.
    pub centered: bool,
    pub line_cap: LineCap,
    pub font: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            scale_x: DEFAULT_SCALE,
            scale_y: -DEFAULT_SCALE,
            translation_x: 0.0,
            translation_y: 0.0,
            centered: false,
            line_cap: LineCap::Round,
            font: DEFAULT_FONT.to_owned(),
        }
    }
}

impl GraphOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(OptionsError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        for (axis, value) in [('x', self.scale_x), ('y', self.scale_y)] {
            if !value.is_finite() || value == 0.0 {
                return Err(OptionsError::InvalidScale { axis, value });
            }
        }
        if !self.translation_x.is_finite() || !self.translation_y.is_finite() {
            return Err(OptionsError::InvalidTranslation {
                x: self.translation_x,
                y: self.translation_y,
            });
        }
        Ok(())
    }
}
