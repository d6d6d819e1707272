use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::math::Vec2;
use crate::render::{TextAlign, TextBaseline};

pub const DEFAULT_TEXT_SIZE: f64 = 30.0;
pub const DEFAULT_FONT: &str = "arial";

/// Text anchored at a graph position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text2D {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
    /// Pixel size of the font.
    pub size: f64,
    pub font: String,
    pub baseline: TextBaseline,
    pub align: TextAlign,
}

impl Text2D {
    /// Black 30px arial, centered above `pos`.
    pub fn new(text: impl Into<String>, pos: Vec2) -> Self {
        Self {
            text: text.into(),
            pos,
            color: Color::BLACK,
            size: DEFAULT_TEXT_SIZE,
            font: DEFAULT_FONT.to_owned(),
            baseline: TextBaseline::Bottom,
            align: TextAlign::Center,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// CSS font shorthand, e.g. `30px arial`.
    #[must_use]
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.size, self.font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_font_string() {
        let text = Text2D::new("hello", Vec2::new(1.0, 2.0));
        assert_eq!(text.color, Color::BLACK);
        assert_eq!(text.baseline, TextBaseline::Bottom);
        assert_eq!(text.align, TextAlign::Center);
        assert_eq!(text.css_font(), "30px arial");

        let styled = text.with_size(12.5).with_font("serif").with_color(Color::RED);
        assert_eq!(styled.css_font(), "12.5px serif");
        assert_eq!(styled.color, Color::RED);
    }
}
