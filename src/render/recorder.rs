use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    LineCap, RenderContext, RenderError, RenderResult, TextAlign, TextBaseline, check_radius,
};

/// One call made against a [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    SetSize {
        width: f64,
        height: f64,
    },
    FillStyle {
        style: String,
    },
    StrokeStyle {
        style: String,
    },
    LineWidth {
        width: f64,
    },
    LineCap {
        cap: LineCap,
    },
    Font {
        font: String,
    },
    TextAlign {
        align: TextAlign,
    },
    TextBaseline {
        baseline: TextBaseline,
    },
    GlobalAlpha {
        alpha: f64,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Fill,
    Stroke,
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    DrawImage {
        texture: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Translate {
        x: f64,
        y: f64,
    },
    Rotate {
        angle: f64,
    },
    ResetTransform,
}

/// In-memory context that keeps every call as a [`DrawCommand`].
///
/// `draw_image` only accepts textures registered with
/// [`CommandRecorder::register_texture`], like the canvas backend.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    width: f64,
    height: f64,
    textures: HashSet<String>,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn register_texture(&mut self, key: impl Into<String>) {
        self.textures.insert(key.into());
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the recorded commands and starts a fresh list.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl RenderContext for CommandRecorder {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.push(DrawCommand::SetSize { width, height });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.push(DrawCommand::FillStyle {
            style: style.to_owned(),
        });
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.push(DrawCommand::StrokeStyle {
            style: style.to_owned(),
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth { width });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(DrawCommand::LineCap { cap });
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::Font {
            font: font.to_owned(),
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::TextAlign { align });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::TextBaseline { baseline });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCommand::GlobalAlpha { alpha });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
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
        self.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
        Ok(())
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> RenderResult<()> {
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_image(
        &mut self,
        texture: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> RenderResult<()> {
        if !self.textures.contains(texture) {
            return Err(RenderError::UnknownTexture(texture.to_owned()));
        }
        self.push(DrawCommand::DrawImage {
            texture: texture.to_owned(),
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()> {
        self.push(DrawCommand::Translate { x, y });
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> RenderResult<()> {
        self.push(DrawCommand::Rotate { angle });
        Ok(())
    }

    fn reset_transform(&mut self) -> RenderResult<()> {
        self.push(DrawCommand::ResetTransform);
        Ok(())
    }
}
