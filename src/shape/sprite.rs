use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Image drawn into a rectangle of the graph.
///
/// `texture` is the key the image was registered under with the rendering
/// context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: String,
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation pivot, `pos + size / 2` unless moved.
    pub center: Vec2,
    /// Counter-clockwise rotation in radians.
    pub angle: f64,
}

impl Sprite {
    /// Sprite covering one graph unit in each direction.
    pub fn new(texture: impl Into<String>, pos: Vec2) -> Self {
        Self::with_size(texture, pos, Vec2::new(1.0, 1.0))
    }

    pub fn with_size(texture: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        Self {
            texture: texture.into(),
            pos,
            size,
            center: pos + size * 0.5,
            angle: 0.0,
        }
    }

    /// Moves the sprite and its pivot together.
    pub fn move_by(&mut self, offset: Vec2) -> &mut Self {
        self.pos += offset;
        self.center += offset;
        self
    }
}
