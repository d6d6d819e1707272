//! Drawable primitives in graph coordinates.

mod function;
mod sprite;
mod text;

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::math::{Mat2x2, Vec2};
use crate::scene::Scene3D;

pub use function::{
    DEFAULT_PRECISION, DEFAULT_STEP, ExpressionError, FunctionGraph, MAX_SAMPLES, compile_expression,
};
pub use sprite::Sprite;
pub use text::Text2D;

pub const DEFAULT_LINE_WIDTH: f64 = 5.0;
pub const DEFAULT_FILL_OPACITY: f64 = 0.2;
pub const DEFAULT_CIRCLE_POINTS: usize = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeParseError {
    #[error("point `{0}` is not of the form `x,y`")]
    MalformedPoint(String),
    #[error("invalid coordinate in point `{0}`")]
    InvalidCoordinate(String),
}

/// Polyline or polygon with separate fill and outline styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape2D {
    pub points: Vec<Vec2>,
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_width: f64,
    pub fill_opacity: f64,
    pub fill: bool,
    pub closed: bool,
    /// Pivot for [`Shape2D::rotate`].
    pub center: Vec2,
}

impl Shape2D {
    #[must_use]
    pub fn new(points: Vec<Vec2>, color: Color, fill: bool, closed: bool) -> Self {
        Self {
            points,
            fill_color: color,
            outline_color: color,
            outline_width: DEFAULT_LINE_WIDTH,
            fill_opacity: DEFAULT_FILL_OPACITY,
            fill,
            closed,
            center: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    /// Axis-aligned rectangle with one corner at `pos`.
    #[must_use]
    pub fn rectangle(pos: Vec2, size: Vec2, color: Color, fill: bool) -> Self {
        let points = vec![
            pos,
            Vec2::new(pos.x + size.x, pos.y),
            pos + size,
            Vec2::new(pos.x, pos.y + size.y),
        ];
        Self::new(points, color, fill, true).with_center(pos + size * 0.5)
    }

    /// Rectangle spanned by two opposite corners.
    #[must_use]
    pub fn from_corners(corner: Vec2, opposite: Vec2, color: Color, fill: bool) -> Self {
        Self::rectangle(corner, opposite - corner, color, fill)
    }

    /// Regular polygon centered on `pos`; the first vertex points up.
    #[must_use]
    pub fn regular_polygon(
        pos: Vec2,
        point_count: usize,
        radius: f64,
        color: Color,
        fill: bool,
    ) -> Self {
        let step = TAU / point_count as f64;
        let points = (0..point_count)
            .map(|i| {
                let angle = FRAC_PI_2 + i as f64 * step;
                Vec2::new(pos.x + angle.cos() * radius, pos.y + angle.sin() * radius)
            })
            .collect();
        Self::new(points, color, fill, true).with_center(pos)
    }

    #[must_use]
    pub fn circle(pos: Vec2, radius: f64, color: Color, fill: bool) -> Self {
        Self::regular_polygon(pos, DEFAULT_CIRCLE_POINTS, radius, color, fill)
    }

    /// Circular arc of `point_count` segments (at least one). Only filled arcs
    /// are closed.
    #[must_use]
    pub fn arc(
        pos: Vec2,
        start_angle: f64,
        end_angle: f64,
        radius: f64,
        point_count: usize,
        color: Color,
        fill: bool,
    ) -> Self {
        let point_count = point_count.max(1);
        let step = (end_angle - start_angle) / point_count as f64;
        let points = (0..=point_count)
            .map(|i| {
                let angle = start_angle + i as f64 * step;
                Vec2::new(pos.x + angle.cos() * radius, pos.y + angle.sin() * radius)
            })
            .collect();
        Self::new(points, color, fill, fill).with_center(pos)
    }

    #[must_use]
    pub fn line(start: Vec2, end: Vec2, color: Color) -> Self {
        Self::new(vec![start, end], color, false, false)
    }

    /// Parses whitespace separated `x,y` pairs, e.g. `"0,0 1,0 1,1"`.
    pub fn parse(text: &str, color: Color, fill: bool, closed: bool) -> Result<Self, ShapeParseError> {
        let points = text
            .split_whitespace()
            .map(parse_point)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(points, color, fill, closed))
    }

    pub fn move_by(&mut self, offset: Vec2) -> &mut Self {
        for point in &mut self.points {
            *point += offset;
        }
        self.center += offset;
        self
    }

    /// Rotates the points counter-clockwise around `center`.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let center = self.center;
        for point in &mut self.points {
            *point = point.rotate_around(center, angle);
        }
        self
    }

    pub fn transform(&mut self, mat: &Mat2x2) -> &mut Self {
        for point in &mut self.points {
            *point *= mat;
        }
        self
    }

    /// Moves `center` to the average of the points. No-op without points.
    pub fn center_origin(&mut self) -> &mut Self {
        if !self.points.is_empty() {
            let sum = self.points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
            self.center = sum / self.points.len() as f64;
        }
        self
    }
}

fn parse_point(token: &str) -> Result<Vec2, ShapeParseError> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| ShapeParseError::MalformedPoint(token.to_owned()))?;
    let coordinate = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| ShapeParseError::InvalidCoordinate(token.to_owned()))
    };
    Ok(Vec2::new(coordinate(x)?, coordinate(y)?))
}

/// Anything [`crate::graph::Graph::draw`] knows how to render.
#[derive(Debug, Clone)]
pub enum Drawable {
    Shape(Shape2D),
    Function(FunctionGraph),
    Text(Text2D),
    Sprite(Sprite),
    Scene(Scene3D),
}

impl From<Shape2D> for Drawable {
    fn from(shape: Shape2D) -> Self {
        Self::Shape(shape)
    }
}

impl From<FunctionGraph> for Drawable {
    fn from(graph: FunctionGraph) -> Self {
        Self::Function(graph)
    }
}

impl From<Text2D> for Drawable {
    fn from(text: Text2D) -> Self {
        Self::Text(text)
    }
}

impl From<Sprite> for Drawable {
    fn from(sprite: Sprite) -> Self {
        Self::Sprite(sprite)
    }
}

impl From<Scene3D> for Drawable {
    fn from(scene: Scene3D) -> Self {
        Self::Scene(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    #[test]
    fn test_defaults() {
        let shape = Shape2D::new(vec![Vec2::ZERO], Color::RED, false, true);
        assert_eq!(shape.outline_width, DEFAULT_LINE_WIDTH);
        assert_eq!(shape.fill_opacity, DEFAULT_FILL_OPACITY);
        assert_eq!(shape.fill_color, Color::RED);
        assert_eq!(shape.outline_color, Color::RED);
        assert_eq!(shape.center, Vec2::ZERO);
    }

    #[test]
    fn test_rectangle_and_corners() {
        let rect = Shape2D::rectangle(Vec2::new(1.0, 2.0), Vec2::new(4.0, 2.0), Color::BLACK, true);
        assert_eq!(
            rect.points,
            vec![
                Vec2::new(1.0, 2.0),
                Vec2::new(5.0, 2.0),
                Vec2::new(5.0, 4.0),
                Vec2::new(1.0, 4.0),
            ]
        );
        assert_eq!(rect.center, Vec2::new(3.0, 3.0));
        assert!(rect.closed && rect.fill);

        let boxed = Shape2D::from_corners(Vec2::new(1.0, 2.0), Vec2::new(5.0, 4.0), Color::BLACK, true);
        assert_eq!(boxed, rect);
    }

    #[test]
    fn test_regular_polygon_starts_at_top() {
        let square = Shape2D::regular_polygon(Vec2::new(1.0, 1.0), 4, 2.0, Color::BLUE, false);
        assert_eq!(square.points.len(), 4);
        assert_close(square.points[0].x, 1.0);
        assert_close(square.points[0].y, 3.0);
        assert_close(square.points[1].x, -1.0);
        assert_close(square.points[1].y, 1.0);
        assert_eq!(square.center, Vec2::new(1.0, 1.0));

        let circle = Shape2D::circle(Vec2::ZERO, 3.0, Color::BLUE, true);
        assert_eq!(circle.points.len(), DEFAULT_CIRCLE_POINTS);
        for point in &circle.points {
            assert_close(point.length(), 3.0);
        }
    }

    #[test]
    fn test_arc_points_and_closing() {
        let open = Shape2D::arc(Vec2::ZERO, 0.0, std::f64::consts::PI, 1.0, 4, Color::BLACK, false);
        assert_eq!(open.points.len(), 5);
        assert!(!open.closed);
        assert_close(open.points[4].x, -1.0);
        assert_close(open.points[2].y, 1.0);

        let filled = Shape2D::arc(Vec2::ZERO, 0.0, 1.0, 1.0, 10, Color::BLACK, true);
        assert!(filled.closed);
    }

    #[test]
    fn test_arc_without_segments() {
        let flat = Shape2D::arc(Vec2::ZERO, 0.5, 0.5, 2.0, 0, Color::BLACK, false);
        assert_eq!(flat.points.len(), 2);
        assert!(flat.points.iter().all(|p| p.is_finite()));

        let chord = Shape2D::arc(Vec2::ZERO, 0.0, std::f64::consts::PI, 1.0, 0, Color::BLACK, false);
        assert_close(chord.points[0].x, 1.0);
        assert_close(chord.points[1].x, -1.0);
    }

    #[test]
    fn test_line_is_open() {
        let line = Shape2D::line(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::BLACK);
        assert!(!line.closed);
        assert!(!line.fill);
        assert_eq!(line.points.len(), 2);
    }

    #[test]
    fn test_move_rotate_transform() {
        let mut shape = Shape2D::rectangle(Vec2::ZERO, Vec2::new(2.0, 2.0), Color::BLACK, false);
        shape.move_by(Vec2::new(1.0, 0.0));
        assert_eq!(shape.center, Vec2::new(2.0, 1.0));
        assert_eq!(shape.points[0], Vec2::new(1.0, 0.0));

        shape.rotate(std::f64::consts::PI);
        assert_close(shape.points[0].x, 3.0);
        assert_close(shape.points[0].y, 2.0);

        let mut line = Shape2D::line(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Color::BLACK);
        line.transform(&Mat2x2::rotation(std::f64::consts::FRAC_PI_2));
        assert_close(line.points[0].x, 0.0);
        assert_close(line.points[0].y, 1.0);
        assert_close(line.points[1].x, -1.0);
        assert_close(line.points[1].y, 0.0);
    }

    #[test]
    fn test_center_origin() {
        let mut shape = Shape2D::parse("0,0 4,0 4,2 0,2", Color::BLACK, false, true).unwrap();
        shape.center_origin();
        assert_eq!(shape.center, Vec2::new(2.0, 1.0));

        let mut empty = Shape2D::new(Vec::new(), Color::BLACK, false, true);
        empty.center_origin();
        assert_eq!(empty.center, Vec2::ZERO);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Shape2D::parse("1,2 3", Color::BLACK, false, true),
            Err(ShapeParseError::MalformedPoint("3".to_owned()))
        );
        assert_eq!(
            Shape2D::parse("1,a", Color::BLACK, false, true),
            Err(ShapeParseError::InvalidCoordinate("1,a".to_owned()))
        );
        let parsed = Shape2D::parse("  -1.5,2   3,4e1 ", Color::BLACK, true, false).unwrap();
        assert_eq!(parsed.points, vec![Vec2::new(-1.5, 2.0), Vec2::new(3.0, 40.0)]);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Shape2D::line(Vec2::ZERO, Vec2::new(1.0, 0.0), Color::BLACK);
        let mut copy = original.clone();
        copy.move_by(Vec2::new(5.0, 5.0));
        assert_eq!(original.points[0], Vec2::ZERO);
    }
}
