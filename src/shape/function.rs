use meval::{Context, Expr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DEFAULT_LINE_WIDTH;
use crate::color::Color;
use crate::math::Vec2;
use crate::numeric;

pub const DEFAULT_STEP: f64 = 0.01;
pub const DEFAULT_PRECISION: i32 = 2;
/// Upper bound on the samples of one graph. Wider ranges give an empty graph.
pub const MAX_SAMPLES: usize = 1_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("expression could not be parsed: {0}")]
    Parse(String),
    #[error("expression cannot be bound to `x`: {0}")]
    Bind(String),
}

/// Sampled plot of `y = f(x)`.
///
/// Non-finite samples are kept; they break the drawn line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionGraph {
    pub points: Vec<Vec2>,
    pub outline_color: Color,
    pub outline_width: f64,
}

impl FunctionGraph {
    /// Samples `f` on `[start, end)` with the default step and precision.
    pub fn new(f: impl Fn(f64) -> f64, start: f64, end: f64, color: Color) -> Self {
        Self::with_step(f, start, end, color, DEFAULT_STEP, DEFAULT_PRECISION)
    }

    /// Samples `f` from `start` (inclusive) to `end` (exclusive).
    ///
    /// Each `x` is rounded to `precision` decimals before `f` sees it, which
    /// keeps accumulated float error out of the sample positions. An empty
    /// graph results when `start > end`, when `step` is not positive or when
    /// the range would need more than [`MAX_SAMPLES`] samples.
    pub fn with_step(
        f: impl Fn(f64) -> f64,
        start: f64,
        end: f64,
        color: Color,
        step: f64,
        precision: i32,
    ) -> Self {
        let mut points = Vec::new();
        if let Some(count) = sample_count(start, end, step) {
            for i in 0..count {
                let x = start + i as f64 * step;
                if x >= end {
                    break;
                }
                let rounded = numeric::round(x, precision);
                points.push(Vec2::new(rounded, f(rounded)));
            }
        } else {
            log::debug!("function graph skipped: range {start}..{end} with step {step}");
        }
        Self {
            points,
            outline_color: color,
            outline_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Plot of an expression in `x`, e.g. `"sin(x) * 2"`.
    pub fn from_expression(
        expression: &str,
        start: f64,
        end: f64,
        color: Color,
        step: f64,
        precision: i32,
    ) -> Result<Self, ExpressionError> {
        let f = compile_expression(expression)?;
        Ok(Self::with_step(f, start, end, color, step, precision))
    }
}

/// Upper bound on the samples in `[start, end)`, `None` when the range is reversed,
/// unbounded or too dense.
fn sample_count(start: f64, end: f64, step: f64) -> Option<usize> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) || start > end || step <= 0.0 {
        return None;
    }
    let count = ((end - start) / step).ceil();
    if count > MAX_SAMPLES as f64 {
        return None;
    }
    Some(count as usize + 1)
}

/// Compiles an expression in the single variable `x`.
pub fn compile_expression(expression: &str) -> Result<impl Fn(f64) -> f64, ExpressionError> {
    let expr: Expr = expression
        .trim()
        .parse()
        .map_err(|error: meval::Error| ExpressionError::Parse(error.to_string()))?;
    expr.bind_with_context(build_context(), "x")
        .map_err(|error| ExpressionError::Bind(error.to_string()))
}

fn build_context() -> Context<'static> {
    let mut context = Context::new();
    context.func("deg", f64::to_degrees);
    context.func("rad", f64::to_radians);
    context.func("sign", f64::signum);
    context.func("frac", f64::fract);
    context.func("sec", |value| 1.0 / value.cos());
    context.func("csc", |value| 1.0 / value.sin());
    context.func("cot", |value| 1.0 / value.tan());
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_half_open_interval() {
        let graph = FunctionGraph::with_step(|x| x * 2.0, 0.0, 1.0, Color::BLACK, 0.25, 2);
        assert_eq!(
            graph.points,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.25, 0.5),
                Vec2::new(0.5, 1.0),
                Vec2::new(0.75, 1.5),
            ]
        );
        assert_eq!(graph.outline_width, DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn rounds_sample_positions() {
        let graph = FunctionGraph::new(|x| x, 0.0, 1.0, Color::BLACK);
        assert_eq!(graph.points.len(), 100);
        assert!(graph.points.iter().all(|p| p.x == p.y));
        assert_eq!(graph.points[30].x, 0.3);
        assert_eq!(graph.points[99].x, 0.99);
    }

    #[test]
    fn empty_when_reversed_or_bad_step() {
        assert!(FunctionGraph::new(|x| x, 2.0, 1.0, Color::BLACK).points.is_empty());
        assert!(
            FunctionGraph::with_step(|x| x, 0.0, 1.0, Color::BLACK, 0.0, 2)
                .points
                .is_empty()
        );
    }

    #[test]
    fn dense_or_far_ranges_stay_bounded() {
        let far = FunctionGraph::with_step(|x| x, 1e17, 1e17 + 1000.0, Color::BLACK, 0.01, 2);
        assert!(!far.points.is_empty());
        assert!(far.points.len() <= MAX_SAMPLES + 1);
        assert!(far.points.iter().all(|p| p.x >= 1e17));

        let dense = FunctionGraph::with_step(|x| x, -1.0, 1e12, Color::BLACK, 0.01, 2);
        assert!(dense.points.is_empty());
        assert!(
            FunctionGraph::with_step(|x| x, 0.0, f64::INFINITY, Color::BLACK, 1.0, 2)
                .points
                .is_empty()
        );
    }

    #[test]
    fn keeps_non_finite_samples() {
        let graph = FunctionGraph::with_step(|x| 1.0 / x, -1.0, 1.5, Color::BLACK, 1.0, 0);
        assert_eq!(graph.points.len(), 3);
        assert!(graph.points[1].y.is_infinite());
    }

    #[test]
    fn builds_from_expression() {
        let graph =
            FunctionGraph::from_expression("x^2 + abs(x)", -1.0, 1.5, Color::BLUE, 0.5, 1).unwrap();
        let ys: Vec<f64> = graph.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![2.0, 0.75, 0.0, 0.75, 2.0]);

        let f = compile_expression("deg(rad(x)) + sec(0)").unwrap();
        assert!((f(30.0) - 31.0).abs() < 1e-9);
    }

    #[test]
    fn reports_expression_errors() {
        assert!(matches!(
            FunctionGraph::from_expression("x +", 0.0, 1.0, Color::BLACK, 0.1, 1),
            Err(ExpressionError::Parse(_))
        ));
        assert!(matches!(
            FunctionGraph::from_expression("x + y", 0.0, 1.0, Color::BLACK, 0.1, 1),
            Err(ExpressionError::Bind(_))
        ));
    }
}
