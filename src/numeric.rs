//! Scalar helpers shared by the plotting code.

use num_complex::Complex64;

use crate::math::Vec2;

/// Complex numbers, with the `num-complex` arithmetic.
pub type Complex = Complex64;

/// Default tolerance of [`is_nearly_equal`].
pub const DEFAULT_DIFFERENCE: f64 = 0.001;

#[must_use]
pub fn is_nearly_equal(a: f64, b: f64, difference: f64) -> bool {
    (a - b).abs() < difference
}

#[must_use]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

#[must_use]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Rounds `x` to `n` decimal places, halves rounding up.
///
/// `f64::EPSILON` is added first so values such as `1.005` land on the
/// expected side.
#[must_use]
pub fn round(x: f64, n: i32) -> f64 {
    let factor = 10_f64.powi(n);
    ((x + f64::EPSILON) * factor + 0.5).floor() / factor
}

/// Values from `start` towards `end` (exclusive) in increments of `step`.
///
/// Empty when `step` is zero or points away from `end`.
#[must_use]
pub fn range(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step == 0.0 || !step.is_finite() || (step < 0.0 && start <= end) || (step > 0.0 && start >= end)
    {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut value = start;
    while if step > 0.0 { value < end } else { value > end } {
        values.push(value);
        value += step;
    }
    values
}

/// Shorthand for `range(0.0, end, 1.0)`.
#[must_use]
pub fn range_to(end: f64) -> Vec<f64> {
    range(0.0, end, 1.0)
}

/// `n!` as a float. `None` for negative `n`.
#[must_use]
pub fn factorial(n: i64) -> Option<f64> {
    if n < 0 {
        return None;
    }
    Some((2..=n).fold(1.0, |acc, k| acc * k as f64))
}

/// Binomial coefficient `n! / (k! (n - k)!)`.
#[must_use]
pub fn combination(n: i64, k: i64) -> Option<f64> {
    Some(factorial(n)? / (factorial(k)? * factorial(n - k)?))
}

/// Arithmetic mean. `None` for an empty slice.
#[must_use]
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[must_use]
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min * (1.0 - t) + max * t
}

#[must_use]
pub fn round_complex(c: Complex, n: i32) -> Complex {
    Complex::new(round(c.re, n), round(c.im, n))
}

impl From<Vec2> for Complex64 {
    fn from(vec: Vec2) -> Self {
        Complex64::new(vec.x, vec.y)
    }
}

impl From<Complex64> for Vec2 {
    fn from(c: Complex64) -> Self {
        Vec2::new(c.re, c.im)
    }
}
