//! RGBA colors with clamped byte channels.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid color component in {0}")]
    InvalidComponent(String),
    #[error("unknown color: {0}")]
    Unknown(String),
}

/// Color with `r`, `g`, `b` and alpha stored as bytes.
///
/// Every write rounds and clamps to `0..=255`, so arithmetic saturates
/// instead of wrapping. The alpha byte is exposed as a fraction through
/// [`Color::a`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    rgba: [u8; 4],
}

/// Rounds half to even and clamps to a byte. NaN maps to zero.
fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

impl Color {
    pub const BLACK: Self = Self::from_bytes(0, 0, 0, 255);
    pub const WHITE: Self = Self::from_bytes(255, 255, 255, 255);
    pub const RED: Self = Self::from_bytes(255, 0, 0, 255);
    pub const GREEN: Self = Self::from_bytes(0, 128, 0, 255);
    pub const BLUE: Self = Self::from_bytes(0, 0, 255, 255);
    pub const TRANSPARENT: Self = Self::from_bytes(0, 0, 0, 0);

    /// Channels in `0..=255`, alpha in `0..=1`.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            rgba: [
                clamp_channel(r),
                clamp_channel(g),
                clamp_channel(b),
                clamp_channel(a * 255.0),
            ],
        }
    }

    /// Opaque color.
    #[must_use]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[must_use]
    pub const fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Parses `rrggbb` or the `rgb` shorthand, with or without a leading `#`.
    pub fn from_hex_string(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(text.to_owned()));
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|ch| [ch, ch]).collect(),
            6 => digits.to_owned(),
            _ => return Err(ColorParseError::InvalidHex(text.to_owned())),
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorParseError::InvalidHex(text.to_owned()))?;
        Ok(Self::from_bytes(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
            255,
        ))
    }

    /// Random opaque color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_bytes(rng.random(), rng.random(), rng.random(), 255)
    }

    #[must_use]
    pub const fn r(&self) -> u8 {
        self.rgba[0]
    }

    #[must_use]
    pub const fn g(&self) -> u8 {
        self.rgba[1]
    }

    #[must_use]
    pub const fn b(&self) -> u8 {
        self.rgba[2]
    }

    /// Alpha in `0..=1`.
    #[must_use]
    pub fn a(&self) -> f64 {
        f64::from(self.rgba[3]) / 255.0
    }

    pub fn set_r(&mut self, value: f64) {
        self.rgba[0] = clamp_channel(value);
    }

    pub fn set_g(&mut self, value: f64) {
        self.rgba[1] = clamp_channel(value);
    }

    pub fn set_b(&mut self, value: f64) {
        self.rgba[2] = clamp_channel(value);
    }

    pub fn set_a(&mut self, value: f64) {
        self.rgba[3] = clamp_channel(value * 255.0);
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 4] {
        self.rgba
    }

    #[must_use]
    pub fn to_rgb_string(&self) -> String {
        let [r, g, b, _] = self.rgba;
        format!("rgb({r},{g},{b})")
    }

    #[must_use]
    pub fn to_rgba_string(&self) -> String {
        let [r, g, b, _] = self.rgba;
        format!("rgba({r},{g},{b},{})", self.a())
    }

    /// `rrggbb` without a leading `#`.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, _] = self.rgba;
        format!("{r:02x}{g:02x}{b:02x}")
    }

    /// Source-over compositing of `self` on top of `below`.
    #[must_use]
    pub fn blend(&self, below: &Self) -> Self {
        let top_alpha = self.a();
        let below_alpha = below.a();
        let alpha = top_alpha + below_alpha * (1.0 - top_alpha);
        if alpha == 0.0 {
            return Self::TRANSPARENT;
        }
        let channel = |i: usize| {
            (f64::from(self.rgba[i]) * top_alpha
                + f64::from(below.rgba[i]) * below_alpha * (1.0 - top_alpha))
                / alpha
        };
        Self::new(channel(0), channel(1), channel(2), alpha)
    }

    /// Channel-wise `255 - c`, alpha kept.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let [r, g, b, a] = self.rgba;
        Self::from_bytes(255 - r, 255 - g, 255 - b, a)
    }

    #[must_use]
    pub fn grayscale(&self) -> Self {
        let [r, g, b, a] = self.rgba;
        let gray = clamp_channel(f64::from(r) * 0.3 + f64::from(g) * 0.59 + f64::from(b) * 0.11);
        Self::from_bytes(gray, gray, gray, a)
    }

    /// Channel interpolation. The result is always opaque.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let channel =
            |i: usize| f64::from(self.rgba[i]) * (1.0 - t) + f64::from(other.rgba[i]) * t;
        Self::rgb(channel(0), channel(1), channel(2))
    }

    fn map_rgb(self, f: impl Fn(f64, usize) -> f64) -> Self {
        let mut rgba = self.rgba;
        for (i, channel) in rgba.iter_mut().take(3).enumerate() {
            *channel = clamp_channel(f(f64::from(*channel), i));
        }
        Self { rgba }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgba_string())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and a
    /// few CSS color names.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.starts_with('#') {
            return Self::from_hex_string(trimmed);
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_functional_color(&lower);
        }
        named_color(&lower)
            .or_else(|| Self::from_hex_string(trimmed).ok())
            .ok_or_else(|| ColorParseError::Unknown(text.to_owned()))
    }
}

fn parse_functional_color(text: &str) -> Result<Color, ColorParseError> {
    let body = text
        .trim_start_matches("rgba")
        .trim_start_matches("rgb")
        .trim();
    let inner = body
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorParseError::InvalidComponent(text.to_owned()))?;

    let mut values = Vec::with_capacity(4);
    for token in inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let value = token
            .parse::<f64>()
            .map_err(|_| ColorParseError::InvalidComponent(text.to_owned()))?;
        values.push(value);
    }

    match values.as_slice() {
        [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
        [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
        _ => Err(ColorParseError::InvalidComponent(text.to_owned())),
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "lime" => Color::from_bytes(0, 255, 0, 255),
        "blue" => Color::BLUE,
        "yellow" => Color::from_bytes(255, 255, 0, 255),
        "magenta" | "fuchsia" => Color::from_bytes(255, 0, 255, 255),
        "cyan" | "aqua" => Color::from_bytes(0, 255, 255, 255),
        "orange" => Color::from_bytes(255, 165, 0, 255),
        "purple" => Color::from_bytes(128, 0, 128, 255),
        "gray" | "grey" => Color::from_bytes(128, 128, 128, 255),
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

impl Add for Color {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.map_rgb(|c, i| c + f64::from(rhs.rgba[i]))
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Color {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.map_rgb(|c, i| c - f64::from(rhs.rgba[i]))
    }
}

impl SubAssign for Color {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Color {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.map_rgb(|c, _| c * rhs)
    }
}

impl MulAssign<f64> for Color {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Color {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        self.map_rgb(|c, _| c / rhs)
    }
}

impl DivAssign<f64> for Color {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}
