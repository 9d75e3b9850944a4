//! RGB display colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 8-bit RGB color used for furniture, room surfaces and overlays.
///
/// Serialized as a palette name or `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Overlay colors for the default marker bindings
    pub const BLUE: Self = Self::rgb(0, 100, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Planner palette
    pub const WOOD: Self = Self::rgb(80, 60, 45);
    pub const DARK_WOOD: Self = Self::rgb(65, 45, 30);
    pub const FLOOR: Self = Self::rgb(139, 115, 85);
    pub const WALL: Self = Self::rgb(220, 220, 220);
    pub const BLACKBOARD: Self = Self::rgb(26, 26, 26);
    pub const GRID: Self = Self::rgb(70, 82, 99);
    pub const GRID_AXIS: Self = Self::rgb(100, 116, 139);
    pub const METAL: Self = Self::rgb(120, 128, 140);
    pub const BACKDROP: Self = Self::rgb(15, 23, 42);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other` (0.0 = self, 1.0 = other)
    pub fn blend(&self, other: &Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - alpha) + b as f32 * alpha).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Scale brightness by `intensity` (clamped to [0, 1])
    pub fn shade(&self, intensity: f32) -> Color {
        let k = intensity.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * k) as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error for unrecognized color names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts a palette name (`"blue"`) or a hex triplet (`"#0064ff"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                    return Ok(Color::rgb(r, g, b));
                }
            }
            return Err(ParseColorError(s.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "blue" => Ok(Color::BLUE),
            "red" => Ok(Color::RED),
            "yellow" => Ok(Color::YELLOW),
            "green" => Ok(Color::GREEN),
            "wood" => Ok(Color::WOOD),
            "dark_wood" | "dark-wood" => Ok(Color::DARK_WOOD),
            "metal" => Ok(Color::METAL),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
