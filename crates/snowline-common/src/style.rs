//! Style configuration for snowline maps.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Map styling: snowline stroke and graticule appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_snowline_color")]
    pub snowline_color: Color,

    #[serde(default = "default_snowline_width")]
    pub snowline_width: f64,

    #[serde(default = "default_gridline_color")]
    pub gridline_color: Color,

    #[serde(default)]
    pub gridline_style: LineStyle,
}

fn default_snowline_color() -> Color {
    Color::new("#0000FF")
}

fn default_snowline_width() -> f64 {
    1.5
}

fn default_gridline_color() -> Color {
    Color::new("#CCCCCC")
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            snowline_color: default_snowline_color(),
            snowline_width: default_snowline_width(),
            gridline_color: default_gridline_color(),
            gridline_style: LineStyle::default(),
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snowline_color.validate("snowline_color")?;
        self.gridline_color.validate("gridline_color")?;

        if !(self.snowline_width > 0.0) || !self.snowline_width.is_finite() {
            return Err(ConfigError::invalid_style(format!(
                "snowline_width ({}) must be positive",
                self.snowline_width
            )));
        }
        Ok(())
    }
}

/// Colour names accepted in addition to hex codes.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("olive", (128, 128, 0)),
    ("maroon", (128, 0, 0)),
    ("aqua", (0, 255, 255)),
    ("fuchsia", (255, 0, 255)),
    ("lime", (0, 255, 0)),
    ("silver", (192, 192, 192)),
];

/// A colour given as "#RGB", "#RRGGBB" or a named colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the colour syntax, naming `field` in the error.
    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if self.0.starts_with('#') {
            if parse_hex_color(&self.0).is_none() {
                return Err(ConfigError::invalid_color(format!(
                    "Invalid hex color code for {}: '{}'. Expected format: #RGB or #RRGGBB",
                    field, self.0
                )));
            }
        } else if named_color(&self.0).is_none() {
            return Err(ConfigError::invalid_color(format!(
                "Invalid color for {}: '{}'. Expected a hex code (#RRGGBB) or named color.",
                field, self.0
            )));
        }
        Ok(())
    }

    /// Convert to an RGB tuple. Invalid colours resolve to black.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        if self.0.starts_with('#') {
            parse_hex_color(&self.0).unwrap_or((0, 0, 0))
        } else {
            named_color(&self.0).unwrap_or((0, 0, 0))
        }
    }

    /// Normalized "#rrggbb" form.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    let lower = name.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, rgb)| *rgb)
}

/// Graticule dash pattern in "-", "--", ":", "-." notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[serde(rename = "-")]
    Solid,
    #[default]
    #[serde(rename = "--")]
    Dashed,
    #[serde(rename = ":")]
    Dotted,
    #[serde(rename = "-.")]
    DashDot,
}

impl LineStyle {
    /// SVG `stroke-dasharray` value, `None` for solid lines.
    pub fn dasharray(&self) -> Option<&'static str> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some("6,4"),
            LineStyle::Dotted => Some("1,3"),
            LineStyle::DashDot => Some("6,3,1,3"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::new("#FF5500").to_rgb(), (255, 85, 0));
        assert_eq!(Color::new("#fff").to_rgb(), (255, 255, 255));
        assert_eq!(Color::new("Navy").to_rgb(), (0, 0, 128));
        assert_eq!(Color::new("#0000FF").to_hex(), "#0000ff");
    }

    #[test]
    fn test_color_validation() {
        assert!(Color::new("#abc").validate("c").is_ok());
        assert!(Color::new("#AABBCC").validate("c").is_ok());
        assert!(Color::new("silver").validate("c").is_ok());

        let err = Color::new("#GGGGGG").validate("snowline_color").unwrap_err();
        assert!(err.to_string().contains("Invalid hex color code for snowline_color"));

        let err = Color::new("#ABCD").validate("snowline_color").unwrap_err();
        assert!(err.to_string().contains("#RGB or #RRGGBB"));

        let err = Color::new("chartreuse").validate("gridline_color").unwrap_err();
        assert!(err.to_string().contains("Invalid color for gridline_color"));
    }

    #[test]
    fn test_style_defaults_and_width() {
        let style = StyleConfig::default();
        assert!(style.validate().is_ok());
        assert_eq!(style.gridline_style, LineStyle::Dashed);

        let bad = StyleConfig {
            snowline_width: 0.0,
            ..StyleConfig::default()
        };
        assert!(bad.validate().unwrap_err().to_string().contains("must be positive"));
    }

    #[test]
    fn test_line_style_dasharray() {
        assert_eq!(LineStyle::Solid.dasharray(), None);
        assert_eq!(LineStyle::Dotted.dasharray(), Some("1,3"));
    }
}
