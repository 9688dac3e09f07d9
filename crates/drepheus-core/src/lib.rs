//! Core types for the drepheus portal.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a theme, speed or glyph set name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`, expected one of: {expected}")]
pub struct UnknownVariant {
    kind: &'static str,
    name: String,
    expected: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, name: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            name: name.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Color theme for the rain and the portal screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    /// Neon green of the landing page.
    #[default]
    Neon,
    Green,
    Blue,
    Gold,
    White,
}

impl ColorTheme {
    /// All themes in cycling order.
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::Neon,
        ColorTheme::Green,
        ColorTheme::Blue,
        ColorTheme::Gold,
        ColorTheme::White,
    ];

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Neon => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::Gold,
            ColorTheme::Gold => ColorTheme::White,
            ColorTheme::White => ColorTheme::Neon,
        }
    }

    /// Lowercase name, as used in the config file and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Neon => "neon",
            ColorTheme::Green => "green",
            ColorTheme::Blue => "blue",
            ColorTheme::Gold => "gold",
            ColorTheme::White => "white",
        }
    }

    /// Main glyph color as RGB components.
    pub fn primary_rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Neon => (0x39, 0xff, 0x14),
            ColorTheme::Green => (0x00, 0xff, 0x00),
            ColorTheme::Blue => (0x00, 0xff, 0xff),
            ColorTheme::Gold => (0xff, 0xd7, 0x00),
            ColorTheme::White => (0xff, 0xff, 0xff),
        }
    }

    /// Main glyph color.
    pub fn primary(self) -> Color {
        let (r, g, b) = self.primary_rgb();
        Color::Rgb(r, g, b)
    }

    /// Leading-edge highlight color.
    pub fn bright(self) -> Color {
        match self {
            ColorTheme::Neon => Color::Rgb(0xb6, 0xff, 0x9e),
            ColorTheme::Green => Color::Rgb(0x66, 0xff, 0x66),
            ColorTheme::Blue => Color::Rgb(0x66, 0xff, 0xff),
            ColorTheme::Gold => Color::Rgb(0xff, 0xff, 0x66),
            ColorTheme::White => Color::Rgb(0xff, 0xff, 0xff),
        }
    }

    /// Subdued color for secondary text.
    pub fn dim(self) -> Color {
        match self {
            ColorTheme::Neon => Color::Rgb(0x1c, 0x80, 0x0a),
            ColorTheme::Green => Color::Rgb(0x00, 0x88, 0x00),
            ColorTheme::Blue => Color::Rgb(0x00, 0x88, 0xaa),
            ColorTheme::Gold => Color::Rgb(0xcc, 0x88, 0x00),
            ColorTheme::White => Color::Rgb(0xcc, 0xcc, 0xcc),
        }
    }
}

impl FromStr for ColorTheme {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
                UnknownVariant::new("theme", s, &names)
            })
    }
}

/// How fast the rain falls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl RainSpeed {
    pub const ALL: [RainSpeed; 3] = [RainSpeed::Slow, RainSpeed::Normal, RainSpeed::Fast];

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            RainSpeed::Slow => RainSpeed::Normal,
            RainSpeed::Normal => RainSpeed::Fast,
            RainSpeed::Fast => RainSpeed::Slow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RainSpeed::Slow => "slow",
            RainSpeed::Normal => "normal",
            RainSpeed::Fast => "fast",
        }
    }

    /// Number of frame callbacks per logical rain update.
    pub fn frames_per_update(self) -> u64 {
        match self {
            RainSpeed::Slow => 6,
            RainSpeed::Normal => 4,
            RainSpeed::Fast => 2,
        }
    }
}

impl FromStr for RainSpeed {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|speed| speed.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
                UnknownVariant::new("speed", s, &names)
            })
    }
}

/// Which characters the rain draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Latin letters, digits and a few symbols.
    #[default]
    Classic,
    /// Half-width katakana mixed with digits.
    Katakana,
}

impl GlyphSet {
    pub const ALL: [GlyphSet; 2] = [GlyphSet::Classic, GlyphSet::Katakana];

    pub fn name(self) -> &'static str {
        match self {
            GlyphSet::Classic => "classic",
            GlyphSet::Katakana => "katakana",
        }
    }
}

impl FromStr for GlyphSet {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|set| set.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|g| g.name()).collect();
                UnknownVariant::new("glyph set", s, &names)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_visits_every_theme() {
        let mut theme = ColorTheme::default();
        for expected in ColorTheme::ALL {
            assert_eq!(theme, expected);
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Neon);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("gold".parse::<ColorTheme>(), Ok(ColorTheme::Gold));
        assert_eq!(" Neon ".parse::<ColorTheme>(), Ok(ColorTheme::Neon));
        let err = "purple".parse::<ColorTheme>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown theme `purple`, expected one of: neon, green, blue, gold, white"
        );
    }

    #[test]
    fn test_speed_frames_per_update() {
        assert_eq!(RainSpeed::default().frames_per_update(), 4);
        assert!(RainSpeed::Slow.frames_per_update() > RainSpeed::Fast.frames_per_update());
        assert_eq!(RainSpeed::Fast.next(), RainSpeed::Slow);
        assert_eq!("FAST".parse::<RainSpeed>(), Ok(RainSpeed::Fast));
    }

    #[test]
    fn test_glyph_set_from_str() {
        assert_eq!("katakana".parse::<GlyphSet>(), Ok(GlyphSet::Katakana));
        assert!("emoji".parse::<GlyphSet>().is_err());
    }

    #[test]
    fn test_neon_primary_matches_rgb() {
        assert_eq!(ColorTheme::Neon.primary(), Color::Rgb(0x39, 0xff, 0x14));
    }
}
