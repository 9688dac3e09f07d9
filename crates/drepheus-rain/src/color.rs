//! Color helpers for shading the trail.

use ratatui::style::Color;

/// Scale an RGB color by an intensity in `0.0..=1.0`.
pub fn shade(rgb: (u8, u8, u8), intensity: f32) -> Color {
    let k = intensity.clamp(0.0, 1.0);
    let (r, g, b) = rgb;
    Color::Rgb(
        (r as f32 * k) as u8,
        (g as f32 * k) as u8,
        (b as f32 * k) as u8,
    )
}

/// Blend from `from` to `to`; `t = 0` is `from`, `t = 1` is `to`.
pub fn mix(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_bounds() {
        assert_eq!(shade((0x39, 0xff, 0x14), 1.0), Color::Rgb(0x39, 0xff, 0x14));
        assert_eq!(shade((0x39, 0xff, 0x14), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(shade((200, 200, 200), 2.0), Color::Rgb(200, 200, 200));
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix((0, 0, 0), (255, 255, 255), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(mix((0, 0, 0), (255, 255, 255), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(mix((0, 100, 0), (100, 200, 100), 0.5), Color::Rgb(50, 150, 50));
    }
}
