//! Character constants for the rain.

use drepheus_core::GlyphSet;

/// Latin letters, digits and shifted digit-row symbols.
pub const CLASSIC_CHARS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j',
    'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1',
    '2', '3', '4', '5', '6', '7', '8', '9', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')',
];

/// Half-width katakana (one terminal cell each) with digits and a few symbols.
pub const KATAKANA_CHARS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ',
    'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ', 'ﾋ', '0', '1', '2', '3', '4', '5', '6', '7', '8',
    '9', ':', '|', '¦', '¬', '=', '*', '+',
];

/// Glyphs for the given set. Never empty.
pub fn glyphs(set: GlyphSet) -> &'static [char] {
    match set {
        GlyphSet::Classic => CLASSIC_CHARS,
        GlyphSet::Katakana => KATAKANA_CHARS,
    }
}
