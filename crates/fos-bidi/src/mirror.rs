//! Mirrored glyph substitution (L4)

use crate::tables;
use crate::Level;

/// Mirror a character for RTL display
pub fn mirror_char(c: char) -> char {
    tables::mirrored(c).unwrap_or(c)
}

/// L4: replace every character resolved to an odd level by its mirrored
/// glyph, when it has one. Invisible positions are left alone.
pub fn mirror_levels(text: &[char], levels: &[Option<Level>]) -> Vec<char> {
    text.iter()
        .zip(levels)
        .map(|(&c, level)| match level {
            Some(level) if level.is_rtl() => mirror_char(c),
            _ => c,
        })
        .collect()
}
