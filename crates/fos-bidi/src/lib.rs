//! fOS Bidi - Unicode Bidirectional Algorithm
//!
//! This crate resolves the display order of mixed left-to-right and
//! right-to-left text following UAX #9:
//! - Explicit embeddings, overrides and isolates (X1-X10)
//! - Weak and neutral type resolution, including paired brackets (W1-W7, N0-N2)
//! - Implicit levels and whitespace reset (I1-I2, L1)
//! - Visual reordering and mirrored glyphs (L2, L4)
//!
//! The free functions work on codepoint and level slices; [`BidiParagraph`]
//! keeps a resolved paragraph around for per-line queries.

pub mod brackets;
pub mod class;
pub mod config;
pub mod direction;
pub mod explicit;
pub mod implicit;
pub mod isolate;
pub mod level;
pub mod mirror;
pub mod neutral;
pub mod paragraph;
pub mod reorder;
pub mod sequence;
pub mod tables;
pub mod weak;

use unicode_normalization::UnicodeNormalization;

pub use class::BidiClass;
pub use config::BidiConfig;
pub use explicit::OverflowCounters;
pub use level::{Direction, Level, MAX_DEPTH, MAX_IMPLICIT};
pub use mirror::mirror_char;
pub use paragraph::{resolve_paragraphs, split_paragraphs, BidiParagraph};
pub use reorder::BidiRun;

/// Bidi error types
#[derive(Debug, thiserror::Error)]
pub enum BidiError {
    #[error("Invalid codepoint U+{value:04X} at index {index}")]
    InvalidCodepoint { index: usize, value: u32 },

    #[error("Length mismatch: {codepoints} codepoints, {levels} levels")]
    LengthMismatch { codepoints: usize, levels: usize },

    #[error("Invalid paragraph level: {0} (expected 0 or 1)")]
    InvalidParagraphLevel(u8),
}

pub type Result<T> = std::result::Result<T, BidiError>;

/// Resolve the embedding level of every character.
///
/// The input is NFC-normalised first, so the result lines up with
/// [`nfc`]`(codepoints)`, which may be shorter than `codepoints`. Characters
/// removed by rule X9 have no level. With `auto_detect`, the paragraph level
/// comes from the first strong character and `paragraph_level` is the
/// fallback.
pub fn resolve(codepoints: &[u32], paragraph_level: u8, auto_detect: bool) -> Result<Vec<Option<Level>>> {
    let config = BidiConfig::new()
        .with_paragraph_level(paragraph_level)?
        .auto_detect(auto_detect);
    Ok(resolve_with(codepoints, &config)?.levels())
}

/// Resolve one paragraph of codepoints with explicit settings.
pub fn resolve_with(codepoints: &[u32], config: &BidiConfig) -> Result<BidiParagraph> {
    let chars = decode(codepoints)?;
    let chars = if config.normalize {
        chars.into_iter().nfc().collect()
    } else {
        chars
    };
    Ok(BidiParagraph::from_chars(chars, config))
}

/// NFC form of `codepoints`, the sequence [`resolve`] assigns levels to.
pub fn nfc(codepoints: &[u32]) -> Result<Vec<u32>> {
    Ok(decode(codepoints)?.into_iter().nfc().map(u32::from).collect())
}

/// Codepoints in visual order (L2).
///
/// `levels` must line up with `codepoints`. With `ignore_invisible`,
/// characters without a level are dropped from the output.
pub fn reorder(codepoints: &[u32], levels: &[Option<Level>], ignore_invisible: bool) -> Result<Vec<u32>> {
    check_lengths(codepoints, levels)?;
    decode(codepoints)?;
    Ok(reorder_permutation(levels, ignore_invisible)
        .into_iter()
        .map(|i| codepoints[i])
        .collect())
}

/// Visual order as a permutation of logical indices.
pub fn reorder_permutation(levels: &[Option<Level>], ignore_invisible: bool) -> Vec<usize> {
    reorder::visual_order(levels, ignore_invisible)
}

/// Replace characters at odd levels by their mirrored glyph (L4).
pub fn mirror(codepoints: &[u32], levels: &[Option<Level>]) -> Result<Vec<u32>> {
    check_lengths(codepoints, levels)?;
    let chars = decode(codepoints)?;
    Ok(mirror::mirror_levels(&chars, levels)
        .into_iter()
        .map(u32::from)
        .collect())
}

/// Levels of a string, resolved as one paragraph.
pub fn resolve_str(text: &str, config: &BidiConfig) -> Vec<Option<Level>> {
    BidiParagraph::new(text, config).levels()
}

/// A string in visual order, without mirroring.
///
/// Characters removed by rule X9 are dropped.
pub fn reorder_str(text: &str, config: &BidiConfig) -> String {
    let paragraph = BidiParagraph::new(text, config);
    let text = paragraph.text();
    paragraph
        .reorder_line(0..paragraph.len(), true)
        .into_iter()
        .map(|i| text[i])
        .collect()
}

/// A string in logical order with mirrored glyphs applied.
pub fn mirror_str(text: &str, config: &BidiConfig) -> String {
    let paragraph = BidiParagraph::new(text, config);
    mirror::mirror_levels(paragraph.text(), &paragraph.levels())
        .into_iter()
        .collect()
}

/// Validate codepoints as Unicode scalar values.
fn decode(codepoints: &[u32]) -> Result<Vec<char>> {
    codepoints
        .iter()
        .enumerate()
        .map(|(index, &value)| char::from_u32(value).ok_or(BidiError::InvalidCodepoint { index, value }))
        .collect()
}

fn check_lengths(codepoints: &[u32], levels: &[Option<Level>]) -> Result<()> {
    if codepoints.len() != levels.len() {
        return Err(BidiError::LengthMismatch {
            codepoints: codepoints.len(),
            levels: levels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codepoints(text: &str) -> Vec<u32> {
        text.chars().map(u32::from).collect()
    }

    #[test]
    fn test_resolve_ltr() {
        let levels = resolve(&codepoints("abc"), 0, false).unwrap();
        assert_eq!(levels, vec![Some(Level(0)); 3]);
    }

    #[test]
    fn test_resolve_rejects_surrogates() {
        let err = resolve(&[0x61, 0xD800], 0, false).unwrap_err();
        assert!(matches!(err, BidiError::InvalidCodepoint { index: 1, value: 0xD800 }));
        assert!(resolve(&[0x110000], 0, false).is_err());
    }

    #[test]
    fn test_resolve_rejects_paragraph_level() {
        assert!(matches!(resolve(&[0x61], 2, false), Err(BidiError::InvalidParagraphLevel(2))));
    }

    #[test]
    fn test_resolve_normalizes() {
        let input = [0x65, 0x301];
        assert_eq!(nfc(&input).unwrap(), vec![0xE9]);
        assert_eq!(resolve(&input, 0, false).unwrap().len(), 1);
    }

    #[test]
    fn test_reorder() {
        let cps = codepoints("ab אב");
        let levels = resolve(&cps, 0, false).unwrap();
        let visual = reorder(&cps, &levels, false).unwrap();
        assert_eq!(visual, codepoints("ab בא"));
    }

    #[test]
    fn test_length_mismatch() {
        let err = mirror(&[0x28], &[]).unwrap_err();
        assert!(matches!(err, BidiError::LengthMismatch { codepoints: 1, levels: 0 }));
        assert!(reorder(&[0x28], &[], false).is_err());
    }

    #[test]
    fn test_mirror() {
        let cps = codepoints("(a)");
        let levels = [Some(Level(1)), Some(Level(2)), Some(Level(1))];
        assert_eq!(mirror(&cps, &levels).unwrap(), codepoints(")a("));
    }

    #[test]
    fn test_str_helpers() {
        let config = BidiConfig::new().auto_detect(true);
        assert_eq!(reorder_str("אבג", &config), "גבא");
        assert_eq!(reorder_str("a\u{202E}bc\u{202C}", &config), "acb");
        assert_eq!(mirror_str("א(ב)", &config), "א)ב(");
        assert_eq!(resolve_str("", &config), vec![]);
    }

    #[test]
    fn test_error_display() {
        let err = BidiError::InvalidCodepoint { index: 3, value: 0xD800 };
        assert_eq!(err.to_string(), "Invalid codepoint U+D800 at index 3");
    }
}
