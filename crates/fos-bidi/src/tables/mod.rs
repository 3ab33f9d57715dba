//! Static Unicode support data
//!
//! Paired brackets for BD16 and the mirroring glyph lookup for L4.

mod mirroring;

use mirroring::MIRRORING_GLYPHS;
use unicode_bidi::{BidiDataSource, HardcodedBidiData};

/// Whether a bracket opens or closes a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

/// Bidi_Paired_Bracket data for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Opening or closing
    pub kind: BracketKind,
    /// Opening bracket of the pair, canonicalised so that brackets with
    /// canonical equivalents (U+2329 and U+3008) compare equal.
    pub opening: char,
}

/// Look up the paired bracket data of a character.
///
/// Comes from the same Unicode tables as [`crate::BidiClass::of`].
pub fn bracket(c: char) -> Option<Bracket> {
    HardcodedBidiData.bidi_matched_opening_bracket(c).map(|matched| Bracket {
        kind: if matched.is_open { BracketKind::Open } else { BracketKind::Close },
        opening: matched.opening,
    })
}

/// Bidi_Mirroring_Glyph of a character, if it has one.
pub fn mirrored(c: char) -> Option<char> {
    MIRRORING_GLYPHS
        .binary_search_by_key(&c, |&(from, _)| from)
        .ok()
        .map(|i| MIRRORING_GLYPHS[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_brackets() {
        assert_eq!(bracket('('), Some(Bracket { kind: BracketKind::Open, opening: '(' }));
        assert_eq!(bracket(']'), Some(Bracket { kind: BracketKind::Close, opening: '[' }));
        assert_eq!(bracket('<'), None);
        assert_eq!(bracket('a'), None);
    }

    #[test]
    fn test_irregular_pairs() {
        // U+298D pairs with U+2990, U+298F with U+298E
        assert_eq!(bracket('\u{2990}').map(|b| b.opening), Some('\u{298D}'));
        assert_eq!(bracket('\u{298E}'), Some(Bracket { kind: BracketKind::Close, opening: '\u{298F}' }));
    }

    #[test]
    fn test_canonical_equivalent_brackets() {
        let old = bracket('\u{2329}').unwrap();
        let close = bracket('\u{3009}').unwrap();
        assert_eq!(old.kind, BracketKind::Open);
        assert_eq!(old.opening, close.opening);
        assert_eq!(bracket('\u{232A}').map(|b| b.opening), Some('\u{3008}'));
    }

    #[test]
    fn test_mirror() {
        assert_eq!(mirrored('('), Some(')'));
        assert_eq!(mirrored(')'), Some('('));
        assert_eq!(mirrored('«'), Some('»'));
        assert_eq!(mirrored('A'), None);
    }

    #[test]
    fn test_mirror_second_of_pair() {
        assert_eq!(mirrored('\u{2265}'), Some('\u{2264}'));
        assert_eq!(mirrored('\u{2990}'), Some('\u{298D}'));
        assert_eq!(mirrored('\u{29F5}'), Some('\u{2215}'));
        assert_eq!(mirrored('\u{22A3}'), Some('\u{22A2}'));
    }

    #[test]
    fn test_mirror_table_sorted_and_involutive() {
        assert!(MIRRORING_GLYPHS.windows(2).all(|w| w[0].0 < w[1].0));
        for &(from, to) in MIRRORING_GLYPHS {
            assert_eq!(mirrored(to), Some(from), "U+{:04X}", from as u32);
        }
    }

    #[test]
    fn test_mirror_table_agrees_with_ucd_crate() {
        for c in (0..0x11000).filter_map(char::from_u32) {
            if let Some(glyph) = unicode_bidi_mirroring::get_mirrored(c) {
                assert_eq!(mirrored(c), Some(glyph), "U+{:04X}", c as u32);
            }
        }
        let (major, minor, _) = unicode_bidi_mirroring::UNICODE_VERSION;
        let (bidi_major, bidi_minor, _) = unicode_bidi::UNICODE_VERSION;
        assert_eq!((u64::from(major), u64::from(minor)), (bidi_major, bidi_minor));
    }
}
