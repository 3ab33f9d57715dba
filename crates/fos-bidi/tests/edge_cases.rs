//! Edge case and stress tests for fos-bidi
//!
//! Tests degenerate input, malformed codepoints and the depth limits of the
//! explicit and bracket stacks.

use fos_bidi::{
    mirror, reorder, reorder_permutation, resolve, resolve_paragraphs, resolve_with, BidiConfig,
    BidiError, Level, MAX_DEPTH, MAX_IMPLICIT,
};

fn raw() -> BidiConfig {
    BidiConfig::new().normalize(false)
}

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_empty_input() {
    assert!(resolve(&[], 0, false).unwrap().is_empty());
    assert!(resolve(&[], 1, true).unwrap().is_empty());
    assert!(reorder(&[], &[], false).unwrap().is_empty());
    assert!(reorder_permutation(&[], true).is_empty());
    assert!(mirror(&[], &[]).unwrap().is_empty());
    assert!(resolve_paragraphs("", &BidiConfig::new()).is_empty());
}

#[test]
fn test_only_controls() {
    let cps = [0x202B, 0x202C];
    let levels = resolve(&cps, 0, false).unwrap();
    assert_eq!(levels, vec![None, None]);
    assert!(reorder_permutation(&levels, true).is_empty());
    assert_eq!(reorder_permutation(&levels, false), vec![0, 1]);
}

#[test]
fn test_single_characters() {
    assert_eq!(resolve(&[0x05D0], 0, false).unwrap(), vec![Some(Level(1))]);
    assert_eq!(resolve(&[0x0031], 1, false).unwrap(), vec![Some(Level(2))]);
    // trailing whitespace always returns to the paragraph level
    assert_eq!(resolve(&[0x0020], 1, false).unwrap(), vec![Some(Level(1))]);
}

// ============================================================================
// MALFORMED INPUT
// ============================================================================

#[test]
fn test_surrogate_codepoint() {
    let err = resolve(&[0x61, 0xDFFF, 0x62], 0, false).unwrap_err();
    assert!(matches!(err, BidiError::InvalidCodepoint { index: 1, value: 0xDFFF }));
}

#[test]
fn test_codepoint_out_of_range() {
    assert!(matches!(
        resolve(&[0x0011_0000], 0, false),
        Err(BidiError::InvalidCodepoint { index: 0, .. })
    ));
    assert!(matches!(
        mirror(&[u32::MAX], &[Some(Level(1))]),
        Err(BidiError::InvalidCodepoint { .. })
    ));
}

#[test]
fn test_invalid_paragraph_level() {
    assert!(matches!(resolve(&[0x61], 3, false), Err(BidiError::InvalidParagraphLevel(3))));
}

#[test]
fn test_length_mismatch() {
    let err = reorder(&[0x61, 0x62], &[Some(Level(0))], true).unwrap_err();
    assert!(matches!(err, BidiError::LengthMismatch { codepoints: 2, levels: 1 }));
    assert_eq!(
        err.to_string(),
        "Length mismatch: 2 codepoints, 1 levels"
    );
}

// ============================================================================
// DEPTH LIMITS
// ============================================================================

#[test]
fn test_isolate_overflow() {
    // 130 LRIs followed by a letter so L1 leaves the isolates alone
    let mut cps = vec![0x2066; 130];
    cps.push(0x61);
    let paragraph = resolve_with(&cps, &raw()).unwrap();

    let counters = paragraph.counters();
    assert!(counters.overflow_isolate > 0);
    assert_eq!(counters.valid_isolate, 62);
    assert_eq!(counters.overflow_isolate, 68);

    let levels = paragraph.levels();
    assert_eq!(levels[61], Some(Level(122)));
    assert!(levels[62..].iter().all(|l| *l == Some(Level(124))));
    assert!(levels.iter().flatten().all(|l| l.number() <= MAX_DEPTH));
}

#[test]
fn test_implicit_level_ceiling() {
    // 63 RLIs reach level 125; an L inside the innermost isolate climbs to 126
    let mut cps = vec![0x2067; 130];
    cps.extend([0x05D0, 0x0028, 0x0061, 0x0029]);
    let levels = resolve(&cps, 0, false).unwrap();

    assert_eq!(levels[130], Some(Level(MAX_DEPTH)));
    assert_eq!(levels[131], Some(Level(MAX_DEPTH)));
    assert_eq!(levels[132], Some(Level(MAX_IMPLICIT)));
    assert_eq!(levels[133], Some(Level(MAX_DEPTH)));
    assert_eq!(levels.iter().flatten().max(), Some(&Level(MAX_IMPLICIT)));
}

#[test]
fn test_trailing_isolates_reset() {
    let levels = resolve(&[0x2066; 130], 0, false).unwrap();
    assert!(levels.iter().all(|l| *l == Some(Level(0))));
}

#[test]
fn test_embedding_overflow() {
    let mut cps = vec![0x202B; 70];
    cps.push(0x05D0);
    let paragraph = resolve_with(&cps, &raw()).unwrap();
    assert_eq!(paragraph.counters().overflow_embedding, 7);
    assert_eq!(paragraph.levels()[70], Some(Level(MAX_DEPTH)));
}

#[test]
fn test_deep_alternating_embeddings() {
    // LRE RLE LRE ... climbs one level per control
    let mut cps: Vec<u32> = (0..200).map(|i| if i % 2 == 0 { 0x202A } else { 0x202B }).collect();
    cps.push(0x05D0);
    let levels = resolve(&cps, 0, false).unwrap();
    assert_eq!(levels[200], Some(Level(MAX_DEPTH)));
}

#[test]
fn test_bracket_stack_overflow() {
    // more openers than the pairing stack holds: no pairs, no panic
    let mut text = "(".repeat(100);
    text.push('\u{05D0}');
    text.push_str(&")".repeat(100));
    let cps: Vec<u32> = text.chars().map(u32::from).collect();
    let levels = resolve(&cps, 0, false).unwrap();
    assert_eq!(levels.len(), 201);
    assert_eq!(reorder_permutation(&levels, true).len(), 201);
}

#[test]
fn test_long_mixed_text() {
    let text = "abc \u{05D0}\u{05D1}\u{05D2} 123 ".repeat(500);
    let cps: Vec<u32> = text.chars().map(u32::from).collect();
    let levels = resolve(&cps, 1, false).unwrap();
    let mut order = reorder_permutation(&levels, false);
    order.sort_unstable();
    assert_eq!(order, (0..cps.len()).collect::<Vec<_>>());
}

// ============================================================================
// PARAGRAPHS AND SEPARATORS
// ============================================================================

#[test]
fn test_separator_inside_single_paragraph() {
    // X8: the separator ends the embedding and takes the paragraph level
    let cps = [0x202B, 0x61, 0x2029, 0x62];
    let levels = resolve(&cps, 0, false).unwrap();
    assert_eq!(levels, vec![None, Some(Level(2)), Some(Level(0)), Some(Level(0))]);
}

#[test]
fn test_paragraphs_resolved_independently() {
    let config = BidiConfig::new().auto_detect(true);
    let paragraphs = resolve_paragraphs("\u{05D0}\u{202B}b\r\nc\u{2029}", &config);
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].len(), 5);
    assert_eq!(paragraphs[0].paragraph_level(), Level::RTL);
    assert_eq!(paragraphs[1].paragraph_level(), Level::LTR);
    assert_eq!(paragraphs[1].levels(), vec![Some(Level(0)), Some(Level(0))]);
}

#[test]
fn test_unmatched_isolate_controls() {
    // PDI without initiator and initiator without PDI
    let cps = [0x2069, 0x05D0, 0x2067, 0x61];
    let levels = resolve(&cps, 0, false).unwrap();
    assert_eq!(levels, vec![Some(Level(0)), Some(Level(1)), Some(Level(0)), Some(Level(2))]);
}
