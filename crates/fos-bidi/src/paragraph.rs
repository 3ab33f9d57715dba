//! Paragraph resolution
//!
//! Runs the full pipeline over one paragraph: classification, P2/P3,
//! X1-X10, W1-W7, N0-N2 and I1-I2. Rule L1 depends on where lines end, so
//! it is applied when levels are requested for a line.

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;

use crate::direction::first_strong;
use crate::explicit::{resolve_explicit, ExplicitResult, OverflowCounters};
use crate::implicit::{reset_whitespace, resolve_implicit};
use crate::isolate::IsolateIndex;
use crate::neutral::resolve_neutral;
use crate::reorder::{self, BidiRun};
use crate::sequence::isolating_run_sequences;
use crate::weak::resolve_weak;
use crate::{BidiClass, BidiConfig, Direction, Level};

/// A resolved bidi paragraph
#[derive(Debug, Clone)]
pub struct BidiParagraph {
    /// Characters of the paragraph
    text: Vec<char>,
    /// Classifier output
    original: Vec<BidiClass>,
    /// Types after W1-W7 and N0-N2
    classes: Vec<BidiClass>,
    /// Levels after I1/I2, before L1
    levels: Vec<Level>,
    /// Paragraph embedding level
    paragraph_level: Level,
    counters: OverflowCounters,
    sequence_count: usize,
}

impl BidiParagraph {
    /// Process a paragraph of text.
    ///
    /// A paragraph separator inside `text` does not start a new paragraph;
    /// use [`resolve_paragraphs`] to split the text first.
    pub fn new(text: &str, config: &BidiConfig) -> Self {
        Self::from_chars(prepare(text, config), config)
    }

    /// Process already prepared characters. `config.normalize` is ignored.
    pub fn from_chars(text: Vec<char>, config: &BidiConfig) -> Self {
        let original = text.iter().map(|&c| BidiClass::of(c)).collect();
        Self::from_classified(text, original, config)
    }

    fn from_classified(text: Vec<char>, original: Vec<BidiClass>, config: &BidiConfig) -> Self {
        // Only the parity of a configured level is meaningful for a paragraph
        let default_level = config.paragraph_level.direction().level();
        let paragraph_level = if config.auto_detect {
            first_strong(&original).map_or(default_level, Direction::level)
        } else {
            default_level
        };

        let isolates = IsolateIndex::build(&original);
        let ExplicitResult { mut levels, mut classes, counters } =
            resolve_explicit(&original, &isolates, paragraph_level);

        let sequences = isolating_run_sequences(&original, &levels, &isolates, paragraph_level);
        for sequence in &sequences {
            resolve_weak(sequence, &original, &mut classes);
            resolve_neutral(sequence, &original, &text, &mut classes);
            resolve_implicit(sequence, &classes, &mut levels);
        }

        tracing::debug!(
            "Resolved bidi paragraph: {} chars, level {}, {} isolating run sequences",
            text.len(),
            paragraph_level,
            sequences.len()
        );

        Self {
            text,
            original,
            classes,
            levels,
            paragraph_level,
            counters,
            sequence_count: sequences.len(),
        }
    }

    /// Paragraph embedding level
    pub fn paragraph_level(&self) -> Level {
        self.paragraph_level
    }

    /// Characters of the paragraph
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bidi classes as returned by the classifier
    pub fn original_classes(&self) -> &[BidiClass] {
        &self.original
    }

    /// Resolved bidi types (after rule N2)
    pub fn classes(&self) -> &[BidiClass] {
        &self.classes
    }

    /// Overflow counters left by the explicit pass
    pub fn counters(&self) -> OverflowCounters {
        self.counters
    }

    /// Number of isolating run sequences the paragraph was split into
    pub fn sequence_count(&self) -> usize {
        self.sequence_count
    }

    /// Final levels with the whole paragraph laid out as one line.
    ///
    /// Characters removed by rule X9 have no level.
    pub fn levels(&self) -> Vec<Option<Level>> {
        self.line_levels(0..self.len())
    }

    /// Final levels of one line of the paragraph, after rule L1.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of bounds.
    pub fn line_levels(&self, line: Range<usize>) -> Vec<Option<Level>> {
        let original = &self.original[line.clone()];
        let mut levels = self.levels[line].to_vec();
        reset_whitespace(original, &mut levels, self.paragraph_level);

        original
            .iter()
            .zip(levels)
            .map(|(class, level)| (!class.is_removed_by_x9()).then_some(level))
            .collect()
    }

    /// Visual order of one line, as paragraph positions.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of bounds.
    pub fn reorder_line(&self, line: Range<usize>, ignore_invisible: bool) -> Vec<usize> {
        let offset = line.start;
        reorder::visual_order(&self.line_levels(line), ignore_invisible)
            .into_iter()
            .map(|i| i + offset)
            .collect()
    }

    /// Get runs of equal level in logical order
    pub fn runs(&self) -> Vec<BidiRun> {
        reorder::runs(&self.display_levels())
    }

    /// Reorder runs for visual display (L2)
    pub fn visual_runs(&self) -> Vec<BidiRun> {
        reorder::visual_runs(&self.display_levels())
    }

    /// Get reordered indices for visual display
    pub fn visual_indices(&self) -> Vec<usize> {
        reorder::visual_indices(&self.display_levels())
    }

    /// Levels of every position, removed characters following their neighbours
    fn display_levels(&self) -> Vec<Level> {
        reorder::fill_invisible(&self.levels())
    }
}

/// NFC-normalise `text` when the configuration asks for it.
pub(crate) fn prepare(text: &str, config: &BidiConfig) -> Vec<char> {
    if config.normalize {
        text.nfc().collect()
    } else {
        text.chars().collect()
    }
}

/// P1: split text into paragraphs.
///
/// Each paragraph separator stays with the paragraph it ends; CR LF counts
/// as one separator.
pub fn split_paragraphs(text: &[char], classes: &[BidiClass]) -> Vec<Range<usize>> {
    let mut paragraphs = Vec::new();
    let mut start = 0;

    for (i, &class) in classes.iter().enumerate() {
        if class != BidiClass::B {
            continue;
        }
        if text[i] == '\r' && text.get(i + 1) == Some(&'\n') {
            continue;
        }
        paragraphs.push(start..i + 1);
        start = i + 1;
    }
    if start < classes.len() {
        paragraphs.push(start..classes.len());
    }

    paragraphs
}

/// Split `text` into paragraphs and resolve each one independently.
pub fn resolve_paragraphs(text: &str, config: &BidiConfig) -> Vec<BidiParagraph> {
    let chars = prepare(text, config);
    let classes: Vec<BidiClass> = chars.iter().map(|&c| BidiClass::of(c)).collect();

    split_paragraphs(&chars, &classes)
        .into_iter()
        .map(|range| {
            BidiParagraph::from_classified(
                chars[range.clone()].to_vec(),
                classes[range].to_vec(),
                config,
            )
        })
        .collect()
}
