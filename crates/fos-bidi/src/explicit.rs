//! Explicit levels and directions (X1-X8)
//!
//! One left-to-right pass over the paragraph that tracks the directional
//! status stack and assigns every character its explicit embedding level.

use crate::direction::first_strong;
use crate::isolate::IsolateIndex;
use crate::level::MAX_DEPTH;
use crate::{BidiClass, Direction, Level};

/// Directional override status of a stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideStatus {
    Neutral,
    ForceLtr,
    ForceRtl,
}

/// Entry of the directional status stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalStatus {
    pub level: Level,
    pub override_status: OverrideStatus,
    pub isolate: bool,
}

/// Overflow bookkeeping of rules X1-X8 (diagnostic output)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowCounters {
    pub overflow_isolate: usize,
    pub overflow_embedding: usize,
    pub valid_isolate: usize,
}

/// Directional status stack.
///
/// The top entry is held apart from the rest so the stack can never be
/// empty: the paragraph entry pushed by X1 is never popped.
#[derive(Debug, Clone)]
struct DirectionalStatusStack {
    top: DirectionalStatus,
    below: Vec<DirectionalStatus>,
}

impl DirectionalStatusStack {
    fn new(paragraph_level: Level) -> Self {
        Self {
            top: DirectionalStatus {
                level: paragraph_level,
                override_status: OverrideStatus::Neutral,
                isolate: false,
            },
            below: Vec::with_capacity(MAX_DEPTH as usize + 1),
        }
    }

    fn last(&self) -> DirectionalStatus {
        self.top
    }

    fn depth(&self) -> usize {
        self.below.len() + 1
    }

    fn push(&mut self, entry: DirectionalStatus) {
        debug_assert!(entry.level > self.top.level);
        debug_assert!(self.depth() <= MAX_DEPTH as usize + 1);
        self.below.push(std::mem::replace(&mut self.top, entry));
    }

    /// Pop the top entry; the paragraph entry stays.
    fn pop(&mut self) -> Option<DirectionalStatus> {
        let next = self.below.pop()?;
        Some(std::mem::replace(&mut self.top, next))
    }
}

/// Output of the explicit stage
#[derive(Debug, Clone)]
pub struct ExplicitResult {
    /// Explicit embedding level of every character
    pub levels: Vec<Level>,
    /// Character types after directional overrides
    pub classes: Vec<BidiClass>,
    /// Final counter values
    pub counters: OverflowCounters,
}

/// Working state of one paragraph's explicit pass
struct ExplicitResolver<'a> {
    original: &'a [BidiClass],
    isolates: &'a IsolateIndex,
    paragraph_level: Level,
    stack: DirectionalStatusStack,
    counters: OverflowCounters,
    levels: Vec<Level>,
    classes: Vec<BidiClass>,
}

/// Run rules X1-X8 over one paragraph.
///
/// `original` holds the classifier output; `isolates` must be built from it.
pub fn resolve_explicit(
    original: &[BidiClass],
    isolates: &IsolateIndex,
    paragraph_level: Level,
) -> ExplicitResult {
    let mut resolver = ExplicitResolver {
        original,
        isolates,
        paragraph_level,
        stack: DirectionalStatusStack::new(paragraph_level),
        counters: OverflowCounters::default(),
        levels: vec![paragraph_level; original.len()],
        classes: original.to_vec(),
    };

    for i in 0..original.len() {
        resolver.step(i);
    }

    if resolver.counters.overflow_isolate > 0 || resolver.counters.overflow_embedding > 0 {
        tracing::trace!(
            "Explicit stack overflow: {} isolates, {} embeddings",
            resolver.counters.overflow_isolate,
            resolver.counters.overflow_embedding
        );
    }

    ExplicitResult {
        levels: resolver.levels,
        classes: resolver.classes,
        counters: resolver.counters,
    }
}

impl ExplicitResolver<'_> {
    fn step(&mut self, i: usize) {
        let class = self.original[i];
        match class {
            // X2-X5
            BidiClass::RLE | BidiClass::LRE | BidiClass::RLO | BidiClass::LRO => {
                self.levels[i] = self.stack.last().level;
                let override_status = match class {
                    BidiClass::RLO => OverrideStatus::ForceRtl,
                    BidiClass::LRO => OverrideStatus::ForceLtr,
                    _ => OverrideStatus::Neutral,
                };
                self.push_embedding(class.is_rtl(), override_status);
            }

            // X5a-X5c
            BidiClass::RLI | BidiClass::LRI | BidiClass::FSI => {
                self.assign_current(i);
                let is_rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    _ => self.fsi_direction(i) == Some(Direction::Rtl),
                };
                self.push_isolate(is_rtl);
            }

            // X6a
            BidiClass::PDI => {
                if self.counters.overflow_isolate > 0 {
                    self.counters.overflow_isolate -= 1;
                } else if self.counters.valid_isolate > 0 {
                    self.counters.overflow_embedding = 0;
                    while let Some(entry) = self.stack.pop() {
                        if entry.isolate {
                            break;
                        }
                    }
                    self.counters.valid_isolate -= 1;
                }
                self.assign_current(i);
            }

            // X7
            BidiClass::PDF => {
                self.levels[i] = self.stack.last().level;
                if self.counters.overflow_isolate == 0 {
                    if self.counters.overflow_embedding > 0 {
                        self.counters.overflow_embedding -= 1;
                    } else if !self.stack.last().isolate && self.stack.depth() >= 2 {
                        self.stack.pop();
                    }
                }
            }

            // X8
            BidiClass::B => {
                self.levels[i] = self.paragraph_level;
                self.stack = DirectionalStatusStack::new(self.paragraph_level);
                self.counters = OverflowCounters::default();
            }

            // Removed by X9, level only matters for reinsertion
            BidiClass::BN => {
                self.levels[i] = self.stack.last().level;
            }

            // X6
            _ => self.assign_current(i),
        }
    }

    /// Give character `i` the level of the last stack entry and apply its override.
    fn assign_current(&mut self, i: usize) {
        let last = self.stack.last();
        self.levels[i] = last.level;
        match last.override_status {
            OverrideStatus::ForceLtr => self.classes[i] = BidiClass::L,
            OverrideStatus::ForceRtl => self.classes[i] = BidiClass::R,
            OverrideStatus::Neutral => {}
        }
    }

    fn next_level(&self, is_rtl: bool) -> Option<Level> {
        let current = self.stack.last().level;
        if is_rtl { current.next_rtl() } else { current.next_ltr() }
    }

    fn push_embedding(&mut self, is_rtl: bool, override_status: OverrideStatus) {
        match self.next_level(is_rtl) {
            Some(level)
                if self.counters.overflow_isolate == 0 && self.counters.overflow_embedding == 0 =>
            {
                self.stack.push(DirectionalStatus { level, override_status, isolate: false });
            }
            _ => {
                if self.counters.overflow_isolate == 0 {
                    self.counters.overflow_embedding += 1;
                }
            }
        }
    }

    fn push_isolate(&mut self, is_rtl: bool) {
        match self.next_level(is_rtl) {
            Some(level)
                if self.counters.overflow_isolate == 0 && self.counters.overflow_embedding == 0 =>
            {
                self.counters.valid_isolate += 1;
                self.stack.push(DirectionalStatus {
                    level,
                    override_status: OverrideStatus::Neutral,
                    isolate: true,
                });
            }
            _ => self.counters.overflow_isolate += 1,
        }
    }

    /// X5c: P2/P3 applied to the text between the FSI and its matching PDI.
    fn fsi_direction(&self, i: usize) -> Option<Direction> {
        let end = self.isolates.matching_pdi(i).unwrap_or(self.original.len());
        first_strong(&self.original[i + 1..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BidiClass::*;

    fn explicit(classes: &[BidiClass], level: u8) -> ExplicitResult {
        let index = IsolateIndex::build(classes);
        resolve_explicit(classes, &index, Level(level))
    }

    fn numbers(levels: &[Level]) -> Vec<u8> {
        levels.iter().map(|l| l.0).collect()
    }

    #[test]
    fn test_plain_text_keeps_paragraph_level() {
        let result = explicit(&[L, R, EN], 1);
        assert_eq!(numbers(&result.levels), vec![1, 1, 1]);
        assert_eq!(result.classes, vec![L, R, EN]);
    }

    #[test]
    fn test_embeddings() {
        let result = explicit(&[L, RLE, L, LRE, L, PDF, L, PDF, L], 0);
        assert_eq!(numbers(&result.levels), vec![0, 0, 1, 1, 2, 2, 1, 1, 0]);
    }

    #[test]
    fn test_override_rewrites_types() {
        let result = explicit(&[RLO, L, EN, PDF, L], 0);
        assert_eq!(result.classes, vec![RLO, R, R, PDF, L]);
        let result = explicit(&[LRO, R, AL, PDF], 1);
        assert_eq!(result.classes, vec![LRO, L, L, PDF]);
        assert_eq!(numbers(&result.levels), vec![1, 2, 2, 2]);
    }

    #[test]
    fn test_isolates_take_outer_level() {
        let result = explicit(&[L, RLI, L, PDI, L], 0);
        assert_eq!(numbers(&result.levels), vec![0, 0, 1, 0, 0]);
        assert_eq!(result.counters, OverflowCounters::default());
    }

    #[test]
    fn test_isolate_under_override() {
        let result = explicit(&[RLO, LRI, L, PDI, PDF], 0);
        assert_eq!(result.classes, vec![RLO, R, L, R, PDF]);
        assert_eq!(numbers(&result.levels), vec![0, 1, 2, 1, 1]);
    }

    #[test]
    fn test_fsi_direction() {
        let result = explicit(&[FSI, ON, R, PDI], 0);
        assert_eq!(numbers(&result.levels), vec![0, 1, 1, 0]);
        let result = explicit(&[FSI, RLI, R, PDI, L, PDI], 0);
        assert_eq!(numbers(&result.levels), vec![0, 2, 3, 2, 2, 0]);
        // no strong type inside: LTR
        let result = explicit(&[FSI, EN, PDI, R], 1);
        assert_eq!(numbers(&result.levels), vec![1, 2, 1, 1]);
    }

    #[test]
    fn test_pdi_closes_embeddings() {
        let result = explicit(&[RLI, LRE, L, PDI, L], 0);
        assert_eq!(numbers(&result.levels), vec![0, 1, 2, 0, 0]);
    }

    #[test]
    fn test_pdf_does_not_close_isolate() {
        let result = explicit(&[RLI, PDF, R, PDI], 0);
        assert_eq!(numbers(&result.levels), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_unmatched_pdi_and_pdf() {
        let result = explicit(&[PDI, PDF, L], 1);
        assert_eq!(numbers(&result.levels), vec![1, 1, 1]);
        assert_eq!(result.counters, OverflowCounters::default());
    }

    #[test]
    fn test_embedding_overflow() {
        // 0 -> 1 -> 3 -> ... -> 125 takes 63 RLEs, the rest overflow
        let mut classes = vec![RLE; 70];
        classes.push(R);
        let result = explicit(&classes, 0);
        assert_eq!(result.counters.overflow_embedding, 7);
        assert_eq!(result.levels[70], Level(125));
    }

    #[test]
    fn test_isolate_overflow() {
        let classes = vec![LRI; 130];
        let result = explicit(&classes, 0);
        assert_eq!(result.counters.valid_isolate, 62);
        assert_eq!(result.counters.overflow_isolate, 68);
        assert_eq!(result.levels[61], Level(122));
        assert!(result.levels[62..].iter().all(|&l| l == Level(124)));
    }

    #[test]
    fn test_paragraph_separator_resets_stack() {
        let result = explicit(&[RLE, R, B, L], 0);
        assert_eq!(numbers(&result.levels), vec![0, 1, 0, 0]);
    }
}
