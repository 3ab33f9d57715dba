//! Level runs and isolating run sequences (X9, X10, BD7, BD13)

use std::cmp::max;
use std::ops::Range;

use crate::isolate::IsolateIndex;
use crate::{BidiClass, Direction, Level};

/// Maximal run of characters at one level (BD7).
///
/// `start..end` indexes the X9-filtered position list, not the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRun {
    pub start: usize,
    pub end: usize,
    pub level: Level,
}

impl LevelRun {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Level runs chained across isolate initiator/PDI pairs (BD13)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatingRunSequence {
    pub runs: Vec<LevelRun>,
    /// Text positions of every character in the sequence, in logical order
    pub indices: Vec<usize>,
    /// Embedding level shared by all runs
    pub level: Level,
    /// Start-of-sequence type
    pub sos: Direction,
    /// End-of-sequence type
    pub eos: Direction,
}

impl IsolatingRunSequence {
    /// Embedding direction of the sequence
    pub fn direction(&self) -> Direction {
        self.level.direction()
    }
}

/// X9: text positions that take part in implicit processing.
pub fn visible_positions(original: &[BidiClass]) -> Vec<usize> {
    original
        .iter()
        .enumerate()
        .filter(|(_, class)| !class.is_removed_by_x9())
        .map(|(i, _)| i)
        .collect()
}

/// BD7: split the filtered positions into maximal same-level runs.
pub fn level_runs(visible: &[usize], levels: &[Level]) -> Vec<LevelRun> {
    let mut runs = Vec::new();
    let Some(&first) = visible.first() else {
        return runs;
    };

    let mut start = 0;
    let mut level = levels[first];
    for (k, &pos) in visible.iter().enumerate().skip(1) {
        if levels[pos] != level {
            runs.push(LevelRun { start, end: k, level });
            start = k;
            level = levels[pos];
        }
    }
    runs.push(LevelRun { start, end: visible.len(), level });

    runs
}

/// BD13 and X10: chain level runs into isolating run sequences and
/// determine their sos/eos types.
///
/// Sequences are returned in order of their first character.
pub fn isolating_run_sequences(
    original: &[BidiClass],
    levels: &[Level],
    isolates: &IsolateIndex,
    paragraph_level: Level,
) -> Vec<IsolatingRunSequence> {
    let visible = visible_positions(original);
    let runs = level_runs(&visible, levels);
    let mut sequences = Vec::with_capacity(runs.len());

    // Level of the filtered character at `k`, paragraph level outside the text.
    let char_level = |k: Option<usize>| -> Level {
        k.and_then(|k| visible.get(k))
            .map(|&pos| levels[pos])
            .unwrap_or(paragraph_level)
    };

    // Index of the run holding filtered position `k`.
    let run_at = |k: usize| runs.partition_point(|run| run.end <= k);

    for run in &runs {
        let first = visible[run.start];
        if original[first] == BidiClass::PDI && isolates.matching_initiator(first).is_some() {
            // Continuation, appended when its initiator's sequence is built.
            continue;
        }

        let mut chain = vec![*run];
        let mut current = *run;
        loop {
            let last = visible[current.end - 1];
            if !original[last].is_isolate_initiator() {
                break;
            }
            let Some(pdi) = isolates.matching_pdi(last) else {
                break;
            };
            let Ok(k) = visible.binary_search(&pdi) else {
                break;
            };
            current = runs[run_at(k)];
            chain.push(current);
        }

        let indices: Vec<usize> = chain
            .iter()
            .flat_map(|run| visible[run.range()].iter().copied())
            .collect();
        let level = run.level;

        let first_k = chain[0].start;
        let last_k = current.end - 1;
        let prev_level = char_level(first_k.checked_sub(1));
        let next_level = if original[visible[last_k]].is_isolate_initiator() {
            paragraph_level
        } else {
            char_level(Some(last_k + 1))
        };

        sequences.push(IsolatingRunSequence {
            runs: chain,
            indices,
            level,
            sos: max(prev_level, level).direction(),
            eos: max(level, next_level).direction(),
        });
    }

    debug_assert_eq!(
        sequences.iter().map(|s| s.indices.len()).sum::<usize>(),
        visible.len()
    );

    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use BidiClass::*;

    fn levels(values: &[u8]) -> Vec<Level> {
        values.iter().map(|&v| Level(v)).collect()
    }

    #[test]
    fn test_level_runs() {
        let visible: Vec<usize> = (0..8).collect();
        let runs = level_runs(&visible, &levels(&[0, 0, 0, 1, 1, 2, 0, 0]));
        let ranges: Vec<_> = runs.iter().map(|r| r.range()).collect();
        assert_eq!(ranges, vec![0..3, 3..5, 5..6, 6..8]);
    }

    #[test]
    fn test_level_runs_skip_removed() {
        // L RLE L PDF L at levels 0 0 1 1 0: the controls vanish
        let original = [L, RLE, L, PDF, L];
        let visible = visible_positions(&original);
        assert_eq!(visible, vec![0, 2, 4]);
        let runs = level_runs(&visible, &levels(&[0, 0, 1, 1, 0]));
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1], LevelRun { start: 1, end: 2, level: Level(1) });
    }

    #[test]
    fn test_isolating_run_sequences() {
        // Example 3 of BD13
        //              0  1    2   3    4  5  6  7    8   9   10
        let classes = [L, RLI, AL, LRI, L, R, L, PDI, AL, PDI, L];
        let lv = levels(&[0, 0, 1, 1, 2, 3, 2, 1, 1, 0, 0]);
        let index = IsolateIndex::build(&classes);

        let sequences = isolating_run_sequences(&classes, &lv, &index, Level(0));
        let indices: Vec<Vec<usize>> = sequences.iter().map(|s| s.indices.clone()).collect();
        assert_eq!(
            indices,
            vec![vec![0, 1, 9, 10], vec![2, 3, 7, 8], vec![4], vec![5], vec![6]]
        );
    }

    #[test]
    fn test_sos_eos() {
        // L RLE R PDF L, paragraph 0: the R run sits at level 1
        let classes = [L, RLE, R, PDF, L];
        let lv = levels(&[0, 0, 1, 1, 0]);
        let index = IsolateIndex::build(&classes);
        let sequences = isolating_run_sequences(&classes, &lv, &index, Level(0));
        assert_eq!(sequences.len(), 3);
        assert_eq!(sequences[0].sos, Direction::Ltr);
        assert_eq!(sequences[1].sos, Direction::Rtl);
        assert_eq!(sequences[1].eos, Direction::Rtl);
        assert_eq!(sequences[2].eos, Direction::Ltr);
    }

    #[test]
    fn test_unmatched_initiator_eos_uses_paragraph_level() {
        // R RLI L, paragraph 0: first sequence ends with an initiator
        let classes = [R, RLI, L];
        let lv = levels(&[0, 0, 1]);
        let index = IsolateIndex::build(&classes);
        let sequences = isolating_run_sequences(&classes, &lv, &index, Level(0));
        assert_eq!(sequences[0].indices, vec![0, 1]);
        assert_eq!(sequences[0].eos, Direction::Ltr);
        assert_eq!(sequences[1].sos, Direction::Rtl);
    }

    #[test]
    fn test_empty() {
        let index = IsolateIndex::build(&[]);
        assert!(isolating_run_sequences(&[], &[], &index, Level(1)).is_empty());
        assert!(level_runs(&[], &[]).is_empty());
    }
}
