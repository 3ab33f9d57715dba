//! Visual reordering (L2)

use crate::Level;

/// A run of text at a single embedding level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiRun {
    /// Start index in text
    pub start: usize,
    /// End index in text (exclusive)
    pub end: usize,
    /// Embedding level
    pub level: Level,
}

impl BidiRun {
    /// Number of characters in the run
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Group levels into maximal runs of equal level, in logical order.
pub fn runs(levels: &[Level]) -> Vec<BidiRun> {
    let mut runs = Vec::new();
    let Some(&first) = levels.first() else {
        return runs;
    };

    let mut start = 0;
    let mut level = first;
    for (i, &current) in levels.iter().enumerate().skip(1) {
        if current != level {
            runs.push(BidiRun { start, end: i, level });
            start = i;
            level = current;
        }
    }
    runs.push(BidiRun { start, end: levels.len(), level });

    runs
}

/// L2: reorder runs for visual display.
///
/// From the highest level down to the lowest odd level, every maximal
/// sequence of runs at that level or higher is reversed. Lower passes
/// would reverse the whole line an even number of times.
pub fn visual_runs(levels: &[Level]) -> Vec<BidiRun> {
    let mut runs = runs(levels);

    let (Some(max), Some(min)) = (
        runs.iter().map(|r| r.level.0).max(),
        runs.iter().map(|r| r.level.0).min(),
    ) else {
        return runs;
    };
    let lowest_odd = min | 1;

    for level in (lowest_odd..=max).rev() {
        let mut i = 0;
        while i < runs.len() {
            if runs[i].level.0 >= level {
                let start = i;
                while i < runs.len() && runs[i].level.0 >= level {
                    i += 1;
                }
                runs[start..i].reverse();
            }
            i += 1;
        }
    }

    runs
}

/// Visual order of the positions of `levels`, as logical indices.
pub fn visual_indices(levels: &[Level]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(levels.len());

    for run in visual_runs(levels) {
        if run.level.is_rtl() {
            // RTL run: reverse order
            indices.extend((run.start..run.end).rev());
        } else {
            indices.extend(run.start..run.end);
        }
    }

    indices
}

/// L2 over levels that may contain invisible (X9-removed) positions.
///
/// With `ignore_invisible`, invisible positions are left out of the
/// permutation. Otherwise each one takes the level of the nearest visible
/// position before it (after it at the start of the line) and moves with
/// its neighbours.
pub fn visual_order(levels: &[Option<Level>], ignore_invisible: bool) -> Vec<usize> {
    if ignore_invisible {
        let (positions, visible): (Vec<usize>, Vec<Level>) = levels
            .iter()
            .enumerate()
            .filter_map(|(i, level)| level.map(|level| (i, level)))
            .unzip();
        return visual_indices(&visible)
            .into_iter()
            .map(|k| positions[k])
            .collect();
    }

    visual_indices(&fill_invisible(levels))
}

/// Give every invisible position the level of its nearest visible neighbour.
pub(crate) fn fill_invisible(levels: &[Option<Level>]) -> Vec<Level> {
    let leading = levels.iter().flatten().next().copied().unwrap_or_default();
    let mut previous = leading;
    levels
        .iter()
        .map(|level| {
            if let Some(level) = level {
                previous = *level;
            }
            previous
        })
        .collect()
}
