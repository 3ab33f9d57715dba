//! Implicit levels (I1, I2) and whitespace level reset (L1)

use crate::sequence::IsolatingRunSequence;
use crate::{BidiClass, Level};

/// I1/I2: raise the levels of one isolating run sequence according to the
/// resolved character types.
pub fn resolve_implicit(
    sequence: &IsolatingRunSequence,
    classes: &[BidiClass],
    levels: &mut [Level],
) {
    for &i in &sequence.indices {
        levels[i] = levels[i].implicit(classes[i]);
    }
}

/// L1: reset segment separators, paragraph separators and the whitespace
/// before them or at the end of the line to the paragraph level.
///
/// `original` and `levels` cover exactly one line. Characters removed by X9
/// are treated as whitespace here so they never split a trailing run.
pub fn reset_whitespace(original: &[BidiClass], levels: &mut [Level], paragraph_level: Level) {
    let mut trailing = true;
    for (class, level) in original.iter().zip(levels.iter_mut()).rev() {
        match class {
            BidiClass::S | BidiClass::B => {
                *level = paragraph_level;
                trailing = true;
            }
            _ if trailing && class.is_l1_whitespace() => *level = paragraph_level,
            _ => trailing = false,
        }
    }
}
