//! Resolving weak types (W1-W7)
//!
//! Each rule runs to completion over the whole isolating run sequence
//! before the next one starts. Rules that look back for the nearest strong
//! type carry it forward in a cursor instead of rescanning.

use crate::sequence::IsolatingRunSequence;
use crate::BidiClass::{self, *};

/// Apply W1-W7 to one isolating run sequence.
///
/// `original` holds the classifier output; `classes` is the working type
/// array of the whole paragraph and is rewritten in place.
pub fn resolve_weak(
    sequence: &IsolatingRunSequence,
    original: &[BidiClass],
    classes: &mut [BidiClass],
) {
    let indices = &sequence.indices;
    let sos = sequence.sos.class();
    let eos = sequence.eos.class();

    // W1: NSM takes the type of the previous character, ON after an isolate control
    let mut prev = sos;
    for &i in indices {
        if classes[i] == NSM {
            classes[i] = prev;
        }
        prev = if original[i].is_isolate_control() { ON } else { classes[i] };
    }

    // W2: EN after AL becomes AN
    let mut last_strong = sos;
    for &i in indices {
        match classes[i] {
            L | R | AL => last_strong = classes[i],
            EN if last_strong == AL => classes[i] = AN,
            _ => {}
        }
    }

    // W3
    for &i in indices {
        if classes[i] == AL {
            classes[i] = R;
        }
    }

    // W4: a single separator between two numbers of the same kind
    for k in 1..indices.len().saturating_sub(1) {
        let prev = classes[indices[k - 1]];
        let next = classes[indices[k + 1]];
        let curr = &mut classes[indices[k]];
        match (prev, *curr, next) {
            (EN, ES | CS, EN) => *curr = EN,
            (AN, CS, AN) => *curr = AN,
            _ => {}
        }
    }

    // W5: terminators next to a European number
    let mut k = 0;
    while k < indices.len() {
        if classes[indices[k]] != ET {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && classes[indices[k]] == ET {
            k += 1;
        }
        let before = if start == 0 { sos } else { classes[indices[start - 1]] };
        let after = if k == indices.len() { eos } else { classes[indices[k]] };
        if before == EN || after == EN {
            for &i in &indices[start..k] {
                classes[i] = EN;
            }
        }
    }

    // W6
    for &i in indices {
        if matches!(classes[i], ES | ET | CS) {
            classes[i] = ON;
        }
    }

    // W7: EN after L becomes L
    let mut last_strong = sos;
    for &i in indices {
        match classes[i] {
            L | R => last_strong = classes[i],
            EN if last_strong == L => classes[i] = L,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::LevelRun;
    use crate::{Direction, Level};

    fn sequence(len: usize, level: u8, sos: Direction, eos: Direction) -> IsolatingRunSequence {
        IsolatingRunSequence {
            runs: vec![LevelRun { start: 0, end: len, level: Level(level) }],
            indices: (0..len).collect(),
            level: Level(level),
            sos,
            eos,
        }
    }

    fn weak(classes: &[BidiClass], sos: Direction) -> Vec<BidiClass> {
        let seq = sequence(classes.len(), 0, sos, Direction::Ltr);
        let mut working = classes.to_vec();
        resolve_weak(&seq, classes, &mut working);
        working
    }

    #[test]
    fn test_w1_nsm() {
        assert_eq!(weak(&[AL, NSM, NSM], Direction::Ltr), vec![R, R, R]);
        assert_eq!(weak(&[NSM], Direction::Rtl), vec![R]);
        assert_eq!(weak(&[LRI, NSM], Direction::Ltr), vec![LRI, ON]);
        assert_eq!(weak(&[PDI, NSM], Direction::Ltr), vec![PDI, ON]);
    }

    #[test]
    fn test_w2_arabic_numbers() {
        assert_eq!(weak(&[AL, EN], Direction::Ltr), vec![R, AN]);
        assert_eq!(weak(&[AL, ON, EN], Direction::Ltr), vec![R, ON, AN]);
        assert_eq!(weak(&[ON, EN], Direction::Rtl), vec![ON, EN]);
        assert_eq!(weak(&[R, ON, EN], Direction::Ltr), vec![R, ON, EN]);
    }

    #[test]
    fn test_w4_separators() {
        assert_eq!(weak(&[EN, ES, EN], Direction::Rtl), vec![EN, EN, EN]);
        assert_eq!(weak(&[EN, CS, EN], Direction::Rtl), vec![EN, EN, EN]);
        assert_eq!(weak(&[AN, CS, AN], Direction::Rtl), vec![AN, AN, AN]);
        assert_eq!(weak(&[AN, CS, EN], Direction::Rtl), vec![AN, ON, EN]);
        assert_eq!(weak(&[EN, CS, CS, EN], Direction::Rtl), vec![EN, ON, ON, EN]);
    }

    #[test]
    fn test_w5_terminators() {
        assert_eq!(weak(&[ET, ET, EN], Direction::Rtl), vec![EN, EN, EN]);
        assert_eq!(weak(&[EN, ET, ET], Direction::Rtl), vec![EN, EN, EN]);
        assert_eq!(weak(&[AN, ET, EN], Direction::Rtl), vec![AN, EN, EN]);
        // AL turns the number into AN first, so the terminator stays
        assert_eq!(weak(&[AL, ET, EN], Direction::Rtl), vec![R, ON, AN]);
    }

    #[test]
    fn test_w6_leftovers() {
        assert_eq!(weak(&[AN, ET], Direction::Rtl), vec![AN, ON]);
        assert_eq!(weak(&[L, ES, EN], Direction::Rtl), vec![L, ON, L]);
        assert_eq!(weak(&[EN, CS, AN], Direction::Rtl), vec![EN, ON, AN]);
        assert_eq!(weak(&[ET, AN], Direction::Rtl), vec![ON, AN]);
    }

    #[test]
    fn test_w7_european_numbers_after_l() {
        assert_eq!(weak(&[L, ON, EN], Direction::Rtl), vec![L, ON, L]);
        assert_eq!(weak(&[R, ON, EN], Direction::Ltr), vec![R, ON, EN]);
        assert_eq!(weak(&[EN], Direction::Ltr), vec![L]);
    }

    #[test]
    fn test_sequence_spanning_runs() {
        // positions 1..3 belong to another sequence and stay untouched
        let seq = IsolatingRunSequence {
            runs: vec![
                LevelRun { start: 0, end: 1, level: Level(0) },
                LevelRun { start: 3, end: 4, level: Level(0) },
            ],
            indices: vec![0, 3],
            level: Level(0),
            sos: Direction::Ltr,
            eos: Direction::Ltr,
        };
        let original = [AL, EN, NSM, EN];
        let mut classes = original.to_vec();
        resolve_weak(&seq, &original, &mut classes);
        assert_eq!(classes, vec![R, EN, NSM, AN]);
    }
}
