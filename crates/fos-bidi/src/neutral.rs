//! Resolving neutral and isolate formatting types (N0-N2)

use crate::brackets::locate_pairs;
use crate::sequence::IsolatingRunSequence;
use crate::BidiClass;

/// Apply N0, then N1 and N2, to one isolating run sequence.
pub fn resolve_neutral(
    sequence: &IsolatingRunSequence,
    original: &[BidiClass],
    text: &[char],
    classes: &mut [BidiClass],
) {
    resolve_brackets(sequence, original, text, classes);
    resolve_neutral_runs(sequence, classes);
}

/// N0: give paired brackets a strong direction.
///
/// Pairs are handled in order of their opening bracket; earlier decisions
/// are visible to later pairs. NSMs that followed a bracket before W1 take
/// the bracket's new type.
fn resolve_brackets(
    sequence: &IsolatingRunSequence,
    original: &[BidiClass],
    text: &[char],
    classes: &mut [BidiClass],
) {
    let indices = &sequence.indices;
    let pairs = locate_pairs(indices, text, classes);
    if pairs.is_empty() {
        return;
    }

    let embedding = sequence.direction().class();
    let sos = sequence.sos.class();

    // Everything before the current opener is final, so the preceding
    // strong type can be carried forward across pairs.
    let mut cursor = 0;
    let mut preceding = sos;

    for pair in pairs {
        while cursor < pair.open {
            if let Some(strong) = classes[indices[cursor]].strong_direction() {
                preceding = strong;
            }
            cursor += 1;
        }

        let mut found_embedding = false;
        let mut found_opposite = false;
        for &i in &indices[pair.open + 1..pair.close] {
            match classes[i].strong_direction() {
                Some(strong) if strong == embedding => {
                    found_embedding = true;
                    break;
                }
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let resolved = if found_embedding {
            embedding
        } else if found_opposite {
            // N0 c: context decides between the opposite and embedding direction
            if preceding != embedding { preceding } else { embedding }
        } else {
            continue;
        };

        for k in [pair.open, pair.close] {
            classes[indices[k]] = resolved;
            for &i in indices[k + 1..].iter().take_while(|&&i| original[i] == BidiClass::NSM) {
                classes[i] = resolved;
            }
        }
    }
}

/// N1 and N2: runs of neutrals take the direction of matching surrounding
/// strong text, or the embedding direction otherwise. Numbers count as R.
fn resolve_neutral_runs(sequence: &IsolatingRunSequence, classes: &mut [BidiClass]) {
    let indices = &sequence.indices;
    let embedding = sequence.direction().class();

    let mut preceding = sequence.sos.class();
    let mut k = 0;
    while k < indices.len() {
        let class = classes[indices[k]];
        if !class.is_neutral_or_isolate() {
            if let Some(strong) = class.strong_direction() {
                preceding = strong;
            }
            k += 1;
            continue;
        }

        let start = k;
        while k < indices.len() && classes[indices[k]].is_neutral_or_isolate() {
            k += 1;
        }
        let following = match indices.get(k) {
            Some(&i) => classes[i].strong_direction().unwrap_or(embedding),
            None => sequence.eos.class(),
        };

        let resolved = if preceding == following { preceding } else { embedding };
        for &i in &indices[start..k] {
            classes[i] = resolved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::LevelRun;
    use crate::weak::resolve_weak;
    use crate::{Direction, Level};
    use BidiClass::*;

    /// Test notation: uppercase is R, lowercase is L, digits are EN,
    /// `^` is NSM, space is WS and everything else keeps its own class.
    fn classify(pattern: &str) -> (Vec<char>, Vec<BidiClass>) {
        let text: Vec<char> = pattern.chars().collect();
        let classes = text
            .iter()
            .map(|&c| match c {
                'A'..='Z' => R,
                'a'..='z' => L,
                '0'..='9' => EN,
                '^' => NSM,
                ' ' => WS,
                _ => BidiClass::of(c),
            })
            .collect();
        (text, classes)
    }

    fn resolve(pattern: &str, level: u8) -> String {
        let (text, original) = classify(pattern);
        let level = Level(level);
        let sequence = IsolatingRunSequence {
            runs: vec![LevelRun { start: 0, end: text.len(), level }],
            indices: (0..text.len()).collect(),
            level,
            sos: level.direction(),
            eos: level.direction(),
        };
        let mut classes = original.clone();
        resolve_weak(&sequence, &original, &mut classes);
        resolve_neutral(&sequence, &original, &text, &mut classes);
        classes
            .iter()
            .map(|class| match class {
                L => 'L',
                R => 'R',
                EN => 'E',
                AN => 'A',
                _ => '?',
            })
            .collect()
    }

    #[test]
    fn test_n0_nested_pairs() {
        assert_eq!(resolve("AB(CD[&ef]!)gh", 1), "RRRRRRRLLRRRLL");
    }

    #[test]
    fn test_n0_embedding_direction_inside() {
        assert_eq!(resolve("A(b)C", 0), "RLLLR");
        assert_eq!(resolve("a(B)c", 1), "LRRRL");
    }

    #[test]
    fn test_n0_opposite_direction_context() {
        // opposite direction inside, decided by the preceding strong type
        assert_eq!(resolve("a(B)c", 0), "LLRLL");
        assert_eq!(resolve("A(B)c", 0), "RRRRL");
        // sos counts as preceding context
        assert_eq!(resolve("(B)c", 0), "LRLL");
    }

    #[test]
    fn test_n0_numbers_count_as_rtl() {
        assert_eq!(resolve("A(1)c", 0), "RRERL");
    }

    #[test]
    fn test_n0_no_strong_inside() {
        assert_eq!(resolve("a(!)b", 0), "LLLLL");
        assert_eq!(resolve("A(!)b", 0), "RLLLL");
    }

    #[test]
    fn test_n0_nsm_after_brackets() {
        assert_eq!(resolve("A(B)^", 0), "RRRRR");
        assert_eq!(resolve("A(B)^^", 0), "RRRRRR");
        assert_eq!(resolve("A(^B)", 0), "RRRRR");
    }

    #[test]
    fn test_unpaired_brackets_are_neutral() {
        assert_eq!(resolve("a(B]c", 0), "LLRLL");
    }

    #[test]
    fn test_n1_matching_neighbours() {
        assert_eq!(resolve("A !B", 0), "RRRR");
        assert_eq!(resolve("a !b", 1), "LLLL");
        assert_eq!(resolve("A 1", 0), "RRE");
    }

    #[test]
    fn test_n2_embedding_direction() {
        assert_eq!(resolve("a B", 0), "LLR");
        assert_eq!(resolve("a B", 1), "LRR");
        // sos and eos bound the sequence
        assert_eq!(resolve(" A ", 1), "RRR");
        assert_eq!(resolve(" a ", 1), "RLR");
    }
}
