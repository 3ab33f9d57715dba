//! Paired brackets (BD14-BD16)

use crate::tables::{self, BracketKind};
use crate::BidiClass;

/// Maximum number of concurrently open brackets tracked by BD16
pub const MAX_PAIRING_DEPTH: usize = 63;

/// Bracket pair, as positions within an isolating run sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BracketPair {
    pub open: usize,
    pub close: usize,
}

/// BD16: find the bracket pairs of one isolating run sequence.
///
/// `indices` are the text positions of the sequence. Only characters whose
/// current type is ON take part. When more than [`MAX_PAIRING_DEPTH`]
/// brackets are open at once, pairing stops for the rest of the sequence
/// and the pairs found so far are kept.
///
/// Pairs are returned sorted by opening position.
pub fn locate_pairs(indices: &[usize], text: &[char], classes: &[BidiClass]) -> Vec<BracketPair> {
    let mut stack: Vec<(char, usize)> = Vec::with_capacity(MAX_PAIRING_DEPTH);
    let mut pairs = Vec::new();

    for (k, &i) in indices.iter().enumerate() {
        if classes[i] != BidiClass::ON {
            continue;
        }
        let c = text[i];
        let Some(bracket) = tables::bracket(c) else {
            continue;
        };
        let opening = bracket.opening;

        match bracket.kind {
            BracketKind::Open => {
                if stack.len() == MAX_PAIRING_DEPTH {
                    tracing::trace!("Bracket stack overflow at sequence position {}", k);
                    break;
                }
                stack.push((opening, k));
            }
            BracketKind::Close => {
                if let Some(depth) = stack.iter().rposition(|&(open, _)| open == opening) {
                    pairs.push(BracketPair { open: stack[depth].1, close: k });
                    stack.truncate(depth);
                }
            }
        }
    }

    pairs.sort_unstable();
    pairs
}
