//! First-strong direction detection (P2/P3)
//!
//! Shared by paragraph level detection and FSI resolution (X5c), which
//! applies the same scan to the span between the FSI and its matching PDI.

use crate::{BidiClass, Direction};

/// Find the direction of the first strong character in `classes`,
/// skipping characters between an isolate initiator and its matching PDI.
///
/// An isolate initiator without a matching PDI hides everything after it.
pub fn first_strong(classes: &[BidiClass]) -> Option<Direction> {
    let mut isolate_count = 0usize;

    for &class in classes {
        match class {
            BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => {
                isolate_count += 1;
            }
            BidiClass::PDI => {
                isolate_count = isolate_count.saturating_sub(1);
            }
            BidiClass::B => break,
            class if isolate_count == 0 && class.is_strong() => {
                return Some(if class.is_rtl() { Direction::Rtl } else { Direction::Ltr });
            }
            _ => {}
        }
    }

    None
}
