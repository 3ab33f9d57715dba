//! Matching PDI index (BD9)

use crate::BidiClass;

/// Isolate initiator ↔ matching PDI positions for one paragraph.
#[derive(Debug, Clone, Default)]
pub struct IsolateIndex {
    pdi: Vec<Option<usize>>,
    initiator: Vec<Option<usize>>,
}

impl IsolateIndex {
    /// Pair every isolate initiator with its matching PDI in a single pass.
    ///
    /// `classes` must be the original classes of the paragraph. A paragraph
    /// separator closes every isolate still open.
    pub fn build(classes: &[BidiClass]) -> Self {
        let mut pdi = vec![None; classes.len()];
        let mut initiator = vec![None; classes.len()];
        let mut open: Vec<usize> = Vec::new();

        for (i, &class) in classes.iter().enumerate() {
            match class {
                BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => open.push(i),
                BidiClass::PDI => {
                    if let Some(start) = open.pop() {
                        pdi[start] = Some(i);
                        initiator[i] = Some(start);
                    }
                }
                BidiClass::B => open.clear(),
                _ => {}
            }
        }

        Self { pdi, initiator }
    }

    /// Matching PDI of the isolate initiator at `index`
    pub fn matching_pdi(&self, index: usize) -> Option<usize> {
        self.pdi.get(index).copied().flatten()
    }

    /// Isolate initiator matched by the PDI at `index`
    pub fn matching_initiator(&self, index: usize) -> Option<usize> {
        self.initiator.get(index).copied().flatten()
    }
}
