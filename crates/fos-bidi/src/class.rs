//! Bidirectional character types
//!
//! The 23 Bidi_Class values of UAX #9 plus the predicates the resolver
//! stages use to group them.

use serde::{Deserialize, Serialize};

/// Bidirectional character type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidiClass {
    // Strong types
    /// Left-to-Right
    L,
    /// Right-to-Left
    R,
    /// Arabic Letter
    AL,

    // Weak types
    /// European Number
    EN,
    /// European Number Separator
    ES,
    /// European Number Terminator
    ET,
    /// Arabic Number
    AN,
    /// Common Number Separator
    CS,
    /// Nonspacing Mark
    NSM,
    /// Boundary Neutral
    BN,

    // Neutral types
    /// Paragraph Separator
    B,
    /// Segment Separator
    S,
    /// Whitespace
    WS,
    /// Other Neutrals
    ON,

    // Explicit formatting
    /// Left-to-Right Embedding
    LRE,
    /// Left-to-Right Override
    LRO,
    /// Right-to-Left Embedding
    RLE,
    /// Right-to-Left Override
    RLO,
    /// Pop Directional Format
    PDF,
    /// Left-to-Right Isolate
    LRI,
    /// Right-to-Left Isolate
    RLI,
    /// First Strong Isolate
    FSI,
    /// Pop Directional Isolate
    PDI,
}

impl BidiClass {
    /// Get bidi class for a character (Unicode 16 data)
    pub fn of(c: char) -> Self {
        unicode_bidi::bidi_class(c).into()
    }

    /// Check if this is a strong type
    pub fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    /// Check if this is an explicit formatting character
    pub fn is_explicit(self) -> bool {
        matches!(self,
            BidiClass::LRE | BidiClass::RLE | BidiClass::LRO | BidiClass::RLO |
            BidiClass::PDF | BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI
        )
    }

    /// LRI, RLI or FSI
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
    }

    /// Isolate initiators and PDI
    pub fn is_isolate_control(self) -> bool {
        self.is_isolate_initiator() || self == BidiClass::PDI
    }

    /// Characters that rule X9 strips before implicit processing.
    pub fn is_removed_by_x9(self) -> bool {
        matches!(self,
            BidiClass::LRE | BidiClass::RLE | BidiClass::LRO | BidiClass::RLO |
            BidiClass::PDF | BidiClass::BN
        )
    }

    /// Neutral or isolate formatting type ("NI" in rules N1 and N2)
    pub fn is_neutral_or_isolate(self) -> bool {
        matches!(self, BidiClass::B | BidiClass::S | BidiClass::WS | BidiClass::ON)
            || self.is_isolate_control()
    }

    /// Characters that join a trailing whitespace run under rule L1.
    ///
    /// X9-removed characters are included so they never split the run.
    pub fn is_l1_whitespace(self) -> bool {
        matches!(self, BidiClass::WS | BidiClass::BN) || self.is_explicit()
    }

    /// Strong direction as seen by rules N0 and N1, where numbers count as R.
    pub fn strong_direction(self) -> Option<BidiClass> {
        match self {
            BidiClass::L => Some(BidiClass::L),
            BidiClass::R | BidiClass::AL | BidiClass::EN | BidiClass::AN => Some(BidiClass::R),
            _ => None,
        }
    }

    /// Check if RTL type
    pub fn is_rtl(self) -> bool {
        matches!(self, BidiClass::R | BidiClass::AL | BidiClass::RLE | BidiClass::RLO | BidiClass::RLI)
    }
}

impl From<unicode_bidi::BidiClass> for BidiClass {
    fn from(class: unicode_bidi::BidiClass) -> Self {
        use unicode_bidi::BidiClass as U;
        match class {
            U::L => BidiClass::L,
            U::R => BidiClass::R,
            U::AL => BidiClass::AL,
            U::EN => BidiClass::EN,
            U::ES => BidiClass::ES,
            U::ET => BidiClass::ET,
            U::AN => BidiClass::AN,
            U::CS => BidiClass::CS,
            U::NSM => BidiClass::NSM,
            U::BN => BidiClass::BN,
            U::B => BidiClass::B,
            U::S => BidiClass::S,
            U::WS => BidiClass::WS,
            U::ON => BidiClass::ON,
            U::LRE => BidiClass::LRE,
            U::LRO => BidiClass::LRO,
            U::RLE => BidiClass::RLE,
            U::RLO => BidiClass::RLO,
            U::PDF => BidiClass::PDF,
            U::LRI => BidiClass::LRI,
            U::RLI => BidiClass::RLI,
            U::FSI => BidiClass::FSI,
            U::PDI => BidiClass::PDI,
        }
    }
}
