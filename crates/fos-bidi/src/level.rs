//! Embedding levels

use serde::{Deserialize, Serialize};

use crate::BidiClass;

/// Maximum explicit embedding depth (BD2)
pub const MAX_DEPTH: u8 = 125;

/// Highest level rules I1/I2 can produce (an L or number at level 125)
pub const MAX_IMPLICIT: u8 = MAX_DEPTH + 1;

/// Embedding level (0-125, even=LTR, odd=RTL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub u8);

impl Level {
    /// Maximum embedding level
    pub const MAX: u8 = MAX_DEPTH;

    /// LTR level 0
    pub const LTR: Level = Level(0);

    /// RTL level 1
    pub const RTL: Level = Level(1);

    /// Create new level
    pub fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX {
            Some(Level(level))
        } else {
            None
        }
    }

    /// Numeric value
    pub fn number(self) -> u8 {
        self.0
    }

    /// Check if LTR
    pub fn is_ltr(self) -> bool {
        self.0 % 2 == 0
    }

    /// Check if RTL
    pub fn is_rtl(self) -> bool {
        self.0 % 2 == 1
    }

    /// Direction of text at this level
    pub fn direction(self) -> Direction {
        if self.is_rtl() { Direction::Rtl } else { Direction::Ltr }
    }

    /// Get next higher LTR level
    pub fn next_ltr(self) -> Option<Self> {
        let next = (self.0 + 2) & !1;
        Self::new(next)
    }

    /// Get next higher RTL level
    pub fn next_rtl(self) -> Option<Self> {
        let next = (self.0 + 1) | 1;
        Self::new(next)
    }

    /// Rules I1 and I2: the level of a character of resolved type `class`
    /// sitting at this embedding level.
    pub(crate) fn implicit(self, class: BidiClass) -> Level {
        let raise = match (self.is_ltr(), class) {
            (true, BidiClass::R) => 1,
            (true, BidiClass::AN | BidiClass::EN) => 2,
            (false, BidiClass::L | BidiClass::AN | BidiClass::EN) => 1,
            _ => 0,
        };
        debug_assert!(self.0 + raise <= MAX_IMPLICIT);
        Level(self.0 + raise)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::LTR
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved text direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// The strong class standing for this direction (sos/eos, N1, N2)
    pub fn class(self) -> BidiClass {
        match self {
            Direction::Ltr => BidiClass::L,
            Direction::Rtl => BidiClass::R,
        }
    }

    /// Paragraph level for this direction (P3)
    pub fn level(self) -> Level {
        match self {
            Direction::Ltr => Level::LTR,
            Direction::Rtl => Level::RTL,
        }
    }
}
