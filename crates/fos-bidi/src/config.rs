//! Paragraph resolution settings

use serde::{Deserialize, Serialize};

use crate::{BidiError, Level, Result};

/// Bidi resolution configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidiConfig {
    /// Paragraph level used when auto detection is off or finds no strong character
    pub paragraph_level: Level,
    /// Detect the paragraph level from the first strong character (P2/P3)
    pub auto_detect: bool,
    /// Apply NFC before classification
    pub normalize: bool,
}

impl Default for BidiConfig {
    fn default() -> Self {
        Self {
            paragraph_level: Level::LTR,
            auto_detect: false,
            normalize: true,
        }
    }
}

impl BidiConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph level (0 or 1)
    pub fn with_paragraph_level(mut self, level: u8) -> Result<Self> {
        self.paragraph_level = paragraph_level(level)?;
        Ok(self)
    }

    /// Enable or disable paragraph level detection
    pub fn auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect = enabled;
        self
    }

    /// Enable or disable NFC preprocessing
    pub fn normalize(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }
}

/// Validate a caller-supplied paragraph level.
pub(crate) fn paragraph_level(level: u8) -> Result<Level> {
    match level {
        0 => Ok(Level::LTR),
        1 => Ok(Level::RTL),
        _ => Err(BidiError::InvalidParagraphLevel(level)),
    }
}
