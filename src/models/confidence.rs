//! Cosmetic confidence score attached to generated results.

use serde::{Deserialize, Serialize};

/// Display-only "confidence" percentage.
///
/// This is NOT a statistical confidence interval or a probability of winning.
/// Lottery draws are independent and uniformly random; the value is drawn at
/// random from a fixed band purely for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceScore(u8);

impl ConfidenceScore {
    pub const DEFAULT_MIN: u8 = 75;
    pub const DEFAULT_MAX: u8 = 92;

    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
