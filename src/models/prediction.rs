//! Prediction request and result types.

use serde::{Deserialize, Serialize};

use super::ConfidenceScore;

/// What the caller asks the selector for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub entry_count: u32,
    /// Numbers to force into every entry when structurally valid.
    #[serde(default)]
    pub lucky_numbers: Vec<u32>,
    /// Numbers that must never appear.
    #[serde(default)]
    pub unwanted_numbers: Vec<u32>,
    /// Entry size for system play; replaces `main_count` when set.
    #[serde(default)]
    pub system_number: Option<u32>,
}

impl PredictionRequest {
    pub fn new(entry_count: u32) -> Self {
        Self {
            entry_count,
            lucky_numbers: Vec::new(),
            unwanted_numbers: Vec::new(),
            system_number: None,
        }
    }

    pub fn with_lucky(mut self, numbers: Vec<u32>) -> Self {
        self.lucky_numbers = numbers;
        self
    }

    pub fn with_unwanted(mut self, numbers: Vec<u32>) -> Self {
        self.unwanted_numbers = numbers;
        self
    }

    pub fn with_system(mut self, size: u32) -> Self {
        self.system_number = Some(size);
        self
    }

    /// Numbers per entry: the system size if given, otherwise `main_count`.
    pub fn target_size(&self, main_count: u32) -> u32 {
        self.system_number.unwrap_or(main_count)
    }

    /// "System N" for system play above the standard size, else "Standard".
    pub fn system_label(&self, main_count: u32) -> String {
        match self.system_number {
            Some(n) if n > main_count => format!("System {}", n),
            _ => "Standard".to_string(),
        }
    }
}

/// Technique labels reported with every locally generated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodTag {
    FrequencyAnalysis,
    RandomizedSampling,
    ExclusionFiltering,
}

impl MethodTag {
    /// The fixed tag list for the local engine.
    pub const LOCAL: [MethodTag; 3] = [
        MethodTag::FrequencyAnalysis,
        MethodTag::RandomizedSampling,
        MethodTag::ExclusionFiltering,
    ];
}

impl std::fmt::Display for MethodTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodTag::FrequencyAnalysis => write!(f, "Frequency Analysis"),
            MethodTag::RandomizedSampling => write!(f, "Randomized Sampling"),
            MethodTag::ExclusionFiltering => write!(f, "Exclusion Filtering"),
        }
    }
}

/// Generated entries plus the narrative shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// One strictly ascending entry per requested line.
    pub entries: Vec<Vec<u32>>,
    /// One bonus number per entry, present only for games with a bonus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_numbers: Option<Vec<u32>>,
    pub narrative: String,
    pub method_tags: Vec<MethodTag>,
    pub confidence_score: ConfidenceScore,
    pub system_label: String,
    /// Eligible hot numbers worth a look.
    #[serde(default)]
    pub suggested_numbers: Vec<u32>,
}
