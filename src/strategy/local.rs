//! The on-device strategy: frequency analysis plus the local selector.

use async_trait::async_trait;
use tracing::debug;

use super::{PredictionInput, PredictionStrategy, StrategyError};
use crate::calculate::{analyze, request_rng, Selector, SelectorTuning};
use crate::models::PredictionResult;

/// Runs the offline engine. Never unavailable.
#[derive(Debug, Clone, Default)]
pub struct LocalStrategy {
    selector: Selector,
    seed: Option<u64>,
}

impl LocalStrategy {
    pub fn new(tuning: SelectorTuning, seed: Option<u64>) -> Self {
        Self {
            selector: Selector::new(tuning),
            seed,
        }
    }

    /// Default tuning with a fixed seed. Every call repeats the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SelectorTuning::default(), Some(seed))
    }

    /// Synchronous entry point for callers without a runtime.
    pub fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, StrategyError> {
        let profile = analyze(&input.history, input.rules.main_range());
        debug!(
            hits = profile.total_hits(),
            hot = ?profile.hot,
            "Analyzed draw history"
        );

        // One RNG per call keeps concurrent requests independent.
        let mut rng = request_rng(self.seed);
        let result = self
            .selector
            .generate(&input.rules, &profile, &input.request, &mut rng)?;
        Ok(result)
    }
}

#[async_trait]
impl PredictionStrategy for LocalStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn attempt(&self, input: &PredictionInput) -> Result<PredictionResult, StrategyError> {
        self.predict(input)
    }
}
