//! Prediction strategies and the fallback chain.
//!
//! A prediction request is offered to an ordered list of strategies. Each one
//! either serves it or reports itself unavailable, in which case the next is
//! tried. The local engine sits at the end of the chain and always answers,
//! unless the request's own filters make it unsatisfiable.

pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::calculate::SelectionError;
use crate::models::{GameRules, PredictionRequest, PredictionResult};

pub use local::LocalStrategy;

/// Errors that can occur while running a strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Strategy unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Everything a strategy needs to answer one request.
#[derive(Debug, Clone)]
pub struct PredictionInput {
    pub rules: GameRules,
    /// Free-form draw history, possibly empty.
    pub history: String,
    pub request: PredictionRequest,
}

/// A result plus the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Attempted {
    pub strategy: &'static str,
    pub result: PredictionResult,
}

/// A way of producing predictions.
#[async_trait]
pub trait PredictionStrategy: Send + Sync {
    /// Strategy name for logging.
    fn name(&self) -> &'static str;

    /// Try to serve the request.
    async fn attempt(&self, input: &PredictionInput) -> Result<PredictionResult, StrategyError>;
}

/// Ordered strategies, tried first to last.
#[derive(Clone, Default)]
pub struct FallbackChain {
    strategies: Vec<Arc<dyn PredictionStrategy>>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: Arc<dyn PredictionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the chain.
    ///
    /// Unavailable strategies are skipped. Selection errors stop the chain:
    /// they come from the request's own filters and would fail again.
    pub async fn run(&self, input: &PredictionInput) -> Result<Attempted, StrategyError> {
        let mut last_error = StrategyError::Unavailable("no strategies configured".to_string());

        for strategy in &self.strategies {
            match strategy.attempt(input).await {
                Ok(result) => {
                    info!(strategy = strategy.name(), "Prediction served");
                    return Ok(Attempted {
                        strategy: strategy.name(),
                        result,
                    });
                }
                Err(StrategyError::Unavailable(reason)) => {
                    warn!("{} unavailable, falling through: {}", strategy.name(), reason);
                    last_error = StrategyError::Unavailable(reason);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("strategies", &self.names())
            .finish()
    }
}

/// Strategy stub for tests.
#[cfg(test)]
pub struct MockStrategy {
    name: &'static str,
    outcome: Option<PredictionResult>,
}

#[cfg(test)]
impl MockStrategy {
    pub fn serving(name: &'static str, result: PredictionResult) -> Self {
        Self {
            name,
            outcome: Some(result),
        }
    }

    pub fn unavailable(name: &'static str) -> Self {
        Self {
            name,
            outcome: None,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl PredictionStrategy for MockStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self, _input: &PredictionInput) -> Result<PredictionResult, StrategyError> {
        self.outcome
            .clone()
            .ok_or_else(|| StrategyError::Unavailable(format!("{} offline", self.name)))
    }
}
