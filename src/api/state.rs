use std::sync::Arc;

use crate::calculate::SelectorTuning;
use crate::models::GameRules;
use crate::strategy::{FallbackChain, LocalStrategy};

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<FallbackChain>,
    /// Rules for the custom game when a request brings none.
    pub custom_game: GameRules,
    /// Fixed seed for simulated draws; `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl AppState {
    /// State whose chain holds only the offline engine.
    pub fn local(tuning: SelectorTuning, custom_game: GameRules, seed: Option<u64>) -> Self {
        let local = LocalStrategy::new(tuning, seed);
        Self {
            chain: Arc::new(FallbackChain::new().with(Arc::new(local))),
            custom_game,
            seed,
        }
    }
}
