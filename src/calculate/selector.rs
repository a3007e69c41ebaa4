//! Local number selector.
//!
//! Fills each entry with the caller's lucky numbers, then draws candidates
//! from the hot pool, the cold pool or the whole range until the entry is
//! full. Unwanted numbers are rejected on every draw. Pool sufficiency is
//! checked before any sampling so the draw loop always has a legal number
//! left to find.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::frequency::FrequencyProfile;
use crate::models::{ConfidenceScore, GameRules, MethodTag, PredictionRequest, PredictionResult};

/// Hot and cold numbers named in the narrative.
const NARRATIVE_POOL: usize = 5;

/// User-facing text for a selection failure.
pub const FILTER_FAILURE_MESSAGE: &str = "Unable to generate numbers with current filters.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("not enough eligible numbers: {eligible} available, {required} needed per entry")]
    InsufficientPool { eligible: usize, required: usize },
}

impl SelectionError {
    /// Message safe to show to end users.
    pub fn user_message(&self) -> &'static str {
        FILTER_FAILURE_MESSAGE
    }
}

/// Sampling constants.
///
/// The defaults (40% hot, 20% cold, 40% uniform; confidence 75-92) carry no
/// statistical meaning. They are kept for behavioural parity and can be tuned
/// freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectorTuning {
    /// Draws with `r < hot_threshold` come from the hot pool.
    pub hot_threshold: f64,
    /// Draws with `hot_threshold <= r < cold_threshold` come from the cold pool.
    pub cold_threshold: f64,
    pub confidence_min: u8,
    pub confidence_max: u8,
}

impl Default for SelectorTuning {
    fn default() -> Self {
        Self {
            hot_threshold: 0.40,
            cold_threshold: 0.60,
            confidence_min: ConfidenceScore::DEFAULT_MIN,
            confidence_max: ConfidenceScore::DEFAULT_MAX,
        }
    }
}

impl SelectorTuning {
    fn confidence_bounds(&self) -> (u8, u8) {
        let lo = self.confidence_min.min(self.confidence_max);
        let hi = self.confidence_min.max(self.confidence_max);
        (lo, hi)
    }
}

/// The offline prediction engine.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    tuning: SelectorTuning,
}

impl Selector {
    pub fn new(tuning: SelectorTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &SelectorTuning {
        &self.tuning
    }

    /// Generate `request.entry_count` entries.
    ///
    /// Fails with [`SelectionError::InsufficientPool`] before sampling when
    /// the unwanted numbers leave too few legal numbers to fill an entry
    /// (plus one more for a same-barrel bonus).
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rules: &GameRules,
        profile: &FrequencyProfile,
        request: &PredictionRequest,
        rng: &mut R,
    ) -> Result<PredictionResult, SelectionError> {
        let main_range = rules.main_range();
        let target = request.target_size(rules.main_count()) as usize;

        let unwanted: BTreeSet<u32> = request
            .unwanted_numbers
            .iter()
            .copied()
            .filter(|n| (1..=main_range).contains(n))
            .collect();

        let eligible = main_range as usize - unwanted.len();
        let same_barrel_bonus = rules.bonus_count() > 0 && rules.bonus_range().is_none();
        let required = target + usize::from(same_barrel_bonus);
        if eligible < required {
            debug!(eligible, required, "Selection pool too small");
            return Err(SelectionError::InsufficientPool { eligible, required });
        }

        let lucky = usable_lucky(&request.lucky_numbers, main_range, &unwanted, target);

        let mut entries = Vec::with_capacity(request.entry_count as usize);
        let mut bonus_numbers = Vec::new();

        for _ in 0..request.entry_count {
            let mut picked: BTreeSet<u32> = lucky.iter().copied().collect();

            while picked.len() < target {
                let candidate = self.draw_candidate(
                    profile,
                    main_range,
                    |n| (1..=main_range).contains(&n) && !unwanted.contains(&n) && !picked.contains(&n),
                    rng,
                );
                if (1..=main_range).contains(&candidate) && !unwanted.contains(&candidate) {
                    picked.insert(candidate);
                }
            }

            if rules.bonus_count() > 0 {
                let bonus = match rules.bonus_range() {
                    Some(range) => rng.gen_range(1..=range),
                    None => {
                        let remaining: Vec<u32> = (1..=main_range)
                            .filter(|n| !picked.contains(n) && !unwanted.contains(n))
                            .collect();
                        *remaining
                            .choose(rng)
                            .ok_or(SelectionError::InsufficientPool { eligible, required })?
                    }
                };
                bonus_numbers.push(bonus);
            }

            // BTreeSet iterates in ascending order.
            entries.push(picked.into_iter().collect());
        }

        let (lo, hi) = self.tuning.confidence_bounds();
        let confidence_score = ConfidenceScore::new(rng.gen_range(lo..=hi));

        let suggested_numbers: Vec<u32> = eligible_from(&profile.hot, &unwanted);
        let cold_listed: Vec<u32> = eligible_from(&profile.cold, &unwanted);
        let skipped: Vec<u32> = dedup(&request.lucky_numbers)
            .into_iter()
            .filter(|n| !lucky.contains(n))
            .collect();

        let narrative = build_narrative(&NarrativeInput {
            flat_history: profile.is_flat(),
            hot: &suggested_numbers,
            cold: &cold_listed,
            unwanted: &unwanted,
            lucky: &lucky,
            skipped_lucky: &skipped,
        });

        debug!(
            entries = entries.len(),
            target,
            confidence = confidence_score.value(),
            "Generated local prediction"
        );

        Ok(PredictionResult {
            entries,
            bonus_numbers: (rules.bonus_count() > 0).then_some(bonus_numbers),
            narrative,
            method_tags: MethodTag::LOCAL.to_vec(),
            confidence_score,
            system_label: request.system_label(rules.main_count()),
            suggested_numbers,
        })
    }

    /// Draw one number: from the hot pool, the cold pool or uniformly.
    ///
    /// Pool draws only consider numbers `is_free` accepts; an exhausted pool
    /// falls through to a uniform draw, so some legal number always stays
    /// reachable whatever the thresholds are.
    fn draw_candidate<R, F>(
        &self,
        profile: &FrequencyProfile,
        main_range: u32,
        is_free: F,
        rng: &mut R,
    ) -> u32
    where
        R: Rng + ?Sized,
        F: Fn(u32) -> bool,
    {
        let r: f64 = rng.gen();
        let pool = if r < self.tuning.hot_threshold {
            Some(&profile.hot)
        } else if r < self.tuning.cold_threshold {
            Some(&profile.cold)
        } else {
            None
        };

        let open: Vec<u32> = pool
            .into_iter()
            .flatten()
            .copied()
            .filter(|&n| is_free(n))
            .collect();

        match open.choose(rng) {
            Some(&n) => n,
            None => rng.gen_range(1..=main_range),
        }
    }
}

/// Generate with the default tuning.
pub fn generate<R: Rng + ?Sized>(
    rules: &GameRules,
    profile: &FrequencyProfile,
    request: &PredictionRequest,
    rng: &mut R,
) -> Result<PredictionResult, SelectionError> {
    Selector::default().generate(rules, profile, request, rng)
}

/// Lucky numbers that fit the entry, in caller order, capped at `target`.
fn usable_lucky(
    lucky: &[u32],
    main_range: u32,
    unwanted: &BTreeSet<u32>,
    target: usize,
) -> Vec<u32> {
    dedup(lucky)
        .into_iter()
        .filter(|n| (1..=main_range).contains(n) && !unwanted.contains(n))
        .take(target)
        .collect()
}

fn dedup(numbers: &[u32]) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    numbers.iter().copied().filter(|n| seen.insert(*n)).collect()
}

fn eligible_from(pool: &[u32], unwanted: &BTreeSet<u32>) -> Vec<u32> {
    pool.iter()
        .copied()
        .filter(|n| !unwanted.contains(n))
        .take(NARRATIVE_POOL)
        .collect()
}

struct NarrativeInput<'a> {
    flat_history: bool,
    hot: &'a [u32],
    cold: &'a [u32],
    unwanted: &'a BTreeSet<u32>,
    lucky: &'a [u32],
    skipped_lucky: &'a [u32],
}

fn join(numbers: impl IntoIterator<Item = u32>) -> String {
    numbers
        .into_iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn build_narrative(input: &NarrativeInput<'_>) -> String {
    let mut parts = vec![
        "Offline fallback: these numbers were generated locally because the remote \
         prediction service could not be reached. No AI model was consulted."
            .to_string(),
    ];

    if input.flat_history {
        parts.push(
            "No usable draw history was supplied, so the hot and cold pools follow plain \
             numeric order."
                .to_string(),
        );
    }

    if !input.hot.is_empty() {
        parts.push(format!(
            "Hot numbers in play: {}.",
            join(input.hot.iter().copied())
        ));
    }
    if !input.cold.is_empty() {
        parts.push(format!(
            "Cold numbers in play: {}.",
            join(input.cold.iter().copied())
        ));
    }

    if !input.unwanted.is_empty() {
        parts.push(format!(
            "Excluded from every entry: {}.",
            join(input.unwanted.iter().copied())
        ));
    }

    if !input.lucky.is_empty() {
        parts.push(format!(
            "Lucky numbers kept in every entry: {}.",
            join(input.lucky.iter().copied())
        ));
    }
    if !input.skipped_lucky.is_empty() {
        parts.push(format!(
            "Lucky numbers that could not be used (out of range, excluded or beyond the \
             entry size): {}.",
            join(input.skipped_lucky.iter().copied())
        ));
    }

    parts.push("Lottery draws are random; no selection method improves the odds.".to_string());
    parts.join(" ")
}
