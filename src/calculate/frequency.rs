//! Frequency analysis over free-form draw history.
//!
//! History text is treated as a bag of integers: every maximal run of ASCII
//! digits is one token, whatever surrounds it. Dates, bonus annotations and
//! draw labels all contribute. Tokens outside `[1, main_range]` are dropped.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Size of the hot and cold pools.
pub const POOL_SIZE: usize = 10;

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `\d` would also match non-ASCII digits.
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digit-run pattern is valid"))
}

/// Per-number occurrence counts with the derived hot and cold pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyProfile {
    /// Count for every number in `[1, main_range]`, zero when unseen.
    pub counts: BTreeMap<u32, u32>,
    /// Most frequent first, ties in ascending number order.
    pub hot: Vec<u32>,
    /// Least frequent first.
    pub cold: Vec<u32>,
}

impl FrequencyProfile {
    pub fn count(&self, number: u32) -> u32 {
        self.counts.get(&number).copied().unwrap_or(0)
    }

    /// Total in-range tokens seen.
    pub fn total_hits(&self) -> u32 {
        self.counts.values().sum()
    }

    /// True when the history contributed nothing in range.
    pub fn is_flat(&self) -> bool {
        self.total_hits() == 0
    }
}

/// Count in-range integers in `history` and rank them.
///
/// Numbers are ranked by count descending with a stable sort, so ties keep
/// ascending numeric order. `hot` is the first [`POOL_SIZE`] of that ranking
/// and `cold` the last [`POOL_SIZE`], read from the bottom up. Never fails:
/// empty or non-numeric history gives an all-zero profile.
pub fn analyze(history: &str, main_range: u32) -> FrequencyProfile {
    let mut counts: BTreeMap<u32, u32> = (1..=main_range).map(|n| (n, 0)).collect();

    for token in digit_runs().find_iter(history) {
        // Runs too long for u32 are out of range anyway.
        let Ok(number) = token.as_str().parse::<u32>() else {
            continue;
        };
        if let Some(count) = counts.get_mut(&number) {
            *count += 1;
        }
    }

    let mut ranked: Vec<(u32, u32)> = counts.iter().map(|(&n, &c)| (n, c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let hot = ranked.iter().take(POOL_SIZE).map(|&(n, _)| n).collect();
    let cold = ranked.iter().rev().take(POOL_SIZE).map(|&(n, _)| n).collect();

    FrequencyProfile { counts, hot, cold }
}
