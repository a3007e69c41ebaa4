//! Combinatorial odds for the top prize divisions.
//!
//! These are exact game-structure odds. They are the same for every entry of
//! a given size no matter how its numbers were picked.

use serde::{Deserialize, Serialize};

use crate::models::GameRules;

/// Exact binomial coefficient, `None` on overflow.
pub fn combinations(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        // Exact at every step: the running value is C(n, i + 1) afterwards.
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

fn combinations_f64(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Probability that exactly `hits` of the `drawn` numbers fall in a
/// `picked`-number entry from a pool of `pool`.
fn hypergeometric(pool: u64, drawn: u64, picked: u64, hits: u64) -> f64 {
    if hits > drawn || hits > picked || picked - hits > pool - drawn {
        return 0.0;
    }
    combinations_f64(picked, hits) * combinations_f64(pool - picked, drawn - hits)
        / combinations_f64(pool, drawn)
}

/// One prize division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinTier {
    pub division: String,
    pub requirement: String,
    /// Human-readable odds, e.g. "1 in 8,145,060".
    pub probability: String,
    /// Chance of at least one winning entry, in `[0, 1]`.
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub entry_size: u32,
    pub entry_count: u32,
    /// Standard lines covered by one entry; `None` if it does not fit in u64.
    pub lines_per_entry: Option<u64>,
    pub tiers: Vec<WinTier>,
}

/// Odds of the top three divisions for `entry_count` entries of `entry_size`.
pub fn coverage(rules: &GameRules, entry_size: u32, entry_count: u32) -> CoverageStats {
    let pool = u64::from(rules.main_range());
    let drawn = u64::from(rules.main_count());
    let picked = u64::from(entry_size).min(pool);

    let p = |hits: u64| hypergeometric(pool, drawn, picked, hits);

    let mut raw: Vec<(String, f64)> = Vec::new();
    match (rules.bonus_count(), rules.bonus_range()) {
        (0, _) => {
            for k in 0..3u64 {
                if k >= drawn {
                    break;
                }
                raw.push((format!("Match {} Main", drawn - k), p(drawn - k)));
            }
        }
        (bonus_count, Some(range)) => {
            // Each entry is scored against a full bonus pick from its own barrel.
            let bonus_pool = u64::from(range);
            let bonus_drawn = u64::from(bonus_count);
            let b = |hits: u64| hypergeometric(bonus_pool, bonus_drawn, bonus_drawn, hits);

            raw.push((
                two_barrel_requirement(drawn, bonus_drawn, bonus_drawn),
                p(drawn) * b(bonus_drawn),
            ));
            raw.push((
                two_barrel_requirement(drawn, bonus_drawn - 1, bonus_drawn),
                p(drawn) * b(bonus_drawn - 1),
            ));
            if drawn > 1 {
                raw.push((
                    two_barrel_requirement(drawn - 1, bonus_drawn, bonus_drawn),
                    p(drawn - 1) * b(bonus_drawn),
                ));
            }
        }
        (_, None) => {
            raw.push((format!("Match {} Main", drawn), p(drawn)));
            if drawn > 1 && pool > drawn {
                // With m-1 hits, the spare picks sit among the pool - m non-main
                // numbers, one of which is the supplementary.
                let spare = (picked + 1).saturating_sub(drawn) as f64;
                let supp = (spare / (pool - drawn) as f64).min(1.0);
                let near = p(drawn - 1);
                raw.push((format!("Match {} Main + Supp", drawn - 1), near * supp));
                raw.push((format!("Match {} Main", drawn - 1), near * (1.0 - supp)));
            }
        }
    }

    let tiers = raw
        .into_iter()
        .enumerate()
        .map(|(i, (requirement, per_entry))| {
            let chance = at_least_one(per_entry, entry_count);
            WinTier {
                division: format!("Division {}", i + 1),
                requirement,
                probability: format_odds(chance),
                chance,
            }
        })
        .collect();

    CoverageStats {
        entry_size,
        entry_count,
        lines_per_entry: combinations(picked, drawn),
        tiers,
    }
}

fn two_barrel_requirement(main: u64, bonus_hits: u64, bonus_count: u64) -> String {
    match (bonus_hits, bonus_count) {
        (0, _) => format!("Match {} Main", main),
        (_, 1) => format!("Match {} Main + Bonus", main),
        _ => format!("Match {} Main + {} Bonus", main, bonus_hits),
    }
}

fn at_least_one(p: f64, entries: u32) -> f64 {
    if entries <= 1 {
        return p;
    }
    let n = i32::try_from(entries).unwrap_or(i32::MAX);
    1.0 - (1.0 - p).powi(n)
}

/// Render a probability as "1 in N".
pub fn format_odds(p: f64) -> String {
    if p <= 0.0 || !p.is_finite() {
        return "Not possible".to_string();
    }
    let n = (1.0 / p).round().max(1.0) as u64;
    format!("1 in {}", group_thousands(n))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
