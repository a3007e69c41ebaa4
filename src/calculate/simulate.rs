//! Simulated draws, for checking generated entries against a random result.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::GameRules;

/// One simulated draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedDraw {
    pub main: Vec<u32>,
    /// Same-barrel supplementary numbers.
    pub supplementary: Vec<u32>,
    /// Separate-barrel bonus numbers, in draw order.
    pub bonus: Vec<u32>,
}

/// How an entry fared against a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub main_matches: u32,
    pub supplementary_matches: u32,
    pub bonus_matched: bool,
}

impl SimulatedDraw {
    /// Score an entry and its optional bonus pick against this draw.
    pub fn score(&self, entry: &[u32], bonus: Option<u32>) -> MatchSummary {
        let main_matches = entry.iter().filter(|n| self.main.contains(n)).count() as u32;
        let supplementary_matches = entry
            .iter()
            .filter(|n| self.supplementary.contains(n))
            .count() as u32;
        let bonus_matched = bonus.is_some_and(|b| self.bonus.contains(&b));

        MatchSummary {
            main_matches,
            supplementary_matches,
            bonus_matched,
        }
    }
}

/// Draw a full result: main numbers, then supplementaries from the same
/// barrel or bonus numbers from a separate one.
pub fn simulate_draw<R: Rng + ?Sized>(rules: &GameRules, rng: &mut R) -> SimulatedDraw {
    let mut barrel: Vec<u32> = (1..=rules.main_range()).collect();
    barrel.shuffle(rng);

    let main_count = rules.main_count() as usize;
    let mut main: Vec<u32> = barrel.iter().take(main_count).copied().collect();
    main.sort_unstable();

    let (supplementary, bonus) = match rules.bonus_range() {
        Some(range) if rules.bonus_count() > 0 => {
            let mut second: Vec<u32> = (1..=range).collect();
            second.shuffle(rng);
            second.truncate(rules.bonus_count() as usize);
            (Vec::new(), second)
        }
        _ => {
            let mut supps: Vec<u32> = barrel
                .iter()
                .skip(main_count)
                .take(rules.bonus_count() as usize)
                .copied()
                .collect();
            supps.sort_unstable();
            (supps, Vec::new())
        }
    };

    SimulatedDraw {
        main,
        supplementary,
        bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameType;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_two_barrel_draw() {
        let rules = GameType::EuroMillions.rules();
        let mut rng = SmallRng::seed_from_u64(1);
        let draw = simulate_draw(&rules, &mut rng);

        assert_eq!(draw.main.len(), 5);
        assert!(draw.main.windows(2).all(|w| w[0] < w[1]));
        assert!(draw.main.iter().all(|n| (1..=50).contains(n)));
        assert!(draw.supplementary.is_empty());
        assert_eq!(draw.bonus.len(), 2);
        assert_ne!(draw.bonus[0], draw.bonus[1]);
        assert!(draw.bonus.iter().all(|n| (1..=12).contains(n)));
    }

    #[test]
    fn test_same_barrel_draw() {
        let rules = GameType::UkLotto.rules();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let draw = simulate_draw(&rules, &mut rng);

            assert_eq!(draw.main.len(), 6);
            assert_eq!(draw.supplementary.len(), 1);
            assert!(!draw.main.contains(&draw.supplementary[0]));
            assert!(draw.bonus.is_empty());
        }
    }

    #[test]
    fn test_no_bonus_draw() {
        let rules = GameType::Custom.rules();
        let mut rng = SmallRng::seed_from_u64(2);
        let draw = simulate_draw(&rules, &mut rng);
        assert_eq!(draw.main.len(), 6);
        assert!(draw.supplementary.is_empty());
        assert!(draw.bonus.is_empty());
    }

    #[test]
    fn test_score() {
        let draw = SimulatedDraw {
            main: vec![1, 2, 3, 4, 5, 6],
            supplementary: vec![7],
            bonus: vec![],
        };
        let summary = draw.score(&[1, 2, 3, 7, 20, 30], None);
        assert_eq!(summary.main_matches, 3);
        assert_eq!(summary.supplementary_matches, 1);
        assert!(!summary.bonus_matched);

        let pb = SimulatedDraw {
            main: vec![10, 20, 30, 40, 50],
            supplementary: vec![],
            bonus: vec![4],
        };
        assert!(pb.score(&[10, 11, 12, 13, 14], Some(4)).bonus_matched);
        assert!(!pb.score(&[10, 11, 12, 13, 14], Some(5)).bonus_matched);
    }
}
