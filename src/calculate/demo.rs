//! Sample draw history for trying the tool without real data.

use chrono::{Days, NaiveDate};
use rand::Rng;

use super::simulate::simulate_draw;
use crate::models::GameRules;

/// Most weekly draws generated in one call (ten years).
pub const MAX_DRAWS: u32 = 520;

/// Weekly draw lines going back from `today`, newest first.
///
/// Lines look like `Draw 2026-10-12: 3, 14, 15, 22, 35 (+ 9)` for games
/// with a separate bonus barrel and `... (Supp: 41)` for same-barrel games.
/// At most [`MAX_DRAWS`] lines are produced.
pub fn demo_history<R: Rng + ?Sized>(
    rules: &GameRules,
    draws: u32,
    today: NaiveDate,
    rng: &mut R,
) -> String {
    let draws = draws.min(MAX_DRAWS);
    let mut lines = Vec::with_capacity(draws as usize);

    for week in 1..=u64::from(draws) {
        let Some(date) = today.checked_sub_days(Days::new(week * 7)) else {
            break;
        };
        let draw = simulate_draw(rules, rng);

        let mut line = format!("Draw {}: {}", date.format("%Y-%m-%d"), join(&draw.main));
        if !draw.bonus.is_empty() {
            line.push_str(&format!(" (+ {})", join(&draw.bonus)));
        } else if !draw.supplementary.is_empty() {
            line.push_str(&format!(" (Supp: {})", join(&draw.supplementary)));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn join(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::frequency::analyze;
    use crate::models::GameType;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_line_shapes() {
        let mut rng = SmallRng::seed_from_u64(1);

        let pb = demo_history(&GameType::UsPowerball.rules(), 5, today(), &mut rng);
        let lines: Vec<&str> = pb.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Draw 2026-10-12: "));
        assert!(lines[4].starts_with("Draw 2026-09-14: "));
        assert!(lines.iter().all(|l| l.contains(" (+ ")));

        let uk = demo_history(&GameType::UkLotto.rules(), 3, today(), &mut rng);
        assert!(uk.lines().all(|l| l.contains(" (Supp: ")));

        let custom = demo_history(&GameType::Custom.rules(), 2, today(), &mut rng);
        assert!(custom.lines().all(|l| !l.contains('(')));
    }

    #[test]
    fn test_zero_draws() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(demo_history(&GameType::Custom.rules(), 0, today(), &mut rng), "");
    }

    #[test]
    fn test_draws_are_capped() {
        let mut rng = SmallRng::seed_from_u64(1);
        let history = demo_history(&GameType::Custom.rules(), u32::MAX, today(), &mut rng);
        assert_eq!(history.lines().count(), MAX_DRAWS as usize);
    }

    #[test]
    fn test_output_feeds_analyzer() {
        let rules = GameType::Custom.rules();
        let mut rng = SmallRng::seed_from_u64(3);
        let history = demo_history(&rules, 10, today(), &mut rng);

        let profile = analyze(&history, rules.main_range());
        // Every draw contributes six main numbers, dates add a few more.
        assert!(profile.total_hits() >= 60);
        assert!(!profile.is_flat());
    }
}
