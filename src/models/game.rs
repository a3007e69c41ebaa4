//! Game rules and the built-in game catalogue.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest entry size offered for system play.
pub const MAX_SYSTEM_SIZE: u32 = 20;

/// Largest number any barrel may hold.
pub const MAX_RANGE: u32 = 100;

/// Errors raised when building `GameRules`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("main count must be at least 1")]
    ZeroMainCount,

    #[error("main range {range} is smaller than main count {count}")]
    RangeTooSmall { count: u32, range: u32 },

    #[error("bonus range must be at least 1 when set")]
    ZeroBonusRange,

    #[error("range {range} exceeds the maximum of {max}")]
    RangeTooLarge { range: u32, max: u32 },

    #[error("{bonus_count} bonus numbers cannot be drawn from the remaining pool")]
    NoBonusPool { bonus_count: u32 },
}

/// Unvalidated shape used for deserialization.
#[derive(Debug, Clone, Deserialize)]
struct RawGameRules {
    main_count: u32,
    main_range: u32,
    #[serde(default)]
    bonus_count: u32,
    #[serde(default)]
    bonus_range: Option<u32>,
}

/// Structural rules of a lottery game.
///
/// Built once per request through [`GameRules::new`] and never mutated.
/// Primary numbers come from `[1, main_range]`. When `bonus_range` is set the
/// bonus is drawn from a separate barrel `[1, bonus_range]`, otherwise it is a
/// supplementary number from the main barrel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameRules")]
pub struct GameRules {
    main_count: u32,
    main_range: u32,
    bonus_count: u32,
    bonus_range: Option<u32>,
}

impl GameRules {
    pub fn new(
        main_count: u32,
        main_range: u32,
        bonus_count: u32,
        bonus_range: Option<u32>,
    ) -> Result<Self, RulesError> {
        if main_count == 0 {
            return Err(RulesError::ZeroMainCount);
        }
        if main_range < main_count {
            return Err(RulesError::RangeTooSmall {
                count: main_count,
                range: main_range,
            });
        }
        if bonus_range == Some(0) {
            return Err(RulesError::ZeroBonusRange);
        }
        for range in std::iter::once(main_range).chain(bonus_range) {
            if range > MAX_RANGE {
                return Err(RulesError::RangeTooLarge {
                    range,
                    max: MAX_RANGE,
                });
            }
        }

        let bonus_pool = match bonus_range {
            Some(range) => range,
            None => main_range - main_count,
        };
        if bonus_count > bonus_pool {
            return Err(RulesError::NoBonusPool { bonus_count });
        }

        Ok(Self {
            main_count,
            main_range,
            bonus_count,
            bonus_range,
        })
    }

    pub fn main_count(&self) -> u32 {
        self.main_count
    }

    pub fn main_range(&self) -> u32 {
        self.main_range
    }

    pub fn bonus_count(&self) -> u32 {
        self.bonus_count
    }

    pub fn bonus_range(&self) -> Option<u32> {
        self.bonus_range
    }

    /// True when the bonus comes from its own barrel.
    pub fn is_two_barrel(&self) -> bool {
        self.bonus_count > 0 && self.bonus_range.is_some()
    }

    /// Entry sizes available for system play.
    pub fn system_options(&self) -> Vec<u32> {
        (self.main_count + 1..=MAX_SYSTEM_SIZE).collect()
    }

    /// Short rules summary, e.g. "Pick 5 (1-69) + Bonus (1-26)".
    pub fn summary(&self) -> String {
        let mut out = format!("Pick {} (1-{})", self.main_count, self.main_range);
        match (self.bonus_count, self.bonus_range) {
            (0, _) => {}
            (n, Some(range)) => out.push_str(&format!(" + {} bonus (1-{})", n, range)),
            (n, None) => out.push_str(&format!(" + {} supp", n)),
        }
        out
    }
}

impl TryFrom<RawGameRules> for GameRules {
    type Error = RulesError;

    fn try_from(raw: RawGameRules) -> Result<Self, Self::Error> {
        GameRules::new(
            raw.main_count,
            raw.main_range,
            raw.bonus_count,
            raw.bonus_range,
        )
    }
}

/// Built-in games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    UsPowerball,
    UsMegaMillions,
    EuroMillions,
    EuroJackpot,
    ItalianSuper,
    UkLotto,
    IrishLotto,
    LaPrimitiva,
    Custom,
}

impl GameType {
    pub const ALL: [GameType; 9] = [
        GameType::UsPowerball,
        GameType::UsMegaMillions,
        GameType::EuroMillions,
        GameType::EuroJackpot,
        GameType::ItalianSuper,
        GameType::UkLotto,
        GameType::IrishLotto,
        GameType::LaPrimitiva,
        GameType::Custom,
    ];

    /// Preset rules for this game.
    pub fn rules(&self) -> GameRules {
        let (main_count, main_range, bonus_count, bonus_range) = match self {
            GameType::UsPowerball => (5, 69, 1, Some(26)),
            GameType::UsMegaMillions => (5, 70, 1, Some(25)),
            GameType::EuroMillions => (5, 50, 2, Some(12)),
            GameType::EuroJackpot => (5, 50, 2, Some(12)),
            GameType::ItalianSuper => (6, 90, 1, None),
            GameType::UkLotto => (6, 59, 1, None),
            GameType::IrishLotto => (6, 47, 1, None),
            GameType::LaPrimitiva => (6, 49, 1, Some(9)),
            GameType::Custom => (6, 45, 0, None),
        };
        // Presets are constants that always satisfy the constructor checks.
        GameRules {
            main_count,
            main_range,
            bonus_count,
            bonus_range,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameType::UsPowerball => "USA Power Lotto",
            GameType::UsMegaMillions => "USA Mega Lotto",
            GameType::EuroMillions => "European Millions",
            GameType::EuroJackpot => "European Jackpot",
            GameType::ItalianSuper => "Italian Super Jackpot",
            GameType::UkLotto => "UK Lotto",
            GameType::IrishLotto => "Irish Lotto",
            GameType::LaPrimitiva => "La Primitiva",
            GameType::Custom => "Custom Game",
        }
    }

    pub fn region(&self) -> &'static str {
        match self {
            GameType::UsPowerball | GameType::UsMegaMillions => "USA",
            GameType::Custom => "Global",
            _ => "Europe",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameType::UsPowerball => "Pick 5 (1-69) + PB (1-26)",
            GameType::UsMegaMillions => "Pick 5 (1-70) + Mega (1-25)",
            GameType::EuroMillions => "Pick 5 (1-50) + Stars (1-12)",
            GameType::EuroJackpot => "Pick 5 (1-50) + EuroNums (1-12)",
            GameType::ItalianSuper => "Pick 6 (1-90)",
            GameType::UkLotto => "Pick 6 (1-59)",
            GameType::IrishLotto => "Pick 6 (1-47)",
            GameType::LaPrimitiva => "Pick 6 (1-49) + Reintegro",
            GameType::Custom => "User-defined parameters",
        }
    }

    /// Stable identifier, matching the serde representation.
    pub fn slug(&self) -> &'static str {
        match self {
            GameType::UsPowerball => "us-powerball",
            GameType::UsMegaMillions => "us-mega-millions",
            GameType::EuroMillions => "euro-millions",
            GameType::EuroJackpot => "euro-jackpot",
            GameType::ItalianSuper => "italian-super",
            GameType::UkLotto => "uk-lotto",
            GameType::IrishLotto => "irish-lotto",
            GameType::LaPrimitiva => "la-primitiva",
            GameType::Custom => "custom",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|g| g.slug() == slug)
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_validation() {
        assert_eq!(GameRules::new(0, 45, 0, None), Err(RulesError::ZeroMainCount));
        assert_eq!(
            GameRules::new(6, 5, 0, None),
            Err(RulesError::RangeTooSmall { count: 6, range: 5 })
        );
        assert_eq!(
            GameRules::new(5, 69, 1, Some(0)),
            Err(RulesError::ZeroBonusRange)
        );
        assert!(GameRules::new(6, 45, 0, None).is_ok());
    }

    #[test]
    fn test_rules_reject_oversized_ranges() {
        assert_eq!(
            GameRules::new(6, 4_000_000_000, 0, None),
            Err(RulesError::RangeTooLarge { range: 4_000_000_000, max: MAX_RANGE })
        );
        assert_eq!(
            GameRules::new(5, 50, 1, Some(101)),
            Err(RulesError::RangeTooLarge { range: 101, max: MAX_RANGE })
        );
        assert!(GameRules::new(6, MAX_RANGE, 1, Some(MAX_RANGE)).is_ok());

        let json = r#"{"main_count": 6, "main_range": 4000000000}"#;
        assert!(serde_json::from_str::<GameRules>(json).is_err());
    }

    #[test]
    fn test_rules_require_bonus_pool() {
        // Same barrel: no number left over for the supplementary.
        assert_eq!(
            GameRules::new(6, 6, 1, None),
            Err(RulesError::NoBonusPool { bonus_count: 1 })
        );
        assert_eq!(
            GameRules::new(2, 10, 3, Some(2)),
            Err(RulesError::NoBonusPool { bonus_count: 3 })
        );
        assert!(GameRules::new(6, 7, 1, None).is_ok());
        assert!(GameRules::new(6, 6, 0, None).is_ok());
    }

    #[test]
    fn test_presets_pass_validation() {
        for game in GameType::ALL {
            let r = game.rules();
            let checked = GameRules::new(
                r.main_count(),
                r.main_range(),
                r.bonus_count(),
                r.bonus_range(),
            );
            assert_eq!(checked, Ok(r), "{} preset invalid", game.slug());
        }
    }

    #[test]
    fn test_two_barrel_detection() {
        assert!(GameType::UsPowerball.rules().is_two_barrel());
        assert!(GameType::LaPrimitiva.rules().is_two_barrel());
        assert!(!GameType::UkLotto.rules().is_two_barrel());
        assert!(!GameType::Custom.rules().is_two_barrel());
    }

    #[test]
    fn test_system_options() {
        let rules = GameType::UkLotto.rules();
        let options = rules.system_options();
        assert_eq!(options.first(), Some(&7));
        assert_eq!(options.last(), Some(&20));

        let wide = GameRules::new(20, 80, 0, None).unwrap();
        assert!(wide.system_options().is_empty());
    }

    #[test]
    fn test_slug_roundtrip() {
        for game in GameType::ALL {
            assert_eq!(GameType::from_slug(game.slug()), Some(game));
            let json = serde_json::to_string(&game).unwrap();
            assert_eq!(json, format!("\"{}\"", game.slug()));
        }
        assert_eq!(GameType::from_slug(" UK-Lotto "), Some(GameType::UkLotto));
        assert_eq!(GameType::from_slug("bingo"), None);
    }

    #[test]
    fn test_rules_deserialize_validates() {
        let ok: GameRules =
            serde_json::from_str(r#"{"main_count": 5, "main_range": 69, "bonus_count": 1, "bonus_range": 26}"#)
                .unwrap();
        assert_eq!(ok, GameType::UsPowerball.rules());

        let defaults: GameRules =
            serde_json::from_str(r#"{"main_count": 6, "main_range": 45}"#).unwrap();
        assert_eq!(defaults.bonus_count(), 0);
        assert_eq!(defaults.bonus_range(), None);

        let bad = serde_json::from_str::<GameRules>(r#"{"main_count": 10, "main_range": 5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            GameType::UsPowerball.rules().summary(),
            "Pick 5 (1-69) + 1 bonus (1-26)"
        );
        assert_eq!(GameType::UkLotto.rules().summary(), "Pick 6 (1-59) + 1 supp");
        assert_eq!(GameType::Custom.rules().summary(), "Pick 6 (1-45)");
    }
}
