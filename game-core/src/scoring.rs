use game_types::{DestinyUpgradeKind, GameName, HighScores, PlayerState, UpgradeKind};
use rand::Rng;
use serde::Serialize;

/// Every term of one score-to-coin conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinBreakdown {
    pub base_coin: f64,
    pub standard_multiplier: f64,
    /// Additive term on the multiplier scale.
    pub high_score_bonus: f64,
    /// Flat coins added after multipliers.
    pub interest_bonus: f64,
    pub legacy_multiplier: f64,
    pub total_multiplier: f64,
    pub destiny_multiplier: f64,
    pub siphon_triggered: bool,
    pub coins_earned: f64,
}

pub struct CoinCalculator;

impl CoinCalculator {
    /// Tower scores are raw height, the other games report bounded combo scores.
    pub fn base_coin(game: GameName, score: i64) -> f64 {
        let score = score.max(0);
        match game {
            GameName::Tower => (score / 10) as f64,
            _ => ((score as f64).sqrt() * 8.0).floor(),
        }
    }

    /// Convert a round score into coins.
    ///
    /// `high_scores` is the table after this round's record (if any) was applied;
    /// `player` is the state before the reward is added. The random source is only
    /// consulted when Soul Siphon is owned.
    pub fn breakdown<R: Rng + ?Sized>(
        game: GameName,
        score: i64,
        player: &PlayerState,
        high_scores: &HighScores,
        rng: &mut R,
    ) -> CoinBreakdown {
        let base_coin = Self::base_coin(game, score);

        let standard_multiplier = 1.0 + f64::from(player.level(UpgradeKind::CoinBonus)) * 0.05;

        let high_score_bonus = (high_scores.total().max(0) / 1000) as f64
            * (f64::from(player.level(UpgradeKind::HighScoreBonus)) * 0.01);

        let interest_bonus = (player.coins
            * (f64::from(player.level(UpgradeKind::CoinInterest)) * 0.001))
            .floor();

        let legacy_multiplier = 1.0
            + player.total_upgrade_levels() as f64
                * (f64::from(player.level(UpgradeKind::LegacyOfKnowledge)) * 0.001);

        let total_multiplier = (standard_multiplier + high_score_bonus) * legacy_multiplier;
        let destiny_multiplier = 1.0
            + f64::from(player.destiny_level(DestinyUpgradeKind::GlobalCoinMultiplier)) * 0.05;

        let mut coins_earned =
            (base_coin * total_multiplier + interest_bonus).floor() * destiny_multiplier;

        let siphon_level = player.level(UpgradeKind::SoulSiphon);
        let siphon_triggered =
            siphon_level > 0 && rng.r#gen::<f64>() < f64::from(siphon_level) * 0.01;
        if siphon_triggered {
            coins_earned *= 2.0;
        }

        CoinBreakdown {
            base_coin,
            standard_multiplier,
            high_score_bonus,
            interest_bonus,
            legacy_multiplier,
            total_multiplier,
            destiny_multiplier,
            siphon_triggered,
            coins_earned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_base_coin_formulas() {
        assert_eq!(CoinCalculator::base_coin(GameName::Tower, 100), 10.0);
        assert_eq!(CoinCalculator::base_coin(GameName::Tower, 109), 10.0);
        assert_eq!(CoinCalculator::base_coin(GameName::Match, 100), 80.0);
        assert_eq!(CoinCalculator::base_coin(GameName::Quiz, 2), 11.0); // sqrt(2) * 8 = 11.31
        assert_eq!(CoinCalculator::base_coin(GameName::Falling, -25), 0.0);
        assert_eq!(CoinCalculator::base_coin(GameName::Tower, -25), 0.0);
    }

    #[test]
    fn test_no_upgrades_pays_base_coin() {
        let result = CoinCalculator::breakdown(
            GameName::Match,
            100,
            &PlayerState::default(),
            &HighScores::default(),
            &mut always(),
        );

        assert_eq!(result.total_multiplier, 1.0);
        assert_eq!(result.interest_bonus, 0.0);
        assert!(!result.siphon_triggered);
        assert_eq!(result.coins_earned, 80.0);
    }

    #[test]
    fn test_all_bonuses_stack() {
        let mut player = PlayerState::default();
        player.coins = 5000.0;
        player.set_level(UpgradeKind::CoinBonus, 4); // 1.2
        player.set_level(UpgradeKind::HighScoreBonus, 10); // 0.1 per 1000 total
        player.set_level(UpgradeKind::CoinInterest, 3); // floor(5000 * 0.003) = 15
        player.set_level(UpgradeKind::LegacyOfKnowledge, 2); // 19 levels: 1 + 19 * 0.002 = 1.038
        player.set_destiny_level(DestinyUpgradeKind::GlobalCoinMultiplier, 2); // 1.1

        let mut high_scores = HighScores::default();
        high_scores.submit(GameName::Tower, 2500);
        high_scores.submit(GameName::Quiz, 600);

        let result = CoinCalculator::breakdown(
            GameName::Tower,
            1000,
            &player,
            &high_scores,
            &mut never(),
        );

        assert_eq!(result.base_coin, 100.0);
        assert!((result.standard_multiplier - 1.2).abs() < 1e-9);
        // floor(3100 / 1000) = 3 -> 3 * 0.1
        assert!((result.high_score_bonus - 0.3).abs() < 1e-9);
        assert_eq!(result.interest_bonus, 15.0);
        assert!((result.legacy_multiplier - 1.038).abs() < 1e-9);
        // (1.2 + 0.3) * 1.038 = 1.557 -> floor(155.7 + 15) = 170 -> 170 * 1.1
        assert!((result.coins_earned - 187.0).abs() < 1e-9);
    }

    #[test]
    fn test_soul_siphon_doubles_on_low_roll() {
        let mut player = PlayerState::default();
        player.set_level(UpgradeKind::SoulSiphon, 5);

        let doubled = CoinCalculator::breakdown(
            GameName::Match,
            100,
            &player,
            &HighScores::default(),
            &mut always(),
        );
        assert!(doubled.siphon_triggered);
        assert_eq!(doubled.coins_earned, 160.0);

        let plain = CoinCalculator::breakdown(
            GameName::Match,
            100,
            &player,
            &HighScores::default(),
            &mut never(),
        );
        assert!(!plain.siphon_triggered);
        assert_eq!(plain.coins_earned, 80.0);
    }

    #[test]
    fn test_zero_score_interest_still_pays() {
        let mut player = PlayerState::default();
        player.coins = 2000.0;
        player.set_level(UpgradeKind::CoinInterest, 1);

        let result = CoinCalculator::breakdown(
            GameName::Quiz,
            0,
            &player,
            &HighScores::default(),
            &mut never(),
        );
        assert_eq!(result.base_coin, 0.0);
        assert_eq!(result.coins_earned, 2.0);
    }
}
