use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

/// Regular upgrades bought with coins.
///
/// The set has grown over time; saved states written before a kind existed simply lack its
/// key, which is why levels are stored by string key and filled in on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    TimeExtension,
    PenaltyReduction,
    CoinBonus,
    QuizStreakBonus,
    FallingSlowdown,
    ExtraLife,
    CoinInterest,
    HighScoreBonus,
    TowerExtraLife,
    TowerStartWithBlessing,
    TowerBlessingReroll,
    TowerAddRareBlessings,
    SoulSiphon,
    LegacyOfKnowledge,
    DivineReflex,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 15] = [
        UpgradeKind::TimeExtension,
        UpgradeKind::PenaltyReduction,
        UpgradeKind::CoinBonus,
        UpgradeKind::QuizStreakBonus,
        UpgradeKind::FallingSlowdown,
        UpgradeKind::ExtraLife,
        UpgradeKind::CoinInterest,
        UpgradeKind::HighScoreBonus,
        UpgradeKind::TowerExtraLife,
        UpgradeKind::TowerStartWithBlessing,
        UpgradeKind::TowerBlessingReroll,
        UpgradeKind::TowerAddRareBlessings,
        UpgradeKind::SoulSiphon,
        UpgradeKind::LegacyOfKnowledge,
        UpgradeKind::DivineReflex,
    ];

    /// Stable key used in the persisted player state.
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeKind::TimeExtension => "timeExtension",
            UpgradeKind::PenaltyReduction => "penaltyReduction",
            UpgradeKind::CoinBonus => "coinBonus",
            UpgradeKind::QuizStreakBonus => "quizStreakBonus",
            UpgradeKind::FallingSlowdown => "fallingSlowdown",
            UpgradeKind::ExtraLife => "extraLife",
            UpgradeKind::CoinInterest => "coinInterest",
            UpgradeKind::HighScoreBonus => "highScoreBonus",
            UpgradeKind::TowerExtraLife => "towerExtraLife",
            UpgradeKind::TowerStartWithBlessing => "towerStartWithBlessing",
            UpgradeKind::TowerBlessingReroll => "towerBlessingReroll",
            UpgradeKind::TowerAddRareBlessings => "towerAddRareBlessings",
            UpgradeKind::SoulSiphon => "soulSiphon",
            UpgradeKind::LegacyOfKnowledge => "legacyOfKnowledge",
            UpgradeKind::DivineReflex => "divineReflex",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Meta-upgrades bought with destiny points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum DestinyUpgradeKind {
    GlobalCoinMultiplier,
    UpgradeCostReducer,
    BlessingRarity,
    StartingCoins,
}

impl DestinyUpgradeKind {
    pub const ALL: [DestinyUpgradeKind; 4] = [
        DestinyUpgradeKind::GlobalCoinMultiplier,
        DestinyUpgradeKind::UpgradeCostReducer,
        DestinyUpgradeKind::BlessingRarity,
        DestinyUpgradeKind::StartingCoins,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DestinyUpgradeKind::GlobalCoinMultiplier => "globalCoinMultiplier",
            DestinyUpgradeKind::UpgradeCostReducer => "upgradeCostReducer",
            DestinyUpgradeKind::BlessingRarity => "blessingRarity",
            DestinyUpgradeKind::StartingCoins => "startingCoins",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for DestinyUpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Persistent currencies and upgrade levels.
///
/// Levels are keyed by [`UpgradeKind::key`] / [`DestinyUpgradeKind::key`]. Keys this build
/// does not know about are carried along untouched, as are unknown top-level fields in
/// `extra`, so a save written by an older build never drops data written by a newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub coins: f64,
    pub destiny_points: u32,
    pub upgrades: BTreeMap<String, u32>,
    pub destiny_upgrades: BTreeMap<String, u32>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            coins: 0.0,
            destiny_points: 0,
            upgrades: UpgradeKind::ALL
                .iter()
                .map(|kind| (kind.key().to_string(), 0))
                .collect(),
            destiny_upgrades: DestinyUpgradeKind::ALL
                .iter()
                .map(|kind| (kind.key().to_string(), 0))
                .collect(),
            extra: serde_json::Map::new(),
        }
    }
}

impl PlayerState {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.upgrades.get(kind.key()).copied().unwrap_or(0)
    }

    pub fn set_level(&mut self, kind: UpgradeKind, level: u32) {
        self.upgrades.insert(kind.key().to_string(), level);
    }

    pub fn destiny_level(&self, kind: DestinyUpgradeKind) -> u32 {
        self.destiny_upgrades.get(kind.key()).copied().unwrap_or(0)
    }

    pub fn set_destiny_level(&mut self, kind: DestinyUpgradeKind, level: u32) {
        self.destiny_upgrades.insert(kind.key().to_string(), level);
    }

    /// Sum of every known regular upgrade level. Unknown keys do not count.
    pub fn total_upgrade_levels(&self) -> u64 {
        UpgradeKind::ALL
            .iter()
            .map(|kind| u64::from(self.level(*kind)))
            .sum()
    }
}
