use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// The four minigames that report scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum GameName {
    Match,
    Quiz,
    Falling,
    Tower,
}

impl GameName {
    pub const ALL: [GameName; 4] = [
        GameName::Match,
        GameName::Quiz,
        GameName::Falling,
        GameName::Tower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameName::Match => "match",
            GameName::Quiz => "quiz",
            GameName::Falling => "falling",
            GameName::Tower => "tower",
        }
    }
}

impl fmt::Display for GameName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameName::ALL
            .into_iter()
            .find(|game| game.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown game '{}'", s))
    }
}

/// Best score per game. Missing keys in stored data default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct HighScores {
    #[serde(rename = "match")]
    #[ts(type = "number")]
    pub match_game: i64,
    #[ts(type = "number")]
    pub quiz: i64,
    #[ts(type = "number")]
    pub falling: i64,
    #[ts(type = "number")]
    pub tower: i64,
}

impl HighScores {
    pub fn get(&self, game: GameName) -> i64 {
        match game {
            GameName::Match => self.match_game,
            GameName::Quiz => self.quiz,
            GameName::Falling => self.falling,
            GameName::Tower => self.tower,
        }
    }

    fn slot_mut(&mut self, game: GameName) -> &mut i64 {
        match game {
            GameName::Match => &mut self.match_game,
            GameName::Quiz => &mut self.quiz,
            GameName::Falling => &mut self.falling,
            GameName::Tower => &mut self.tower,
        }
    }

    /// Raise the record for `game` if `score` beats it. Returns true when the table changed.
    pub fn submit(&mut self, game: GameName, score: i64) -> bool {
        let slot = self.slot_mut(game);
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }

    /// Sum of all records, saturating at `i64::MAX`.
    pub fn total(&self) -> i64 {
        GameName::ALL
            .iter()
            .fold(0i64, |sum, game| sum.saturating_add(self.get(*game)))
    }
}

/// One settled round, as shown in the results log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryEntry {
    pub timestamp: String, // display-formatted local time
    pub game: GameName,
    #[ts(type = "number")]
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub correct_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub wrong_count: Option<u32>,
}

/// Result handed back to the minigame after a round is settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub entry: GameHistoryEntry,
    pub coins_earned: f64,
}
