//! Default-and-overlay loaders for documents whose shape changed over time.
//!
//! Each loader starts from the current default and copies over whatever the stored value
//! provides, field by field. A malformed field keeps its default; a malformed document
//! yields the full default.

use game_types::{GameName, HighScores, PlayerState, VocabStat, VocabStats};
use serde_json::Value;
use std::collections::BTreeMap;

/// Read a non-negative integer level. Fractions are floored, anything else is rejected.
fn level_from_value(value: &Value) -> Option<u32> {
    if let Some(level) = value.as_u64() {
        return Some(u32::try_from(level).unwrap_or(u32::MAX));
    }

    match value.as_f64() {
        Some(level) if level.is_finite() && level >= 0.0 => {
            Some(level.floor().min(f64::from(u32::MAX)) as u32)
        }
        _ => None,
    }
}

fn overlay_levels(levels: &mut BTreeMap<String, u32>, stored: &Value, section: &str) {
    let Some(stored) = stored.as_object() else {
        tracing::warn!("Ignoring non-object '{}' in stored player state", section);
        return;
    };

    for (key, value) in stored {
        match level_from_value(value) {
            Some(level) => {
                levels.insert(key.clone(), level);
            }
            None => {
                tracing::warn!(
                    "Ignoring invalid level {} for '{}.{}'",
                    value,
                    section,
                    key
                );
            }
        }
    }
}

/// Overlay a stored player state onto [`PlayerState::default`].
///
/// Every known upgrade key is present afterwards. Unknown upgrade keys and unknown
/// top-level fields are preserved.
pub fn player_state_from_value(stored: Value) -> PlayerState {
    let mut state = PlayerState::default();

    let Value::Object(fields) = stored else {
        tracing::warn!("Stored player state is not an object, using defaults");
        return state;
    };

    for (field, value) in fields {
        match field.as_str() {
            "coins" => match value.as_f64() {
                Some(coins) if coins.is_finite() && coins >= 0.0 => state.coins = coins,
                _ => tracing::warn!("Ignoring invalid coin balance {}", value),
            },
            "destinyPoints" => match level_from_value(&value) {
                Some(points) => state.destiny_points = points,
                None => tracing::warn!("Ignoring invalid destiny points {}", value),
            },
            "upgrades" => overlay_levels(&mut state.upgrades, &value, "upgrades"),
            "destinyUpgrades" => {
                overlay_levels(&mut state.destiny_upgrades, &value, "destinyUpgrades")
            }
            _ => {
                state.extra.insert(field, value);
            }
        }
    }

    state
}

/// Overlay a stored high-score table onto the all-zero table. Unknown games are dropped.
pub fn high_scores_from_value(stored: Value) -> HighScores {
    let mut scores = HighScores::default();

    let Some(fields) = stored.as_object() else {
        tracing::warn!("Stored high scores are not an object, using defaults");
        return scores;
    };

    for game in GameName::ALL {
        let Some(value) = fields.get(game.as_str()) else {
            continue;
        };

        let score = value
            .as_i64()
            .or_else(|| value.as_f64().filter(|s| s.is_finite()).map(|s| s.floor() as i64));
        match score {
            Some(score) => {
                scores.submit(game, score);
            }
            None => tracing::warn!("Ignoring invalid high score {} for {}", value, game),
        }
    }

    scores
}

fn vocab_stat_from_value(word: &str, stored: &Value) -> Option<VocabStat> {
    let Some(fields) = stored.as_object() else {
        tracing::warn!("Dropping stats for '{}': not an object", word);
        return None;
    };

    let mut stat = VocabStat::default();
    if let Some(value) = fields.get("correctCount") {
        match level_from_value(value) {
            Some(count) => stat.correct_count = count,
            None => tracing::warn!("Ignoring invalid correctCount {} for '{}'", value, word),
        }
    }
    if let Some(value) = fields.get("incorrectCount") {
        match level_from_value(value) {
            Some(count) => stat.incorrect_count = count,
            None => tracing::warn!("Ignoring invalid incorrectCount {} for '{}'", value, word),
        }
    }
    if let Some(value) = fields.get("lastCorrectEpochMillis") {
        let millis = value
            .as_i64()
            .or_else(|| value.as_f64().filter(|m| m.is_finite()).map(|m| m.floor() as i64));
        match millis {
            Some(millis) => stat.last_correct_epoch_millis = millis,
            None => tracing::warn!("Ignoring invalid lastCorrectEpochMillis {} for '{}'", value, word),
        }
    }

    Some(stat)
}

/// Overlay each stored word entry onto [`VocabStat::default`].
///
/// A bad field only resets that field and a non-object entry is dropped, so one damaged
/// word never costs the rest of the history.
pub fn vocab_stats_from_value(stored: Value) -> VocabStats {
    let Value::Object(entries) = stored else {
        tracing::warn!("Stored vocabulary stats are not an object, starting empty");
        return VocabStats::new();
    };

    entries
        .iter()
        .filter_map(|(word, value)| {
            vocab_stat_from_value(word, value).map(|stat| (word.clone(), stat))
        })
        .collect()
}
