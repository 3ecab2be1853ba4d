use game_core::EngineConfig;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub session_size: usize,
    pub history_limit: usize,
    pub rng_seed: Option<u64>,
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let rng_seed = match lookup("VOCAB_RNG_SEED") {
            Some(value) => Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid {
                        name: "VOCAB_RNG_SEED",
                        value,
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            data_dir: lookup("VOCAB_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./vocab_data")),
            session_size: parse_var(&lookup, "VOCAB_SESSION_SIZE", 10)?,
            history_limit: parse_var(&lookup, "VOCAB_HISTORY_LIMIT", 100)?,
            rng_seed,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            history_limit: self.history_limit,
            ..EngineConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./vocab_data"),
            session_size: 10,
            history_limit: 100,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine_config().history_limit, 100);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("VOCAB_DATA_DIR", "/tmp/vq"),
            ("VOCAB_SESSION_SIZE", " 25 "),
            ("VOCAB_HISTORY_LIMIT", "40"),
            ("VOCAB_RNG_SEED", "1234"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/vq"));
        assert_eq!(config.session_size, 25);
        assert_eq!(config.engine_config().history_limit, 40);
        assert_eq!(config.rng_seed, Some(1234));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = Config::from_lookup(lookup_from(&[("VOCAB_SESSION_SIZE", "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "VOCAB_SESSION_SIZE",
                value: "ten".to_string()
            }
        );

        assert!(Config::from_lookup(lookup_from(&[("VOCAB_RNG_SEED", "-1")])).is_err());
    }
}
