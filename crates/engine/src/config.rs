//! Session configuration
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `TETRIS_BOARD_WIDTH` | columns | 10 |
//! | `TETRIS_BOARD_HEIGHT` | rows | 20 |
//! | `TETRIS_SEED` | piece RNG seed | clock-derived |
//! | `TETRIS_EVENT_LOG` | JSONL event log path | none |
//!
//! Values that fail to parse fall back to the default.

use std::time::{SystemTime, UNIX_EPOCH};

use cosmic_tetris_types::{BOARD_HEIGHT, BOARD_WIDTH};

use crate::error::{EngineError, Result};

pub const MIN_BOARD_SIZE: u8 = 4;
pub const MAX_BOARD_WIDTH: u8 = 40;
pub const MAX_BOARD_HEIGHT: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: u8,
    pub height: u8,
    /// `None` picks a seed from the clock when the session is built.
    pub seed: Option<u32>,
    pub event_log_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: None,
            event_log_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = lookup("TETRIS_BOARD_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = lookup("TETRIS_BOARD_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);
        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());
        let event_log_path = lookup("TETRIS_EVENT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            width,
            height,
            seed,
            event_log_path,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_BOARD_SIZE || self.height < MIN_BOARD_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "board {}x{} is smaller than {}x{}",
                self.width, self.height, MIN_BOARD_SIZE, MIN_BOARD_SIZE
            )));
        }
        if self.width > MAX_BOARD_WIDTH || self.height > MAX_BOARD_HEIGHT {
            return Err(EngineError::InvalidConfig(format!(
                "board {}x{} is larger than {}x{}",
                self.width, self.height, MAX_BOARD_WIDTH, MAX_BOARD_HEIGHT
            )));
        }
        Ok(())
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("TETRIS_BOARD_WIDTH", "12"),
            ("TETRIS_BOARD_HEIGHT", " 24 "),
            ("TETRIS_SEED", "42"),
            ("TETRIS_EVENT_LOG", "/tmp/events.jsonl"),
        ]));
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 24);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.event_log_path.as_deref(), Some("/tmp/events.jsonl"));
        assert_eq!(config.resolve_seed(), 42);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("TETRIS_BOARD_WIDTH", "wide"),
            ("TETRIS_SEED", "-3"),
            ("TETRIS_EVENT_LOG", "   "),
        ]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_validate_bounds() {
        let small = SessionConfig {
            width: 3,
            ..SessionConfig::default()
        };
        assert!(matches!(small.validate(), Err(EngineError::InvalidConfig(_))));

        let tall = SessionConfig {
            height: 61,
            ..SessionConfig::default()
        };
        assert!(tall.validate().is_err());

        let edge = SessionConfig {
            width: 40,
            height: 60,
            ..SessionConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = SessionConfig::from_env();
    }
}
