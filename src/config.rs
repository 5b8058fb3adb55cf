//! Runner configuration from `BLOCKFALL_*` environment variables.
//!
//! Unset or unparsable values fall back to defaults.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{BagSource, PieceSource, SequenceSource, UniformSource};
use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// How piece kinds are drawn when no fixed sequence is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" => Some(Self::Uniform),
            "bag" | "7bag" | "7-bag" => Some(Self::Bag),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub randomizer: Randomizer,
    /// Fixed cyclic piece sequence such as `"iotl"`; overrides the randomizer
    pub pieces: Option<String>,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub show_ghost: bool,
    pub event_log: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::Uniform,
            pieces: None,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            show_ghost: true,
            event_log: None,
        }
    }
}

impl GameConfig {
    /// Read the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let randomizer = var("BLOCKFALL_RANDOMIZER")
            .and_then(|s| Randomizer::from_str(&s))
            .unwrap_or(defaults.randomizer);

        let das_ms = var("BLOCKFALL_DAS_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.das_ms);
        let arr_ms = var("BLOCKFALL_ARR_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.arr_ms);

        let show_ghost = var("BLOCKFALL_GHOST")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("off")))
            .unwrap_or(defaults.show_ghost);

        Self {
            seed,
            randomizer,
            pieces: var("BLOCKFALL_PIECES"),
            das_ms,
            arr_ms,
            show_ghost,
            event_log: var("BLOCKFALL_EVENT_LOG").map(PathBuf::from),
        }
    }

    /// Piece source for a new game.
    ///
    /// A `pieces` string with no valid letters is ignored.
    pub fn piece_source(&self) -> Box<dyn PieceSource> {
        if let Some(sequence) = self.pieces.as_deref().and_then(SequenceSource::parse) {
            return Box::new(sequence);
        }
        match self.randomizer {
            Randomizer::Uniform => Box::new(UniformSource::new(self.seed)),
            Randomizer::Bag => Box::new(BagSource::new(self.seed)),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.randomizer, Randomizer::Uniform);
        assert_eq!(config.das_ms, DEFAULT_DAS_MS);
        assert_eq!(config.arr_ms, DEFAULT_ARR_MS);
        assert!(config.show_ghost);
        assert!(config.pieces.is_none());
        assert!(config.event_log.is_none());
    }

    #[test]
    fn test_parses_values() {
        let config = config_from(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_RANDOMIZER", "Bag"),
            ("BLOCKFALL_DAS_MS", "120"),
            ("BLOCKFALL_ARR_MS", "40"),
            ("BLOCKFALL_GHOST", "false"),
            ("BLOCKFALL_EVENT_LOG", " /tmp/blockfall.jsonl "),
        ]);
        assert_eq!(config.seed, 42);
        assert_eq!(config.randomizer, Randomizer::Bag);
        assert_eq!(config.das_ms, 120);
        assert_eq!(config.arr_ms, 40);
        assert!(!config.show_ghost);
        assert_eq!(config.event_log, Some(PathBuf::from("/tmp/blockfall.jsonl")));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("BLOCKFALL_RANDOMIZER", "shuffle"),
            ("BLOCKFALL_DAS_MS", "soon"),
            ("BLOCKFALL_EVENT_LOG", "   "),
        ]);
        assert_eq!(config.randomizer, Randomizer::Uniform);
        assert_eq!(config.das_ms, DEFAULT_DAS_MS);
        assert!(config.event_log.is_none());
    }

    #[test]
    fn test_piece_sequence_overrides_randomizer() {
        let config = config_from(&[("BLOCKFALL_PIECES", "tz"), ("BLOCKFALL_RANDOMIZER", "bag")]);
        let mut source = config.piece_source();
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::Z);
        assert_eq!(source.next_kind(), PieceKind::T);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let config = config_from(&[("BLOCKFALL_SEED", "7")]);
        let mut a = config.piece_source();
        let mut b = config.piece_source();
        for _ in 0..20 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }
}
