//! # Generation Module
//!
//! Procedural selection of encounters for the hero.
//!
//! This module holds the tuning knobs for selection and the `Generator` seam
//! that selection systems implement. Encounter selection lives in
//! [`encounters`].

pub mod encounters;

pub use encounters::*;

use crate::{config, HeroProgress, WildquestResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for selection and pacing.
///
/// Controls the random seed, the width of the encounter level band, the
/// quest log size and the attack animation cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible selection
    pub seed: u64,
    /// Levels below the hero an encounter may be
    pub levels_below: u32,
    /// Levels above the hero an encounter may be
    pub levels_above: u32,
    /// Maximum number of active quests
    pub max_active_quests: usize,
    /// Delay between attack animation frames in milliseconds
    pub attack_frame_interval_ms: u64,
}

impl GenerationConfig {
    /// Creates a configuration with the standard game tuning.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.levels_below, 2);
    /// assert_eq!(config.levels_above, 1);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            levels_below: config::LEVELS_BELOW_HERO,
            levels_above: config::LEVELS_ABOVE_HERO,
            max_active_quests: config::MAX_ACTIVE_QUESTS,
            attack_frame_interval_ms: config::ATTACK_FRAME_INTERVAL_MS,
        }
    }

    /// Creates a configuration for tests, with a near-instant animation.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            attack_frame_interval_ms: 1,
            ..Self::new(seed)
        }
    }

    /// Loads a configuration from a JSON file. Missing fields keep defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> WildquestResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The encounter level band for a hero level under this configuration.
    pub fn level_band(&self, hero_level: u32) -> LevelBand {
        LevelBand::with_window(hero_level, self.levels_below, self.levels_above)
    }

    /// Delay between attack animation frames.
    pub fn attack_frame_interval(&self) -> Duration {
        Duration::from_millis(self.attack_frame_interval_ms)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for selection systems driven by the hero's progress.
///
/// Selection is a pure query: implementations read the hero and their own
/// data, and never mutate game state.
pub trait Generator<T> {
    /// Produces content for the hero using the provided random number generator.
    fn generate(&self, hero: &HeroProgress, rng: &mut StdRng) -> WildquestResult<T>;

    /// Validates that generated content meets the selection rules.
    fn validate(&self, content: &T, hero: &HeroProgress) -> WildquestResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.max_active_quests, config::MAX_ACTIVE_QUESTS);
        assert_eq!(config.attack_frame_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_testing_config_is_fast() {
        let config = GenerationConfig::for_testing(1);
        assert!(config.attack_frame_interval() < Duration::from_millis(10));
        assert_eq!(config.levels_below, config::LEVELS_BELOW_HERO);
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": 9, "levels_above": 3 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.levels_above, 3);
        assert_eq!(config.levels_below, config::LEVELS_BELOW_HERO);
        assert_eq!(config.max_active_quests, config::MAX_ACTIVE_QUESTS);
    }

    #[test]
    fn test_config_level_band() {
        let config = GenerationConfig::new(1);
        assert_eq!(config.level_band(4), LevelBand::for_hero(4));
    }

    #[test]
    fn test_utils_rng_is_seeded() {
        let config = GenerationConfig::new(12345);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }
}
