//! # Wildquest
//!
//! The progression and encounter-matching core of a turn-based RPG.
//!
//! ## Architecture Overview
//!
//! Wildquest decides which monsters a hero may fight, tracks the quests the
//! hero has taken on, and paces the attack animation shown during combat.
//! The pieces are small and independent:
//!
//! - **Monster Catalog**: read-only monster records, queried by biome or id
//! - **Encounter Generation**: level-gated, biome-scoped monster selection
//! - **Quest Ledger**: bounded, duplicate-free set of active quests
//! - **Attack Animation**: fixed six-frame attack/rest toggle on a timer
//!
//! All state is passed explicitly. Nothing in the crate keeps globals, so every
//! operation can be exercised on its own in tests.

pub mod game;
pub mod generation;

// Core module re-exports
pub use game::*;
pub use generation::*;

// Explicit re-exports for commonly used types
pub use game::{
    // From animation
    run_attack_animation,
    run_attack_animation_with_interval,
    AnimationHandle,
    AnimationState,
    AttackAnimation,
    // From catalog
    AttackArt,
    InMemoryCatalog,
    MonsterCatalog,
    MonsterRecord,
    // From quests
    Quest,
    QuestId,
    QuestLedger,
    // From state
    GameState,
    GameStatistics,
    VictoryReport,
};

pub use generation::{
    select_encounter, EncounterGenerator, EncounterWeighting, GenerationConfig, Generator,
    LevelBand, LevelProximityWeighting, UniformWeighting,
};

/// Core error type for the Wildquest engine.
#[derive(thiserror::Error, Debug)]
pub enum WildquestError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// No monster in the biome falls inside the hero's level band
    #[error("No eligible monsters in {biome} for levels {min_level}-{max_level}")]
    NoEligibleMonsters {
        biome: Biome,
        min_level: u32,
        max_level: u32,
    },

    /// Every monster in the biome is already the target of an active quest
    #[error("No quests available in {0}")]
    NoQuestsAvailableInBiome(Biome),

    /// Every monster in every biome is already the target of an active quest
    #[error("No quests available anywhere")]
    NoQuestsAvailableAnywhere,

    /// The quest ledger has no free slot
    #[error("Quest log is full ({capacity} active quests)")]
    QuestCapacityFull { capacity: usize },

    /// A catalog already holds a monster with this id
    #[error("Duplicate monster id: {0}")]
    DuplicateMonster(MonsterId),

    /// The catalog has no monster with this id
    #[error("Unknown monster: {0}")]
    UnknownMonster(MonsterId),
}

impl WildquestError {
    /// Whether this is an expected empty-result condition to show the player.
    ///
    /// Reportable conditions never change game state; the caller displays
    /// [`guidance`](Self::guidance) and carries on.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            WildquestError::NoEligibleMonsters { .. }
                | WildquestError::NoQuestsAvailableInBiome(_)
                | WildquestError::NoQuestsAvailableAnywhere
                | WildquestError::QuestCapacityFull { .. }
        )
    }

    /// Actionable text for the player, if this error is reportable.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            WildquestError::NoEligibleMonsters { .. } => {
                Some("Nothing here matches your strength. Try exploring another biome.")
            }
            WildquestError::NoQuestsAvailableInBiome(_) => {
                Some("Every monster here is already hunted. Explore other biomes for new quests.")
            }
            WildquestError::NoQuestsAvailableAnywhere => {
                Some("No quests remain anywhere. Complete your existing quests first.")
            }
            WildquestError::QuestCapacityFull { .. } => {
                Some("Your quest log is full. Complete existing quests to take on new ones.")
            }
            _ => None,
        }
    }
}

/// Result type used throughout the Wildquest codebase.
pub type WildquestResult<T> = Result<T, WildquestError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Maximum number of quests a hero may hold at once
    pub const MAX_ACTIVE_QUESTS: usize = 3;

    /// How many levels below the hero an encounter may be
    pub const LEVELS_BELOW_HERO: u32 = 2;

    /// How many levels above the hero an encounter may be
    pub const LEVELS_ABOVE_HERO: u32 = 1;

    /// Frames in one attack animation
    pub const ATTACK_FRAME_COUNT: usize = 6;

    /// Delay between attack animation frames in milliseconds
    pub const ATTACK_FRAME_INTERVAL_MS: u64 = 250;

    /// Sound played for monsters that do not name their own
    pub const DEFAULT_ATTACK_SOUND: &str = "sounds/attack_default.wav";

    /// XP needed for a fresh hero's first level-up
    pub const STARTING_XP_TO_NEXT_LEVEL: u32 = 100;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reportable_errors_have_guidance() {
        let errors = vec![
            WildquestError::NoEligibleMonsters {
                biome: Biome::Ocean,
                min_level: 1,
                max_level: 2,
            },
            WildquestError::NoQuestsAvailableInBiome(Biome::Grassland),
            WildquestError::NoQuestsAvailableAnywhere,
            WildquestError::QuestCapacityFull { capacity: 3 },
        ];

        for error in errors {
            assert!(error.is_reportable(), "{} should be reportable", error);
            assert!(error.guidance().is_some());
        }
    }

    #[test]
    fn test_integrity_errors_are_not_reportable() {
        let error = WildquestError::DuplicateMonster("spider".to_string());
        assert!(!error.is_reportable());
        assert!(error.guidance().is_none());
    }

    #[test]
    fn test_error_messages() {
        let error = WildquestError::NoEligibleMonsters {
            biome: Biome::Desert,
            min_level: 2,
            max_level: 5,
        };
        assert_eq!(
            error.to_string(),
            "No eligible monsters in desert for levels 2-5"
        );
        assert_eq!(
            WildquestError::NoQuestsAvailableInBiome(Biome::Grassland).to_string(),
            "No quests available in grassland"
        );
    }
}
