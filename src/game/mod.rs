//! # Game Module
//!
//! Core game data and the stateful pieces of the progression loop.
//!
//! This module contains the fundamental building blocks of Wildquest:
//! - Biomes and hero progression
//! - The read-only monster catalog
//! - The quest ledger
//! - The attack animation timer
//! - A session state bundle tying them together

pub mod animation;
pub mod catalog;
pub mod quests;
pub mod state;

pub use animation::*;
pub use catalog::*;
pub use quests::*;
pub use state::*;

use crate::{config, WildquestError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a monster in the catalog.
pub type MonsterId = String;

/// A themed game region that scopes monsters and quest phrasing.
///
/// # Examples
///
/// ```
/// use wildquest::Biome;
///
/// let biome: Biome = "Grassland".parse().unwrap();
/// assert_eq!(biome, Biome::Grassland);
/// assert_eq!(biome.to_string(), "grassland");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    Grassland,
    Desert,
    Ocean,
    Dungeon,
    Forest,
    Mountain,
    Swamp,
}

impl Biome {
    /// Returns all biomes.
    pub fn all() -> Vec<Biome> {
        vec![
            Biome::Grassland,
            Biome::Desert,
            Biome::Ocean,
            Biome::Dungeon,
            Biome::Forest,
            Biome::Mountain,
            Biome::Swamp,
        ]
    }

    /// Lowercase name used in data files and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Biome::Grassland => "grassland",
            Biome::Desert => "desert",
            Biome::Ocean => "ocean",
            Biome::Dungeon => "dungeon",
            Biome::Forest => "forest",
            Biome::Mountain => "mountain",
            Biome::Swamp => "swamp",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Biome {
    type Err = WildquestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Biome::all()
            .into_iter()
            .find(|biome| biome.as_str() == wanted)
            .ok_or_else(|| WildquestError::InvalidState(format!("Unknown biome: {}", s)))
    }
}

/// The hero's progression through the game.
///
/// The selectors only read `level` and `current_biome`; the rest is
/// bookkeeping for [`gain_xp`](Self::gain_xp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroProgress {
    /// Current level, starting at 1
    pub level: u32,
    /// XP accumulated toward the next level
    pub xp: u32,
    /// XP required to reach the next level
    pub xp_to_next_level: u32,
    /// Biome the hero is currently in
    pub current_biome: Biome,
}

impl HeroProgress {
    /// Creates a level 1 hero standing in the given biome.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::{Biome, HeroProgress};
    ///
    /// let hero = HeroProgress::new(Biome::Grassland);
    /// assert_eq!(hero.level, 1);
    /// assert_eq!(hero.xp, 0);
    /// ```
    pub fn new(current_biome: Biome) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next_level: config::STARTING_XP_TO_NEXT_LEVEL,
            current_biome,
        }
    }

    /// Creates a hero at a given level, with a threshold matching that level.
    pub fn at_level(level: u32, current_biome: Biome) -> Self {
        let mut hero = Self::new(current_biome);
        hero.level = level.max(1);
        // the threshold saturates after a few dozen levels
        for _ in 1..hero.level {
            if hero.xp_to_next_level == u32::MAX {
                break;
            }
            hero.xp_to_next_level = next_threshold(hero.xp_to_next_level);
        }
        hero
    }

    /// Adds XP and applies any level-ups. Returns the number of levels gained.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::{Biome, HeroProgress};
    ///
    /// let mut hero = HeroProgress::new(Biome::Desert);
    /// assert_eq!(hero.gain_xp(120), 1);
    /// assert_eq!(hero.level, 2);
    /// assert_eq!(hero.xp, 20);
    /// assert_eq!(hero.xp_to_next_level, 150);
    /// ```
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);

        let mut levels_gained = 0;
        while self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level = self.level.saturating_add(1);
            self.xp_to_next_level = next_threshold(self.xp_to_next_level);
            levels_gained += 1;
        }
        levels_gained
    }

    /// Moves the hero to another biome.
    pub fn travel_to(&mut self, biome: Biome) {
        self.current_biome = biome;
    }
}

fn next_threshold(current: u32) -> u32 {
    current.saturating_add(current / 2).max(1)
}
