//! # Quest Ledger
//!
//! Tracks the hero's active quests. The ledger holds at most a fixed number of
//! quests and never lets two of them target the same monster. Completing a
//! quest frees its monster for future quests.

use crate::{
    config, Biome, MonsterCatalog, MonsterId, MonsterRecord, WildquestError, WildquestResult,
};
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a quest.
pub type QuestId = Uuid;

/// An objective to defeat a specific monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier for this quest
    pub id: QuestId,
    /// Monster that must be defeated
    pub target_monster_id: MonsterId,
    /// Biome the target lives in
    pub biome: Biome,
    /// Biome-flavored objective text
    pub description: String,
    /// XP granted on completion
    pub xp_reward: u32,
}

impl Quest {
    /// Creates a quest targeting the given monster.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::{Biome, MonsterRecord, Quest};
    ///
    /// let spider = MonsterRecord::new("spider", "Spider", 2, Biome::Grassland).with_xp_reward(20);
    /// let quest = Quest::for_monster(&spider);
    /// assert_eq!(quest.description, "Hunt a Spider in the grasslands");
    /// assert_eq!(quest.xp_reward, 20);
    /// ```
    pub fn for_monster(monster: &MonsterRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_monster_id: monster.id.clone(),
            biome: monster.biome,
            description: describe(monster.biome, &monster.name),
            xp_reward: monster.xp_reward,
        }
    }
}

/// Quest text for a monster in a biome.
pub fn describe(biome: Biome, monster_name: &str) -> String {
    match biome {
        Biome::Grassland => format!("Hunt a {} in the grasslands", monster_name),
        Biome::Desert => format!("Defeat a {} in the desert sands", monster_name),
        Biome::Dungeon => format!("Slay a {} in the dark dungeons", monster_name),
        Biome::Ocean => format!("Vanquish a {} beneath the waves", monster_name),
        _ => format!("Kill a {}", monster_name),
    }
}

/// The set of active quests.
///
/// Invariants held after every mutation:
/// - `len() <= capacity()`
/// - no two quests share a `target_monster_id`
/// - `1 <= capacity() <= MAX_ACTIVE_QUESTS`
///
/// Deserializing checks the same invariants and rejects a ledger that breaks
/// any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LedgerRepr")]
pub struct QuestLedger {
    quests: Vec<Quest>,
    capacity: usize,
}

/// Unchecked serialized form of a [`QuestLedger`].
#[derive(Deserialize)]
struct LedgerRepr {
    quests: Vec<Quest>,
    capacity: usize,
}

impl TryFrom<LedgerRepr> for QuestLedger {
    type Error = WildquestError;

    fn try_from(repr: LedgerRepr) -> WildquestResult<Self> {
        if repr.capacity == 0 || repr.capacity > config::MAX_ACTIVE_QUESTS {
            return Err(WildquestError::InvalidState(format!(
                "Quest capacity {} is outside 1-{}",
                repr.capacity,
                config::MAX_ACTIVE_QUESTS
            )));
        }
        if repr.quests.len() > repr.capacity {
            return Err(WildquestError::InvalidState(format!(
                "{} active quests exceed capacity {}",
                repr.quests.len(),
                repr.capacity
            )));
        }

        let mut seen = HashSet::new();
        for quest in &repr.quests {
            if !seen.insert(quest.target_monster_id.as_str()) {
                return Err(WildquestError::InvalidState(format!(
                    "More than one quest targets {}",
                    quest.target_monster_id
                )));
            }
        }

        Ok(Self {
            quests: repr.quests,
            capacity: repr.capacity,
        })
    }
}

impl QuestLedger {
    /// Creates an empty ledger with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(config::MAX_ACTIVE_QUESTS)
    }

    /// Creates an empty ledger holding at most `capacity` quests.
    ///
    /// The capacity is clamped to `1..=MAX_ACTIVE_QUESTS`.
    pub fn with_capacity(capacity: usize) -> Self {
        let clamped = capacity.clamp(1, config::MAX_ACTIVE_QUESTS);
        if clamped != capacity {
            warn!("Quest capacity {} clamped to {}", capacity, clamped);
        }
        Self {
            quests: Vec::new(),
            capacity: clamped,
        }
    }

    /// Active quests in the order they were taken.
    pub fn active(&self) -> &[Quest] {
        &self.quests
    }

    /// Number of active quests.
    pub fn len(&self) -> usize {
        self.quests.len()
    }

    /// Whether no quests are active.
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Maximum number of active quests.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether every quest slot is taken.
    pub fn is_full(&self) -> bool {
        self.quests.len() >= self.capacity
    }

    /// Whether an active quest targets the monster.
    pub fn targets(&self, monster_id: &str) -> bool {
        self.quests.iter().any(|q| q.target_monster_id == monster_id)
    }

    /// Ids of every monster targeted by an active quest, regardless of biome.
    pub fn targeted_monsters(&self) -> HashSet<&str> {
        self.quests
            .iter()
            .map(|q| q.target_monster_id.as_str())
            .collect()
    }

    /// Monsters in the biome that no active quest targets, in catalog order.
    fn untargeted_in<'c, C>(&self, biome: Biome, catalog: &'c C) -> Vec<&'c MonsterRecord>
    where
        C: MonsterCatalog + ?Sized,
    {
        let taken = self.targeted_monsters();
        catalog
            .get_monsters_by_biome(biome)
            .into_iter()
            .filter(|monster| !taken.contains(monster.id.as_str()))
            .collect()
    }

    /// Generates a quest against a monster in the hero's biome.
    ///
    /// Never looks outside `biome`; see
    /// [`generate_quest_anywhere`](Self::generate_quest_anywhere) for the
    /// cross-biome retry.
    ///
    /// # Errors
    ///
    /// - [`WildquestError::NoQuestsAvailableInBiome`] when every monster in
    ///   the biome already has an active quest (or the biome is empty)
    /// - [`WildquestError::QuestCapacityFull`] when candidates exist but
    ///   every slot is taken
    pub fn generate_quest<C, R>(
        &mut self,
        biome: Biome,
        catalog: &C,
        rng: &mut R,
    ) -> WildquestResult<Quest>
    where
        C: MonsterCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        let mut candidates = self.untargeted_in(biome, catalog);
        if candidates.is_empty() {
            debug!("All monsters in {} already have quests", biome);
            return Err(WildquestError::NoQuestsAvailableInBiome(biome));
        }

        if self.is_full() {
            return Err(WildquestError::QuestCapacityFull {
                capacity: self.capacity,
            });
        }

        candidates.sort_by(|a, b| a.id.cmp(&b.id));
        let monster = candidates[rng.gen_range(0..candidates.len())];
        Ok(self.accept(Quest::for_monster(monster)))
    }

    /// Generates a quest in `preferred`, then in any other biome.
    ///
    /// This is the explicit second call a caller makes after
    /// [`WildquestError::NoQuestsAvailableInBiome`].
    ///
    /// # Errors
    ///
    /// - [`WildquestError::NoQuestsAvailableAnywhere`] when no biome has an
    ///   untargeted monster left
    /// - [`WildquestError::QuestCapacityFull`] when every slot is taken
    pub fn generate_quest_anywhere<C, R>(
        &mut self,
        preferred: Biome,
        catalog: &C,
        rng: &mut R,
    ) -> WildquestResult<Quest>
    where
        C: MonsterCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        let mut order = vec![preferred];
        order.extend(catalog.biomes().into_iter().filter(|b| *b != preferred));

        for biome in order {
            match self.generate_quest(biome, catalog, rng) {
                Err(WildquestError::NoQuestsAvailableInBiome(_)) => continue,
                other => return other,
            }
        }

        Err(WildquestError::NoQuestsAvailableAnywhere)
    }

    /// Removes and returns the quest targeting the defeated monster, if any.
    ///
    /// The monster becomes eligible for new quests again.
    pub fn complete_quest(&mut self, defeated_monster_id: &str) -> Option<Quest> {
        let index = self
            .quests
            .iter()
            .position(|q| q.target_monster_id == defeated_monster_id)?;
        let quest = self.quests.remove(index);
        info!(
            "Completed quest '{}' for {} XP",
            quest.description, quest.xp_reward
        );
        Some(quest)
    }

    /// Abandons a quest by id without rewarding it.
    pub fn abandon(&mut self, quest_id: QuestId) -> Option<Quest> {
        let index = self.quests.iter().position(|q| q.id == quest_id)?;
        Some(self.quests.remove(index))
    }

    fn accept(&mut self, quest: Quest) -> Quest {
        info!("New quest: {} ({} XP)", quest.description, quest.xp_reward);
        self.quests.push(quest.clone());
        quest
    }
}

impl Default for QuestLedger {
    fn default() -> Self {
        Self::new()
    }
}
