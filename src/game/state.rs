//! # Game State Module
//!
//! Per-session progression state, passed explicitly to each operation.
//!
//! `GameState` bundles the hero, the quest ledger and running statistics so a
//! caller can hold, persist and hand around one value. It keeps no hidden
//! globals; every operation takes the catalog and RNG it needs.

use crate::{
    EncounterGenerator, EncounterWeighting, HeroProgress, MonsterCatalog, MonsterRecord, Quest,
    QuestLedger, WildquestError, WildquestResult,
};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Central session state for the progression loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The hero's level, XP and location
    pub hero: HeroProgress,
    /// Active quests
    pub quests: QuestLedger,
    /// Session statistics
    pub statistics: GameStatistics,
    /// Random number generator seed for this session
    pub rng_seed: u64,
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Encounters started
    pub encounters: u32,
    /// Monsters defeated
    pub victories: u32,
    /// Quests completed
    pub quests_completed: u32,
    /// Total XP earned from victories and quests
    pub xp_earned: u64,
}

/// Outcome of defeating a monster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryReport {
    /// XP from the monster plus any completed quest
    pub xp_gained: u32,
    /// Levels the hero gained
    pub levels_gained: u32,
    /// Quest that targeted the monster, if there was one
    pub completed_quest: Option<Quest>,
}

impl GameState {
    /// Creates a new session for the given hero.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::{Biome, GameState, HeroProgress};
    ///
    /// let state = GameState::new(HeroProgress::new(Biome::Grassland), 12345);
    /// assert_eq!(state.hero.level, 1);
    /// assert!(state.quests.is_empty());
    /// assert_eq!(state.rng_seed, 12345);
    /// ```
    pub fn new(hero: HeroProgress, seed: u64) -> Self {
        Self {
            hero,
            quests: QuestLedger::new(),
            statistics: GameStatistics::default(),
            rng_seed: seed,
        }
    }

    /// Picks a monster for the hero to fight in their current biome, using the
    /// generator's band and weighting.
    pub fn enter_area<'c, C, W, R>(
        &mut self,
        generator: &EncounterGenerator<'c, C, W>,
        rng: &mut R,
    ) -> WildquestResult<&'c MonsterRecord>
    where
        C: MonsterCatalog + ?Sized,
        W: EncounterWeighting,
        R: Rng + ?Sized,
    {
        let monster = generator.select(self.hero.level, self.hero.current_biome, rng)?;
        self.statistics.encounters += 1;
        info!(
            "A level {} {} appears in the {}",
            monster.level, monster.name, self.hero.current_biome
        );
        Ok(monster)
    }

    /// Takes a quest in the hero's current biome.
    pub fn request_quest<C, R>(&mut self, catalog: &C, rng: &mut R) -> WildquestResult<Quest>
    where
        C: MonsterCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        self.quests
            .generate_quest(self.hero.current_biome, catalog, rng)
    }

    /// Takes a quest, looking beyond the current biome if it is exhausted.
    pub fn request_quest_anywhere<C, R>(
        &mut self,
        catalog: &C,
        rng: &mut R,
    ) -> WildquestResult<Quest>
    where
        C: MonsterCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        self.quests
            .generate_quest_anywhere(self.hero.current_biome, catalog, rng)
    }

    /// Records a defeated monster: awards its XP and completes any quest on it.
    pub fn record_victory<C>(
        &mut self,
        monster_id: &str,
        catalog: &C,
    ) -> WildquestResult<VictoryReport>
    where
        C: MonsterCatalog + ?Sized,
    {
        let monster = catalog
            .get_monster(monster_id)
            .ok_or_else(|| WildquestError::UnknownMonster(monster_id.to_string()))?;

        let completed_quest = self.quests.complete_quest(monster_id);
        let quest_xp = completed_quest.as_ref().map_or(0, |q| q.xp_reward);
        let xp_gained = monster.xp_reward.saturating_add(quest_xp);
        let levels_gained = self.hero.gain_xp(xp_gained);

        self.statistics.victories += 1;
        self.statistics.xp_earned += xp_gained as u64;
        if completed_quest.is_some() {
            self.statistics.quests_completed += 1;
        }
        if levels_gained > 0 {
            info!("Hero reached level {}", self.hero.level);
        }

        Ok(VictoryReport {
            xp_gained,
            levels_gained,
            completed_quest,
        })
    }

    /// Serializes the session to JSON.
    pub fn to_json(&self) -> WildquestResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a session from JSON.
    ///
    /// A quest ledger that breaks its capacity or duplicate-target rules is
    /// rejected.
    pub fn from_json(json: &str) -> WildquestResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config, Biome, GenerationConfig, InMemoryCatalog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_state(biome: Biome) -> GameState {
        GameState::new(HeroProgress::new(biome), 12345)
    }

    fn session_json(state: &GameState) -> serde_json::Value {
        serde_json::from_str(&state.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_game_state_creation() {
        let state = new_state(Biome::Grassland);
        assert_eq!(state.statistics, GameStatistics::default());
        assert_eq!(state.quests.capacity(), crate::config::MAX_ACTIVE_QUESTS);
    }

    #[test]
    fn test_enter_area_counts_encounters() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Grassland);
        let mut rng = StdRng::seed_from_u64(state.rng_seed);

        let generator = EncounterGenerator::new(&catalog);
        let monster = state.enter_area(&generator, &mut rng).unwrap();
        assert_eq!(monster.biome, Biome::Grassland);
        assert!(monster.level <= 2);
        assert_eq!(state.statistics.encounters, 1);
    }

    #[test]
    fn test_enter_area_uses_configured_band() {
        let catalog = InMemoryCatalog::starter();
        let mut config = GenerationConfig::new(3);
        config.levels_above = 7;
        let generator = EncounterGenerator::from_config(&catalog, &config);
        let mut state = new_state(Biome::Dungeon);
        let mut rng = StdRng::seed_from_u64(config.seed);

        // skeleton (4) and lich (8) are out of reach for a level 1 hero by default
        assert!(state
            .enter_area(&EncounterGenerator::new(&catalog), &mut rng)
            .is_err());

        let monster = state.enter_area(&generator, &mut rng).unwrap();
        assert_eq!(monster.biome, Biome::Dungeon);
        assert_eq!(state.statistics.encounters, 1);
    }

    #[test]
    fn test_enter_area_failure_leaves_state_unchanged() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Swamp);
        let mut rng = StdRng::seed_from_u64(1);

        let result = state.enter_area(&EncounterGenerator::new(&catalog), &mut rng);
        assert!(matches!(result, Err(WildquestError::NoEligibleMonsters { .. })));
        assert_eq!(state.statistics.encounters, 0);
    }

    #[test]
    fn test_victory_completes_quest_and_awards_xp() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Desert);
        let mut rng = StdRng::seed_from_u64(4);

        let quest = state.request_quest(&catalog, &mut rng).unwrap();
        let monster_xp = catalog.get_monster(&quest.target_monster_id).unwrap().xp_reward;

        let report = state
            .record_victory(&quest.target_monster_id, &catalog)
            .unwrap();
        assert_eq!(report.completed_quest, Some(quest.clone()));
        assert_eq!(report.xp_gained, monster_xp + quest.xp_reward);
        assert!(state.quests.is_empty());
        assert_eq!(state.statistics.quests_completed, 1);
        assert_eq!(state.statistics.victories, 1);
    }

    #[test]
    fn test_victory_without_quest() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Grassland);

        let report = state.record_victory("bunny", &catalog).unwrap();
        assert!(report.completed_quest.is_none());
        assert_eq!(report.xp_gained, 10);
        assert_eq!(report.levels_gained, 0);
        assert_eq!(state.hero.xp, 10);
    }

    #[test]
    fn test_victory_levels_up() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Dungeon);

        let report = state.record_victory("lich", &catalog).unwrap();
        assert_eq!(report.levels_gained, 1);
        assert_eq!(state.hero.level, 2);
    }

    #[test]
    fn test_victory_unknown_monster() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Grassland);

        let result = state.record_victory("dragon", &catalog);
        assert!(matches!(result, Err(WildquestError::UnknownMonster(id)) if id == "dragon"));
        assert_eq!(state.statistics.victories, 0);
    }

    #[test]
    fn test_request_quest_anywhere_after_exhaustion() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Ocean);
        let mut rng = StdRng::seed_from_u64(8);

        let first = state.request_quest(&catalog, &mut rng).unwrap();
        assert_eq!(first.target_monster_id, "crab");
        assert!(matches!(
            state.request_quest(&catalog, &mut rng),
            Err(WildquestError::NoQuestsAvailableInBiome(Biome::Ocean))
        ));

        let second = state.request_quest_anywhere(&catalog, &mut rng).unwrap();
        assert_ne!(second.biome, Biome::Ocean);
        assert_eq!(state.quests.len(), 2);
    }

    #[test]
    fn test_json_round_trip_preserves_quests() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Grassland);
        let mut rng = StdRng::seed_from_u64(9);
        state.request_quest(&catalog, &mut rng).unwrap();

        let json = state.to_json().unwrap();
        let restored = GameState::from_json(&json).unwrap();
        assert_eq!(restored.quests.active(), state.quests.active());
        assert_eq!(restored.hero, state.hero);
    }

    #[test]
    fn test_from_json_rejects_overfull_ledger() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Grassland);
        let mut rng = StdRng::seed_from_u64(9);
        state.request_quest(&catalog, &mut rng).unwrap();

        let mut value = session_json(&state);
        let quest = value["quests"]["quests"][0].clone();
        let quests = value["quests"]["quests"].as_array_mut().unwrap();
        for _ in 0..4 {
            quests.push(quest.clone());
        }

        let result = GameState::from_json(&value.to_string());
        assert!(matches!(result, Err(WildquestError::Serde(_))));
    }

    #[test]
    fn test_from_json_rejects_repeated_targets() {
        let catalog = InMemoryCatalog::starter();
        let mut state = new_state(Biome::Grassland);
        let mut rng = StdRng::seed_from_u64(9);
        state.request_quest(&catalog, &mut rng).unwrap();

        let mut value = session_json(&state);
        let quest = value["quests"]["quests"][0].clone();
        value["quests"]["quests"].as_array_mut().unwrap().push(quest);

        assert!(GameState::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_from_json_rejects_bad_capacity() {
        let state = new_state(Biome::Grassland);
        let mut value = session_json(&state);

        value["quests"]["capacity"] = serde_json::json!(0);
        assert!(GameState::from_json(&value.to_string()).is_err());

        value["quests"]["capacity"] = serde_json::json!(config::MAX_ACTIVE_QUESTS + 1);
        assert!(GameState::from_json(&value.to_string()).is_err());
    }
}
