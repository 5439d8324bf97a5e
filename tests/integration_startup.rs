//! Integration test to ensure a session can start up and play a round without errors.

use rand::{rngs::StdRng, SeedableRng};
use wildquest::{
    Biome, EncounterGenerator, GameState, GenerationConfig, HeroProgress, InMemoryCatalog,
    MonsterCatalog, WildquestResult,
};

#[test]
fn test_basic_startup() -> WildquestResult<()> {
    let config = GenerationConfig::for_testing(12345);
    let catalog = InMemoryCatalog::starter();
    let mut rng = wildquest::utils::create_rng(&config);

    let mut game_state = GameState::new(HeroProgress::new(Biome::Grassland), config.seed);

    // Verify the game state is properly initialized
    assert_eq!(game_state.hero.level, 1);
    assert!(game_state.quests.is_empty());
    assert_eq!(game_state.statistics.encounters, 0);

    let generator = EncounterGenerator::from_config(&catalog, &config);
    let monster = game_state.enter_area(&generator, &mut rng)?;
    assert_eq!(monster.biome, Biome::Grassland);
    let monster_id = monster.id.clone();

    let quest = game_state.request_quest(&catalog, &mut rng)?;
    assert_eq!(quest.biome, Biome::Grassland);

    game_state.record_victory(&monster_id, &catalog)?;
    assert_eq!(game_state.statistics.victories, 1);
    assert!(game_state.hero.xp > 0 || game_state.hero.level > 1);

    Ok(())
}

#[test]
fn test_starter_catalog_is_well_formed() {
    let catalog = InMemoryCatalog::starter();
    assert!(!catalog.is_empty());

    for biome in catalog.biomes() {
        for monster in catalog.get_monsters_by_biome(biome) {
            assert_eq!(monster.biome, biome);
            assert!(monster.level >= 1);
            assert_eq!(catalog.get_monster(&monster.id), Some(monster));
        }
    }
}

#[test]
fn test_full_session_round_trip() -> WildquestResult<()> {
    let catalog = InMemoryCatalog::starter();
    let mut rng = StdRng::seed_from_u64(77);
    let mut game_state = GameState::new(HeroProgress::new(Biome::Dungeon), 77);

    game_state.request_quest(&catalog, &mut rng)?;
    game_state.request_quest(&catalog, &mut rng)?;

    let restored = GameState::from_json(&game_state.to_json()?)?;
    assert_eq!(restored.quests.len(), 2);
    assert!(restored.quests.targets("skeleton"));
    assert!(restored.quests.targets("lich"));

    Ok(())
}
