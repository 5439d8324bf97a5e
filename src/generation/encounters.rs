//! # Encounter Generation
//!
//! Level-gated, biome-scoped monster selection for random encounters.
//!
//! The eligible band runs from two levels below the hero to one level above,
//! never below level 1. Selection never leaves the requested biome; an empty
//! band is reported to the caller as [`WildquestError::NoEligibleMonsters`].

use crate::{
    config, Biome, GenerationConfig, Generator, HeroProgress, MonsterCatalog, MonsterRecord,
    WildquestError, WildquestResult,
};
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive range of monster levels eligible for an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBand {
    pub min_level: u32,
    pub max_level: u32,
}

impl LevelBand {
    /// The standard band for a hero level.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::LevelBand;
    ///
    /// let band = LevelBand::for_hero(4);
    /// assert_eq!((band.min_level, band.max_level), (2, 5));
    ///
    /// let band = LevelBand::for_hero(1);
    /// assert_eq!((band.min_level, band.max_level), (1, 2));
    /// ```
    pub fn for_hero(hero_level: u32) -> Self {
        Self::with_window(
            hero_level,
            config::LEVELS_BELOW_HERO,
            config::LEVELS_ABOVE_HERO,
        )
    }

    /// A band with a custom window. The minimum is never below 1 and never
    /// above the maximum.
    pub fn with_window(hero_level: u32, below: u32, above: u32) -> Self {
        let min_level = hero_level.saturating_sub(below).max(1);
        let max_level = hero_level.saturating_add(above).max(min_level);
        Self {
            min_level,
            max_level,
        }
    }

    /// Whether a monster level falls inside the band.
    pub fn contains(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

/// Policy for choosing among eligible monsters.
pub trait EncounterWeighting {
    /// Picks one candidate. Returns `None` only if `candidates` is empty.
    fn choose<'c, R>(
        &self,
        hero_level: u32,
        candidates: &[&'c MonsterRecord],
        rng: &mut R,
    ) -> Option<&'c MonsterRecord>
    where
        R: Rng + ?Sized;
}

/// Every eligible monster is equally likely. The default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformWeighting;

impl EncounterWeighting for UniformWeighting {
    fn choose<'c, R>(
        &self,
        _hero_level: u32,
        candidates: &[&'c MonsterRecord],
        rng: &mut R,
    ) -> Option<&'c MonsterRecord>
    where
        R: Rng + ?Sized,
    {
        candidates.choose(rng).copied()
    }
}

/// Monsters closer to the hero's level are more likely.
///
/// A monster at the hero's level weighs `spread + 1`; each level of distance
/// removes one, down to a floor of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProximityWeighting {
    pub spread: u32,
}

impl Default for LevelProximityWeighting {
    fn default() -> Self {
        Self {
            spread: config::LEVELS_BELOW_HERO + config::LEVELS_ABOVE_HERO,
        }
    }
}

impl LevelProximityWeighting {
    fn weight(&self, hero_level: u32, monster_level: u32) -> u32 {
        (self.spread + 1)
            .saturating_sub(hero_level.abs_diff(monster_level))
            .max(1)
    }
}

impl EncounterWeighting for LevelProximityWeighting {
    fn choose<'c, R>(
        &self,
        hero_level: u32,
        candidates: &[&'c MonsterRecord],
        rng: &mut R,
    ) -> Option<&'c MonsterRecord>
    where
        R: Rng + ?Sized,
    {
        let weights = candidates
            .iter()
            .map(|monster| self.weight(hero_level, monster.level));
        let index = WeightedIndex::new(weights).ok()?;
        Some(candidates[index.sample(rng)])
    }
}

/// Monsters in `biome` whose level lies inside `band`, in catalog order.
pub fn eligible_monsters<'c, C>(
    biome: Biome,
    band: LevelBand,
    catalog: &'c C,
) -> Vec<&'c MonsterRecord>
where
    C: MonsterCatalog + ?Sized,
{
    catalog
        .get_monsters_by_biome(biome)
        .into_iter()
        .filter(|monster| monster.biome == biome && band.contains(monster.level))
        .collect()
}

/// Picks a uniformly random monster for a hero of `hero_level` in `biome`.
///
/// # Errors
///
/// [`WildquestError::NoEligibleMonsters`] when no monster in the biome falls
/// inside the hero's level band. No other biome is consulted.
pub fn select_encounter<'c, C, R>(
    hero_level: u32,
    biome: Biome,
    catalog: &'c C,
    rng: &mut R,
) -> WildquestResult<&'c MonsterRecord>
where
    C: MonsterCatalog + ?Sized,
    R: Rng + ?Sized,
{
    select_weighted(
        hero_level,
        biome,
        LevelBand::for_hero(hero_level),
        catalog,
        &UniformWeighting,
        rng,
    )
}

fn select_weighted<'c, C, W, R>(
    hero_level: u32,
    biome: Biome,
    band: LevelBand,
    catalog: &'c C,
    weighting: &W,
    rng: &mut R,
) -> WildquestResult<&'c MonsterRecord>
where
    C: MonsterCatalog + ?Sized,
    W: EncounterWeighting + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = eligible_monsters(biome, band, catalog);
    debug!(
        "{} candidates in {} for levels {}-{}",
        candidates.len(),
        biome,
        band.min_level,
        band.max_level
    );

    weighting
        .choose(hero_level, &candidates, rng)
        .ok_or(WildquestError::NoEligibleMonsters {
            biome,
            min_level: band.min_level,
            max_level: band.max_level,
        })
}

/// Encounter selector bound to a catalog, a band window and a weighting policy.
pub struct EncounterGenerator<'c, C: ?Sized, W = UniformWeighting> {
    catalog: &'c C,
    levels_below: u32,
    levels_above: u32,
    weighting: W,
}

impl<'c, C: MonsterCatalog + ?Sized> EncounterGenerator<'c, C, UniformWeighting> {
    /// Creates a uniform selector with the standard band.
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            levels_below: config::LEVELS_BELOW_HERO,
            levels_above: config::LEVELS_ABOVE_HERO,
            weighting: UniformWeighting,
        }
    }

    /// Creates a uniform selector using the band from `config`.
    pub fn from_config(catalog: &'c C, config: &GenerationConfig) -> Self {
        Self {
            catalog,
            levels_below: config.levels_below,
            levels_above: config.levels_above,
            weighting: UniformWeighting,
        }
    }
}

impl<'c, C: MonsterCatalog + ?Sized, W: EncounterWeighting> EncounterGenerator<'c, C, W> {
    /// Replaces the weighting policy.
    pub fn with_weighting<V: EncounterWeighting>(
        self,
        weighting: V,
    ) -> EncounterGenerator<'c, C, V> {
        EncounterGenerator {
            catalog: self.catalog,
            levels_below: self.levels_below,
            levels_above: self.levels_above,
            weighting,
        }
    }

    /// The band this selector uses for a hero level.
    pub fn band_for(&self, hero_level: u32) -> LevelBand {
        LevelBand::with_window(hero_level, self.levels_below, self.levels_above)
    }

    /// Selects an encounter for a hero level in a biome.
    pub fn select<R: Rng + ?Sized>(
        &self,
        hero_level: u32,
        biome: Biome,
        rng: &mut R,
    ) -> WildquestResult<&'c MonsterRecord> {
        select_weighted(
            hero_level,
            biome,
            self.band_for(hero_level),
            self.catalog,
            &self.weighting,
            rng,
        )
    }
}

impl<'c, C: MonsterCatalog + ?Sized, W: EncounterWeighting> Generator<&'c MonsterRecord>
    for EncounterGenerator<'c, C, W>
{
    fn generate(
        &self,
        hero: &HeroProgress,
        rng: &mut StdRng,
    ) -> WildquestResult<&'c MonsterRecord> {
        self.select(hero.level, hero.current_biome, rng)
    }

    fn validate(&self, content: &&'c MonsterRecord, hero: &HeroProgress) -> WildquestResult<()> {
        let band = self.band_for(hero.level);
        if content.biome != hero.current_biome {
            return Err(WildquestError::InvalidState(format!(
                "{} lives in {}, not {}",
                content.name, content.biome, hero.current_biome
            )));
        }
        if !band.contains(content.level) {
            return Err(WildquestError::InvalidState(format!(
                "{} is level {}, outside {}-{}",
                content.name, content.level, band.min_level, band.max_level
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
