//! # Monster Catalog
//!
//! Read-only monster records and the query interface the core consumes.
//!
//! Biome files are JSON objects keyed by monster id. Records loaded from
//! several files share one id space; a repeated id is rejected instead of
//! silently replacing the earlier record.

use crate::{config, Biome, MonsterId, WildquestError, WildquestResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Attack artwork for a monster, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackArt {
    /// Image shown on attack-pose frames
    Image(String),
    /// No attack art; the plain pose is kept for the whole animation
    None,
}

impl AttackArt {
    /// Resolves the two legacy field names into one value.
    ///
    /// `art_attack` wins when both are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::AttackArt;
    ///
    /// let art = AttackArt::resolve(Some("x.png".into()), Some("y.png".into()));
    /// assert_eq!(art, AttackArt::Image("x.png".into()));
    /// assert_eq!(AttackArt::resolve(None, None), AttackArt::None);
    /// ```
    pub fn resolve(art_attack: Option<String>, attack_art: Option<String>) -> Self {
        match art_attack.or(attack_art) {
            Some(path) => AttackArt::Image(path),
            None => AttackArt::None,
        }
    }

    /// The image path, if any.
    pub fn image(&self) -> Option<&str> {
        match self {
            AttackArt::Image(path) => Some(path),
            AttackArt::None => None,
        }
    }

    /// Whether an attack image will be drawn.
    pub fn is_drawn(&self) -> bool {
        matches!(self, AttackArt::Image(_))
    }
}

/// A monster's stat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    /// Unique identifier across the whole catalog
    pub id: MonsterId,
    /// Display name
    pub name: String,
    /// Monster level, at least 1
    pub level: u32,
    /// Hit points
    pub hp: u32,
    /// Attack strength
    pub attack: u32,
    /// Biome the monster lives in
    pub biome: Biome,
    /// XP awarded for defeating it
    pub xp_reward: u32,
    /// Artwork for the resting pose
    pub art_normal: Option<String>,
    /// Artwork for the attack pose
    pub attack_art: AttackArt,
    /// Sound played when it attacks
    pub attack_sound: String,
}

impl MonsterRecord {
    /// Creates a record with no artwork and the default attack sound.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildquest::{Biome, MonsterRecord};
    ///
    /// let spider = MonsterRecord::new("spider", "Spider", 2, Biome::Grassland);
    /// assert_eq!(spider.level, 2);
    /// assert!(!spider.attack_art.is_drawn());
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: u32, biome: Biome) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: level.max(1),
            hp: 10,
            attack: 1,
            biome,
            xp_reward: level.max(1).saturating_mul(10),
            art_normal: None,
            attack_art: AttackArt::None,
            attack_sound: config::DEFAULT_ATTACK_SOUND.to_string(),
        }
    }

    /// Sets the XP reward.
    pub fn with_xp_reward(mut self, xp_reward: u32) -> Self {
        self.xp_reward = xp_reward;
        self
    }

    /// Sets hit points and attack.
    pub fn with_stats(mut self, hp: u32, attack: u32) -> Self {
        self.hp = hp;
        self.attack = attack;
        self
    }

    /// Sets the attack artwork.
    pub fn with_attack_art(mut self, path: impl Into<String>) -> Self {
        self.attack_art = AttackArt::Image(path.into());
        self
    }
}

/// Monster entry as written in a biome file.
#[derive(Debug, Deserialize)]
struct RawMonster {
    name: String,
    level: u32,
    #[serde(default)]
    hp: u32,
    #[serde(default)]
    attack: u32,
    biome: Biome,
    #[serde(default)]
    xp_reward: u32,
    art_normal: Option<String>,
    art_attack: Option<String>,
    attack_art: Option<String>,
    attack_sound: Option<String>,
}

impl RawMonster {
    fn into_record(self, id: MonsterId) -> WildquestResult<MonsterRecord> {
        if self.level == 0 {
            return Err(WildquestError::InvalidState(format!(
                "Monster {} has level 0",
                id
            )));
        }

        Ok(MonsterRecord {
            id,
            name: self.name,
            level: self.level,
            hp: self.hp,
            attack: self.attack,
            biome: self.biome,
            xp_reward: self.xp_reward,
            art_normal: self.art_normal,
            attack_art: AttackArt::resolve(self.art_attack, self.attack_art),
            attack_sound: self
                .attack_sound
                .unwrap_or_else(|| config::DEFAULT_ATTACK_SOUND.to_string()),
        })
    }
}

/// Query interface over a monster catalog.
///
/// Records are read-only to the core. Implementations must return biome
/// results in a stable order so seeded selection is reproducible.
pub trait MonsterCatalog {
    /// All monsters living in the biome.
    fn get_monsters_by_biome(&self, biome: Biome) -> Vec<&MonsterRecord>;

    /// Looks up a monster by id.
    fn get_monster(&self, id: &str) -> Option<&MonsterRecord>;

    /// Biomes with at least one monster.
    fn biomes(&self) -> Vec<Biome>;
}

/// Catalog held entirely in memory, keyed by monster id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    monsters: BTreeMap<MonsterId, MonsterRecord>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from records, rejecting duplicate ids.
    pub fn from_records(records: impl IntoIterator<Item = MonsterRecord>) -> WildquestResult<Self> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Parses a single biome file's contents.
    pub fn from_json_str(json: &str) -> WildquestResult<Self> {
        let mut catalog = Self::new();
        catalog.extend_from_json_str(json)?;
        Ok(catalog)
    }

    /// Adds a record. Fails if the id is already present.
    pub fn insert(&mut self, record: MonsterRecord) -> WildquestResult<()> {
        if self.monsters.contains_key(&record.id) {
            warn!("Rejecting duplicate monster id {}", record.id);
            return Err(WildquestError::DuplicateMonster(record.id));
        }
        self.monsters.insert(record.id.clone(), record);
        Ok(())
    }

    /// Merges the monsters from a biome file's contents.
    ///
    /// The merge is all-or-nothing: a bad entry leaves the catalog unchanged.
    pub fn extend_from_json_str(&mut self, json: &str) -> WildquestResult<usize> {
        let raw: BTreeMap<MonsterId, RawMonster> = serde_json::from_str(json)?;

        let mut records = Vec::with_capacity(raw.len());
        for (id, entry) in raw {
            if self.monsters.contains_key(&id) {
                warn!("Rejecting duplicate monster id {}", id);
                return Err(WildquestError::DuplicateMonster(id));
            }
            records.push(entry.into_record(id)?);
        }

        let count = records.len();
        for record in records {
            self.monsters.insert(record.id.clone(), record);
        }
        Ok(count)
    }

    /// Loads a biome file from disk into the catalog.
    pub fn load_biome_file(&mut self, path: impl AsRef<Path>) -> WildquestResult<usize> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let count = self.extend_from_json_str(&contents)?;
        debug!("Loaded {} monsters from {}", count, path.display());
        Ok(count)
    }

    /// Number of monsters in the catalog.
    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Iterates over all records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterRecord> {
        self.monsters.values()
    }

    /// A small catalog spanning several biomes, used by the demo binary.
    pub fn starter() -> Self {
        let records = vec![
            MonsterRecord::new("bunny", "Bunny", 1, Biome::Grassland)
                .with_stats(8, 1)
                .with_xp_reward(10),
            MonsterRecord::new("spider", "Spider", 2, Biome::Grassland)
                .with_stats(14, 3)
                .with_xp_reward(20)
                .with_attack_art("art/spider_attack.png"),
            MonsterRecord::new("flytrap", "Flytrap", 3, Biome::Grassland)
                .with_stats(20, 4)
                .with_xp_reward(30),
            MonsterRecord::new("scorpion", "Scorpion", 2, Biome::Desert)
                .with_stats(16, 4)
                .with_xp_reward(25)
                .with_attack_art("art/scorpion_attack.png"),
            MonsterRecord::new("sandworm", "Sandworm", 5, Biome::Desert)
                .with_stats(45, 7)
                .with_xp_reward(60),
            MonsterRecord::new("crab", "Crab", 1, Biome::Ocean)
                .with_stats(10, 2)
                .with_xp_reward(12),
            MonsterRecord::new("skeleton", "Skeleton", 4, Biome::Dungeon)
                .with_stats(30, 6)
                .with_xp_reward(45),
            MonsterRecord::new("lich", "Lich", 8, Biome::Dungeon)
                .with_stats(80, 12)
                .with_xp_reward(150),
        ];

        let mut catalog = Self::new();
        for record in records {
            catalog.monsters.insert(record.id.clone(), record);
        }
        catalog
    }
}

impl MonsterCatalog for InMemoryCatalog {
    fn get_monsters_by_biome(&self, biome: Biome) -> Vec<&MonsterRecord> {
        self.monsters
            .values()
            .filter(|monster| monster.biome == biome)
            .collect()
    }

    fn get_monster(&self, id: &str) -> Option<&MonsterRecord> {
        self.monsters.get(id)
    }

    fn biomes(&self) -> Vec<Biome> {
        let mut biomes: Vec<Biome> = self.monsters.values().map(|m| m.biome).collect();
        biomes.sort();
        biomes.dedup();
        biomes
    }
}
