//! # Wildquest Demo Entry Point
//!
//! Loads a monster catalog, rolls an encounter, takes quests and plays the
//! attack animation, printing each step.

use clap::Parser;
use log::{error, info, warn};
use std::io::Write;
use wildquest::{
    run_attack_animation_with_interval, AnimationState, AttackAnimation, Biome, GameState,
    GenerationConfig, HeroProgress, InMemoryCatalog, MonsterCatalog, WildquestError,
    WildquestResult,
};

/// Command line arguments for the Wildquest demo.
#[derive(Parser, Debug)]
#[command(name = "wildquest")]
#[command(about = "Encounter, quest and attack-timing demo for a turn-based RPG")]
#[command(version)]
struct Args {
    /// Random seed for selection
    #[arg(short, long)]
    seed: Option<u64>,

    /// Biome files to load (JSON). Uses the built-in starter catalog if omitted
    #[arg(short, long)]
    catalog: Vec<std::path::PathBuf>,

    /// Generation config file (JSON)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Hero level
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Biome the hero starts in
    #[arg(short, long, default_value = "grassland")]
    biome: String,

    /// Number of quests to request
    #[arg(short, long, default_value_t = 3)]
    quests: usize,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Wildquest v{}", wildquest::VERSION);

    if let Err(e) = run(&args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
///
/// `RUST_LOG` takes precedence when set.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn load_catalog(args: &Args) -> WildquestResult<InMemoryCatalog> {
    if args.catalog.is_empty() {
        return Ok(InMemoryCatalog::starter());
    }

    let mut catalog = InMemoryCatalog::new();
    for path in &args.catalog {
        catalog.load_biome_file(path)?;
    }
    info!("Catalog holds {} monsters", catalog.len());
    Ok(catalog)
}

fn load_config(args: &Args) -> WildquestResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Prints a reportable condition with its guidance, or propagates anything else.
fn report(error: WildquestError) -> WildquestResult<()> {
    match error.guidance() {
        Some(guidance) => {
            println!("{}", error);
            println!("  {}", guidance);
            Ok(())
        }
        None => Err(error),
    }
}

async fn run(args: &Args) -> WildquestResult<()> {
    let config = load_config(args)?;
    let catalog = load_catalog(args)?;
    let biome: Biome = args.biome.parse()?;
    let mut rng = wildquest::utils::create_rng(&config);

    let mut state = GameState::new(HeroProgress::at_level(args.level, biome), config.seed);
    state.quests = wildquest::QuestLedger::with_capacity(config.max_active_quests);

    let band = config.level_band(state.hero.level);
    println!(
        "Hero level {} in the {} (encounters at levels {}-{})",
        state.hero.level, biome, band.min_level, band.max_level
    );

    // Encounter
    let generator = wildquest::EncounterGenerator::from_config(&catalog, &config);
    let monster_id = match state.enter_area(&generator, &mut rng) {
        Ok(monster) => {
            println!("A wild {} (level {}) appears!", monster.name, monster.level);
            Some(monster.id.clone())
        }
        Err(e) => {
            report(e)?;
            None
        }
    };

    // Quests
    for _ in 0..args.quests {
        match state.request_quest(&catalog, &mut rng) {
            Ok(quest) => println!("Quest: {} ({} XP)", quest.description, quest.xp_reward),
            Err(e) => report(e)?,
        }
    }

    // Combat
    if let Some(monster_id) = monster_id {
        let monster = catalog
            .get_monster(&monster_id)
            .ok_or_else(|| WildquestError::UnknownMonster(monster_id.clone()))?;
        if !monster.attack_art.is_drawn() {
            warn!("{} has no attack art; showing the resting pose", monster.name);
        }

        let art = monster.attack_art.clone();
        let mut shown = AttackAnimation::new();

        let handle = run_attack_animation_with_interval(
            config.attack_frame_interval(),
            move |attack| {
                let frame = shown.current().unwrap_or_else(AnimationState::initial);
                debug_assert_eq!(frame.is_attack_frame(), attack);
                print!("{:?} ", frame.pose(&art));
                if let Err(e) = std::io::stdout().flush() {
                    warn!("Could not flush stdout: {}", e);
                }
                shown.advance();
            },
            || println!(),
        );
        handle.finished().await;

        let victory = state.record_victory(&monster_id, &catalog)?;
        println!("Defeated {} for {} XP", monster.name, victory.xp_gained);
        if let Some(quest) = victory.completed_quest {
            println!("Quest complete: {}", quest.description);
        }
        if victory.levels_gained > 0 {
            println!("Level up! Now level {}", state.hero.level);
        }
    }

    println!(
        "Encounters: {}  Victories: {}  Quests completed: {}  Active quests: {}",
        state.statistics.encounters,
        state.statistics.victories,
        state.statistics.quests_completed,
        state.quests.len()
    );
    Ok(())
}
