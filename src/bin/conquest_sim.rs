//! Headless Galactic Conquest runner
//!
//! Runs a full session without a renderer and reports the outcome; with a
//! fixed seed, repeated runs are identical. The player faction receives no
//! input, so this is effectively AI-vs-AI plus one passive faction —
//! useful for balance checks and determinism smoke tests.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use galactic_conquest::core::config::{Difficulty, GameConfig, SpeedTier};
use galactic_conquest::core::error::Result;
use galactic_conquest::core::types::{Faction, FACTION_COUNT};
use galactic_conquest::harness::FIXED_STEP_S;
use galactic_conquest::{Session, SessionState};

#[derive(Parser, Debug)]
#[command(name = "conquest_sim")]
#[command(about = "Run a headless galactic conquest session and report the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// AI difficulty: easy, normal, hard, impossible
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Game pacing: action or epic
    #[arg(long, default_value = "action")]
    speed: String,

    /// Which faction index (0-3) is the passive "player"
    #[arg(long, default_value_t = 0)]
    player: u8,

    /// Maximum simulation ticks before the run is cut off
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    /// Optional TOML config file; command-line tiers override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct RunSummary {
    outcome: String,
    ticks: u64,
    seed: u64,
    stars_per_faction: [u32; FACTION_COUNT],
    history_samples: usize,
    history_wrapped: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "galactic_conquest=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    config.difficulty = parse_difficulty(&args.difficulty);
    config.speed = parse_speed(&args.speed);
    config.player_faction = Faction(args.player.min(FACTION_COUNT as u8 - 1));

    let mut session = Session::new(config, args.seed);
    session.start_game()?;

    let mut ticks = 0u64;
    while session.state() == SessionState::Playing && ticks < args.max_ticks {
        session.update(FIXED_STEP_S);
        ticks += 1;
    }

    let outcome = match session.state() {
        SessionState::GameOver { victory: true, .. } => "victory",
        SessionState::GameOver { victory: false, .. } => "defeat",
        _ => "timeout",
    };

    let summary = RunSummary {
        outcome: outcome.to_string(),
        ticks,
        seed: args.seed,
        stars_per_faction: *session.stars_per_faction(),
        history_samples: session.history.len(),
        history_wrapped: session.history.is_wrapped(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Galactic Conquest headless run");
        println!("==============================");
        println!("Seed:       {}", summary.seed);
        println!("Outcome:    {} after {} ticks", summary.outcome, summary.ticks);
        println!(
            "            ({:.1}s of game time)",
            summary.ticks as f32 * FIXED_STEP_S
        );
        for (i, stars) in summary.stars_per_faction.iter().enumerate() {
            println!("Faction {i}:  {stars} stars");
        }
        println!(
            "History:    {} samples{}",
            summary.history_samples,
            if summary.history_wrapped { " (wrapped)" } else { "" }
        );
    }

    Ok(())
}

fn parse_difficulty(text: &str) -> Difficulty {
    match text {
        "easy" => Difficulty::Easy,
        "hard" => Difficulty::Hard,
        "impossible" => Difficulty::Impossible,
        _ => Difficulty::Normal,
    }
}

fn parse_speed(text: &str) -> SpeedTier {
    match text {
        "epic" => SpeedTier::Epic,
        _ => SpeedTier::Action,
    }
}
