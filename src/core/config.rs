//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. The defaults reproduce the original
//! game's tuning; difficulty and speed tiers are the only knobs a session
//! exposes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Faction;

/// Number of stars generated per session. Fixed for the whole session.
pub const STAR_COUNT: usize = 35;

/// Fixed number of fleet slots per faction. A slot with zero ships is free
/// and may be reused; slots are never allocated beyond this cap.
pub const FLEETS_PER_FACTION: usize = 140;

/// Minimum pairwise distance between generated stars (world units)
pub const MIN_STAR_DISTANCE: f32 = 55.0;

/// Minimum pairwise distance between faction home stars
///
/// Larger than `MIN_STAR_DISTANCE` so no faction starts within easy
/// striking range of another.
pub const MIN_HOME_DISTANCE: f32 = 220.0;

/// Lower-left corner of the star spawn region
pub const SPAWN_MIN: Vec2 = Vec2::new(40.0, 40.0);

/// Upper-right corner of the star spawn region
///
/// The board is 800x600; the bottom strip is reserved for the HUD, so
/// stars spawn in y < 520.
pub const SPAWN_MAX: Vec2 = Vec2::new(760.0, 520.0);

/// Base production progress per second at full infrastructure
pub const PRODUCTION_PER_S: f32 = 0.3;

/// Cosmetic orbit rotation per second. Rendering only, no gameplay effect.
pub const ORBIT_ROTATION_PER_S: f32 = 0.8;

/// Fleet travel speed in world units per second
///
/// Travel time scales with route distance; this is not a fixed trip
/// duration.
pub const FLEET_SPEED_PER_S: f32 = 15.0;

/// Speed multiplier when the destination is owned by the traveling faction
pub const FRIENDLY_ROUTE_BONUS: f32 = 1.5;

/// Two fleets on reciprocal routes closer than this collide
pub const INTERCEPT_RADIUS: f32 = 5.0;

/// One starbase is supported per this many owned stars, plus one for free
pub const STARS_PER_BASE: u32 = 5;

/// Number of completed production cycles to finish a starbase
pub const BASE_BUILD_COST: f32 = 8.0;

/// Defensive strength contributed per starbase build level
pub const BASE_STRENGTH_PER_COST: f32 = 3.0;

/// Production multiplier while a starbase is present (building or built)
pub const BASE_PRODUCTION_BONUS: f32 = 1.5;

/// Seconds between power-history samples
pub const HISTORY_INTERVAL_S: f32 = 0.1;

/// Capacity of the power-history ring buffer
pub const HISTORY_POINTS: usize = 770;

/// Pointer pick radius for hovering a star (world units)
pub const PICK_RADIUS: f32 = 20.0;

/// Drags shorter than this are treated as clicks, not box selections
pub const MIN_DRAG_DISTANCE: f32 = 20.0;

/// Seconds a finished game lingers before falling back to the menu
pub const GAME_OVER_RETURN_DELAY_S: f32 = 10.0;

/// Bounded attempts when placing one home star before the map is rerolled
pub const HOME_PLACEMENT_ATTEMPTS: usize = 4096;

/// Full map regenerations before star-field generation gives up
pub const MAX_GENERATION_RESTARTS: usize = 32;

/// AI difficulty tier, fixed for the whole session
///
/// Scales only two things: how fast AI stars produce relative to the
/// player, and how often AI stars issue movement orders. Both apply
/// uniformly to every AI faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Impossible,
}

impl Difficulty {
    /// Multiplier on production progress for AI-owned stars
    pub fn ai_production_factor(self) -> f32 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Normal => 0.5,
            Difficulty::Hard => 0.8,
            Difficulty::Impossible => 1.2,
        }
    }

    /// Seconds between movement decisions for each AI-owned star
    pub fn ai_movement_delay_s(self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Normal => 2.5,
            Difficulty::Hard => 1.0,
            Difficulty::Impossible => 0.5,
        }
    }
}

/// Game pacing tier, fixed for the whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    /// Quick battle, fast infrastructure buildup
    #[default]
    Action,
    /// Slow, lengthy fight
    Epic,
}

impl SpeedTier {
    /// Time-scale factor exposed to the rendering collaborator
    /// (explosion decay and similar cosmetic pacing)
    pub fn time_scale(self) -> f32 {
        match self {
            SpeedTier::Action => 1.0,
            SpeedTier::Epic => 0.5,
        }
    }

    /// Infrastructure growth per second for owned stars
    pub fn infra_growth_per_s(self) -> f32 {
        match self {
            SpeedTier::Action => 0.03,
            SpeedTier::Epic => 0.015,
        }
    }
}

/// Session configuration, fixed at start
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub speed: SpeedTier,
    /// Which faction index is human-controlled
    pub player_faction: Faction,
}

impl GameConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

/// Per-session tuning derived from the configured tiers once at start
#[derive(Debug, Clone, Copy)]
pub struct SessionRules {
    pub ai_production_factor: f32,
    pub ai_movement_delay_s: f32,
    pub infra_growth_per_s: f32,
    pub time_scale: f32,
}

impl SessionRules {
    pub fn for_config(config: &GameConfig) -> Self {
        Self {
            ai_production_factor: config.difficulty.ai_production_factor(),
            ai_movement_delay_s: config.difficulty.ai_movement_delay_s(),
            infra_growth_per_s: config.speed.infra_growth_per_s(),
            time_scale: config.speed.time_scale(),
        }
    }
}
