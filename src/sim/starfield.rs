//! Star field generation and per-star economy
//!
//! Stars are stored in one contiguous arena indexed by [`StarId`]; the
//! array is created once per session and never grows or shrinks. Ownership
//! changes only through combat or colonization at fleet arrival.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use crate::core::config::{
    BASE_BUILD_COST, BASE_PRODUCTION_BONUS, HOME_PLACEMENT_ATTEMPTS, MAX_GENERATION_RESTARTS,
    MIN_HOME_DISTANCE, MIN_STAR_DISTANCE, ORBIT_ROTATION_PER_S, PRODUCTION_PER_S, SPAWN_MAX,
    SPAWN_MIN, STAR_COUNT, SessionRules,
};
use crate::core::error::{GameError, Result};
use crate::core::types::{Faction, Owner, StarId};
use crate::sim::fleet::FleetBoard;

#[derive(Debug, Clone, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub owner: Owner,
    /// Ships in orbit
    pub ships: u32,
    /// Production speed multiplier in [0, 1]; resets to 0 on capture
    pub infrastructure: f32,
    /// Progress toward the next completed production cycle, in [0, 1)
    pub production: f32,
    /// None = no starbase. Some(level) counts completed build steps in
    /// [0, BASE_BUILD_COST]; fractional after combat damage.
    pub starbase: Option<f32>,
    /// Newly produced player ships are auto-dispatched to collection points
    pub collection_point: bool,
    pub selected: bool,
    /// Countdown until the owning AI faction issues its next order here
    pub ai_timer: f32,
    /// Cosmetic orbit rotation, exposed to rendering only
    pub orbit: f32,
    /// Stable seed for cosmetic in-orbit jitter; rendering only, so the
    /// renderer's per-frame randomness never touches the gameplay RNG
    pub render_seed: u32,
}

impl Star {
    fn new(pos: Vec2, rules: &SessionRules, rng: &mut ChaCha8Rng) -> Self {
        Self {
            pos,
            owner: Owner::Neutral,
            ships: 0,
            infrastructure: 0.0,
            production: 0.0,
            starbase: None,
            collection_point: false,
            selected: false,
            ai_timer: rng.gen::<f32>() * rules.ai_movement_delay_s,
            orbit: 0.0,
            render_seed: rng.gen(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StarField {
    pub stars: Vec<Star>,
    /// Round-robin cursor over collection points
    collection_cursor: usize,
}

impl StarField {
    /// An empty field, used while the session sits in the menu
    pub fn empty() -> Self {
        Self {
            stars: Vec::new(),
            collection_cursor: 0,
        }
    }

    /// Generate a full field: star positions plus one home star per faction.
    ///
    /// Home placement is rejection-sampled with bounded attempts; if a star
    /// layout admits no valid home assignment the whole map is rerolled.
    /// Deterministic for a given RNG state.
    pub fn generate(rules: &SessionRules, rng: &mut ChaCha8Rng) -> Result<Self> {
        for _ in 0..MAX_GENERATION_RESTARTS {
            let mut field = Self {
                stars: place_stars(rules, rng),
                collection_cursor: 0,
            };
            if field.assign_home_stars(rng) {
                return Ok(field);
            }
            debug!("star layout admitted no home assignment, rerolling map");
        }
        Err(GameError::MapGeneration(format!(
            "no valid home assignment after {MAX_GENERATION_RESTARTS} maps"
        )))
    }

    /// Pick one neutral star per faction with all pairwise home distances
    /// >= MIN_HOME_DISTANCE; the chosen star starts at full infrastructure.
    fn assign_home_stars(&mut self, rng: &mut ChaCha8Rng) -> bool {
        for faction in Faction::all() {
            let mut placed = false;
            for _ in 0..HOME_PLACEMENT_ATTEMPTS {
                let candidate = rng.gen_range(0..self.stars.len());
                if !self.stars[candidate].owner.is_neutral() {
                    continue;
                }
                let too_close = self.stars.iter().enumerate().any(|(i, other)| {
                    i != candidate
                        && !other.owner.is_neutral()
                        && other.pos.distance(self.stars[candidate].pos) < MIN_HOME_DISTANCE
                });
                if too_close {
                    continue;
                }
                self.stars[candidate].owner = Owner::Faction(faction);
                self.stars[candidate].infrastructure = 1.0;
                placed = true;
                break;
            }
            if !placed {
                return false;
            }
        }
        true
    }

    /// Advance infrastructure and production for every owned star.
    ///
    /// A completed cycle builds one starbase step if construction is
    /// ongoing, otherwise one ship. Player ships auto-dispatch toward the
    /// next collection point in round-robin order; if no fleet slot is
    /// free the ship simply stays in orbit.
    pub fn tick(
        &mut self,
        dt: f32,
        rules: &SessionRules,
        fleets: &mut FleetBoard,
        player: Faction,
    ) {
        for s in 0..self.stars.len() {
            self.stars[s].orbit += ORBIT_ROTATION_PER_S * dt;

            let Some(owner) = self.stars[s].owner.faction() else {
                continue;
            };

            let completed = {
                let star = &mut self.stars[s];
                star.infrastructure = (star.infrastructure + rules.infra_growth_per_s * dt).min(1.0);

                let mut rate = PRODUCTION_PER_S * star.infrastructure;
                if owner != player {
                    rate *= rules.ai_production_factor;
                }
                if star.starbase.is_some() {
                    rate *= BASE_PRODUCTION_BONUS;
                }
                star.production += rate * dt;

                if star.production >= 1.0 {
                    star.production = 0.0;
                    true
                } else {
                    false
                }
            };
            if !completed {
                continue;
            }

            match self.stars[s].starbase {
                Some(level) if level < BASE_BUILD_COST => {
                    // Combat damage leaves fractional levels; a rebuild step
                    // never pushes past the finished level
                    self.stars[s].starbase = Some((level + 1.0).min(BASE_BUILD_COST));
                }
                _ => {
                    self.stars[s].ships += 1;
                    if owner == player {
                        if let Some(target) = self.next_collection_point() {
                            self.collection_cursor = target.0;
                            fleets.dispatch(&mut self.stars, StarId(s), target, 1, player);
                        }
                    }
                }
            }
        }
    }

    /// Next active collection point after the cursor, wrapping by index
    fn next_collection_point(&self) -> Option<StarId> {
        let n = self.stars.len();
        (1..=n)
            .map(|offset| (self.collection_cursor + offset) % n)
            .find(|&i| self.stars[i].collection_point)
            .map(StarId)
    }

    pub fn deselect_all(&mut self) {
        for star in &mut self.stars {
            star.selected = false;
        }
    }

    /// Owned-star counts per faction
    pub fn count_by_faction(&self) -> [u32; crate::core::types::FACTION_COUNT] {
        let mut counts = [0; crate::core::types::FACTION_COUNT];
        for star in &self.stars {
            if let Some(faction) = star.owner.faction() {
                counts[faction.idx()] += 1;
            }
        }
        counts
    }
}

/// Rejection-sample positions until every pair is at least
/// MIN_STAR_DISTANCE apart
fn place_stars(rules: &SessionRules, rng: &mut ChaCha8Rng) -> Vec<Star> {
    let mut stars: Vec<Star> = Vec::with_capacity(STAR_COUNT);
    while stars.len() < STAR_COUNT {
        let pos = Vec2::new(
            SPAWN_MIN.x + rng.gen::<f32>() * (SPAWN_MAX.x - SPAWN_MIN.x),
            SPAWN_MIN.y + rng.gen::<f32>() * (SPAWN_MAX.y - SPAWN_MIN.y),
        );
        if stars.iter().all(|s| s.pos.distance(pos) >= MIN_STAR_DISTANCE) {
            stars.push(Star::new(pos, rules, rng));
        }
    }
    stars
}
