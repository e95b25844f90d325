//! AI movement decisions
//!
//! Every AI-owned star keeps its own decision timer. When it expires the
//! star throws everything it has at the nearest star it does not own —
//! neutral or enemy alike. Difficulty only changes the cadence (and,
//! elsewhere, the production multiplier); the targeting rule is fixed.

use tracing::trace;

use crate::core::config::SessionRules;
use crate::core::types::{Faction, Owner, StarId};
use crate::sim::fleet::FleetBoard;
use crate::sim::starfield::{Star, StarField};

/// Advance every AI decision timer and issue movement orders for the ones
/// that expired. A star with no free fleet slot skips its turn; the timer
/// still resets, so the decision is simply retried a full cadence later.
pub fn tick(
    field: &mut StarField,
    fleets: &mut FleetBoard,
    player: Faction,
    rules: &SessionRules,
    dt: f32,
) {
    for s in 0..field.stars.len() {
        let owner = match field.stars[s].owner {
            Owner::Faction(f) if f != player => f,
            _ => continue,
        };

        field.stars[s].ai_timer -= dt;
        if field.stars[s].ai_timer > 0.0 {
            continue;
        }
        field.stars[s].ai_timer = rules.ai_movement_delay_s;

        let ships = field.stars[s].ships;
        if ships == 0 {
            continue;
        }

        if let Some(target) = nearest_foreign_star(&field.stars, s, owner) {
            trace!(from = s, to = target.0, ?owner, ships, "ai attack order");
            fleets.dispatch(&mut field.stars, StarId(s), target, ships, owner);
        }
    }
}

/// Closest star not owned by `owner`, ties broken by lowest index
fn nearest_foreign_star(stars: &[Star], from: usize, owner: Faction) -> Option<StarId> {
    let mut closest = None;
    let mut closest_dist = f32::MAX;
    for (i, star) in stars.iter().enumerate() {
        if i == from || star.owner == Owner::Faction(owner) {
            continue;
        }
        let dist = stars[from].pos.distance(star.pos);
        if dist < closest_dist {
            closest = Some(StarId(i));
            closest_dist = dist;
        }
    }
    closest
}
