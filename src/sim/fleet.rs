//! Fleet movement, interception and arrival resolution
//!
//! Each faction owns a fixed-size array of fleet slots; a slot with zero
//! ships is free and may be reused. Ships only leave a star's orbit after a
//! free slot has been claimed, so a dispatch with no free slot is a silent
//! no-op rather than an error.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::config::{
    FLEETS_PER_FACTION, FLEET_SPEED_PER_S, FRIENDLY_ROUTE_BONUS, INTERCEPT_RADIUS,
};
use crate::core::types::{Faction, Owner, StarId, FACTION_COUNT};
use crate::sim::combat::{resolve_assault, AssaultOutcome};
use crate::sim::events::SimEvent;
use crate::sim::starfield::Star;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FleetSlot {
    pub origin: StarId,
    pub dest: StarId,
    /// Zero means the slot is free; a free slot is never advanced or drawn
    pub ships: u32,
    /// Route progress in [0, 1] while occupied
    pub progress: f32,
    /// Stable seed for cosmetic formation jitter, rendering only
    pub render_seed: u32,
}

impl FleetSlot {
    fn free(rng: &mut ChaCha8Rng) -> Self {
        Self {
            origin: StarId(0),
            dest: StarId(0),
            ships: 0,
            progress: 0.0,
            render_seed: rng.gen(),
        }
    }

    /// Interpolated position along the route at current progress
    pub fn position(&self, stars: &[Star]) -> Vec2 {
        let from = stars[self.origin.0].pos;
        let to = stars[self.dest.0].pos;
        from + (to - from) * self.progress
    }
}

/// All in-flight fleets, organized per faction
#[derive(Debug, Clone, Serialize)]
pub struct FleetBoard {
    slots: Vec<Vec<FleetSlot>>,
}

impl FleetBoard {
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        Self {
            slots: (0..FACTION_COUNT)
                .map(|_| (0..FLEETS_PER_FACTION).map(|_| FleetSlot::free(rng)).collect())
                .collect(),
        }
    }

    pub fn slots(&self, faction: Faction) -> &[FleetSlot] {
        &self.slots[faction.idx()]
    }

    /// Occupied slots for one faction
    pub fn active(&self, faction: Faction) -> impl Iterator<Item = &FleetSlot> {
        self.slots[faction.idx()].iter().filter(|s| s.ships > 0)
    }

    /// Send `ships` from `origin` toward `dest`.
    ///
    /// Preconditions are policy, not errors: the origin must be owned by
    /// `faction` and hold at least `ships`; a free slot must exist. On any
    /// failure nothing changes and `false` is returned — the caller retries
    /// (or not) on a later tick. Ships are removed from orbit only after
    /// the slot is claimed.
    pub fn dispatch(
        &mut self,
        stars: &mut [Star],
        origin: StarId,
        dest: StarId,
        ships: u32,
        faction: Faction,
    ) -> bool {
        if ships == 0 {
            return false;
        }
        let Some(star) = stars.get_mut(origin.0) else {
            return false;
        };
        if star.owner != Owner::Faction(faction) || ships > star.ships {
            return false;
        }
        let Some(slot) = self.slots[faction.idx()].iter_mut().find(|s| s.ships == 0) else {
            trace!(?faction, from = origin.0, "no free fleet slot, dispatch deferred");
            return false;
        };

        star.ships -= ships;
        slot.origin = origin;
        slot.dest = dest;
        slot.ships = ships;
        slot.progress = 0.0;
        true
    }

    /// Zero every slot of one faction (used when the faction is eliminated)
    pub fn disband(&mut self, faction: Faction) {
        for slot in &mut self.slots[faction.idx()] {
            slot.ships = 0;
        }
    }

    /// Advance every occupied slot, resolve interceptions on reciprocal
    /// routes, and handle arrivals.
    ///
    /// Interception is checked immediately after each fleet moves, against
    /// all enemy fleets flying the opposite route; both sides lose the
    /// other's pre-exchange strength, clamped at zero. Arrival merges into
    /// a friendly orbit or resolves combat, and frees the slot either way.
    pub fn tick(&mut self, stars: &mut [Star], dt: f32, events: &mut Vec<SimEvent>) {
        for r in 0..FACTION_COUNT {
            let faction = Faction(r as u8);
            for fl in 0..FLEETS_PER_FACTION {
                if self.slots[r][fl].ships == 0 {
                    continue;
                }

                let origin = self.slots[r][fl].origin;
                let dest = self.slots[r][fl].dest;
                let route = stars[origin.0].pos.distance(stars[dest.0].pos);
                let mut speed = FLEET_SPEED_PER_S;
                if stars[dest.0].owner == Owner::Faction(faction) {
                    // Warp accelerators between owned stars
                    speed *= FRIENDLY_ROUTE_BONUS;
                }
                self.slots[r][fl].progress += speed / route * dt;

                self.check_interceptions(stars, r, fl, events);

                if self.slots[r][fl].ships > 0 && self.slots[r][fl].progress >= 1.0 {
                    self.resolve_arrival(stars, faction, fl, events);
                }
            }
        }
    }

    /// Symmetric exchange against every enemy fleet on the reciprocal route
    /// within the interception radius
    fn check_interceptions(
        &mut self,
        stars: &[Star],
        r: usize,
        fl: usize,
        events: &mut Vec<SimEvent>,
    ) {
        let (origin, dest) = (self.slots[r][fl].origin, self.slots[r][fl].dest);
        for er in 0..FACTION_COUNT {
            if er == r {
                continue;
            }
            for efl in 0..FLEETS_PER_FACTION {
                let ours = self.slots[r][fl].ships;
                if ours == 0 {
                    return;
                }
                let enemy = self.slots[er][efl];
                if enemy.ships == 0 || enemy.origin != dest || enemy.dest != origin {
                    continue;
                }
                let here = self.slots[r][fl].position(stars);
                if here.distance(enemy.position(stars)) >= INTERCEPT_RADIUS {
                    continue;
                }

                self.slots[er][efl].ships = enemy.ships.saturating_sub(ours);
                self.slots[r][fl].ships = ours.saturating_sub(enemy.ships);
                events.push(SimEvent::Explosion { pos: here });
                debug!(
                    route = ?(origin.0, dest.0),
                    ours,
                    theirs = enemy.ships,
                    "fleets intercepted"
                );
            }
        }
    }

    /// Merge into a friendly orbit, or fight for the star. The slot is
    /// freed unconditionally once the arrival is processed.
    fn resolve_arrival(
        &mut self,
        stars: &mut [Star],
        faction: Faction,
        fl: usize,
        events: &mut Vec<SimEvent>,
    ) {
        let slot = &mut self.slots[faction.idx()][fl];
        let dest = slot.dest;
        let ships = slot.ships;
        slot.ships = 0;

        let star = &mut stars[dest.0];
        if star.owner == Owner::Faction(faction) {
            star.ships += ships;
            return;
        }

        if !star.owner.is_neutral() {
            events.push(SimEvent::Explosion { pos: star.pos });
        }

        match resolve_assault(ships, star.ships, star.starbase) {
            AssaultOutcome::Repelled { defender_ships } => {
                star.ships = defender_ships;
            }
            AssaultOutcome::BaseDamaged { level } => {
                star.starbase = Some(level);
            }
            AssaultOutcome::Captured { ships, .. } => {
                debug!(star = dest.0, by = ?faction, "star captured");
                star.owner = Owner::Faction(faction);
                star.ships = ships;
                star.infrastructure = 0.0;
                star.production = 0.0;
                star.starbase = None;
                events.push(SimEvent::StarCaptured {
                    star: dest,
                    by: faction,
                });
            }
        }
    }
}
