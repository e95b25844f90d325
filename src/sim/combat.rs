//! Deterministic combat resolution
//!
//! Applied exactly once when a fleet arrives at a star it does not own.
//! No randomness: outcomes follow from ship counts and starbase level
//! alone, so identical inputs always produce identical results.

use crate::core::config::BASE_STRENGTH_PER_COST;

/// Outcome of a fleet assaulting a star
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssaultOutcome {
    /// Attacker annihilated; the defender keeps the star with this many ships
    Repelled { defender_ships: u32 },
    /// The ship battle was won but the starbase absorbed the remainder;
    /// the fleet is fully consumed and the base is left at this level.
    /// The star keeps its orbiting ships untouched, matching the
    /// original rules: only the base level drops.
    BaseDamaged { level: f32 },
    /// The star falls to the attacker with this many ships left in orbit
    /// (one ship is lost securing the star)
    Captured { ships: u32, base_destroyed: bool },
}

/// Resolve an assault of `attackers` ships against a star holding
/// `defenders` ships and an optional starbase at the given build level.
///
/// Ties go to the defender: an attack with `attackers <= defenders` is
/// always repelled, and a remainder exactly equal to the starbase
/// threshold does not overrun the base (strict greater-than).
pub fn resolve_assault(attackers: u32, defenders: u32, starbase: Option<f32>) -> AssaultOutcome {
    if attackers <= defenders {
        return AssaultOutcome::Repelled {
            defender_ships: defenders - attackers,
        };
    }

    let mut remaining = attackers - defenders;
    let mut base_destroyed = false;

    // A base still at build level zero contributes no defense
    if let Some(level) = starbase {
        if level > 0.0 {
            let threshold = level * BASE_STRENGTH_PER_COST;
            if remaining as f32 > threshold {
                remaining = (remaining as f32 - threshold) as u32;
                base_destroyed = true;
            } else {
                return AssaultOutcome::BaseDamaged {
                    level: level - remaining as f32 / BASE_STRENGTH_PER_COST,
                };
            }
        }
    }

    AssaultOutcome::Captured {
        ships: remaining.saturating_sub(1),
        base_destroyed,
    }
}
