//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Number of playable factions per session
pub const FACTION_COUNT: usize = 4;

/// One of the playable factions (0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Faction(pub u8);

impl Default for Faction {
    fn default() -> Self {
        Faction(0)
    }
}

impl Faction {
    /// Index into per-faction arrays (fleet slots, star counts, history rows)
    pub fn idx(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every playable faction in index order
    pub fn all() -> impl Iterator<Item = Faction> {
        (0..FACTION_COUNT as u8).map(Faction)
    }
}

/// Who controls a star. Neutral stars never produce and never act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Neutral,
    Faction(Faction),
}

impl Owner {
    pub fn is_neutral(self) -> bool {
        matches!(self, Owner::Neutral)
    }

    pub fn faction(self) -> Option<Faction> {
        match self {
            Owner::Neutral => None,
            Owner::Faction(f) => Some(f),
        }
    }
}

/// Arena index of a star; the star array is fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarId(pub usize);
