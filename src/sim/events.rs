//! Events generated during a simulation tick
//!
//! These are consumed by the rendering collaborator (explosion particles,
//! end-of-game banner); the core does not track them further. Draining the
//! queue is the renderer's job and has no gameplay effect.

use glam::Vec2;
use serde::Serialize;

use crate::core::types::{Faction, StarId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SimEvent {
    /// Fleets met mid-route, or an arrival contested a non-neutral star
    Explosion { pos: Vec2 },
    /// A star changed hands through combat or colonization
    StarCaptured { star: StarId, by: Faction },
    /// The session reached a terminal state
    GameEnded { victory: bool },
}
