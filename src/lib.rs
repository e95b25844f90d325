//! Galactic Conquest - deterministic RTS simulation core
//!
//! The simulation is single-threaded and tick-based: the harness drives
//! [`sim::session::Session`] through fixed-size steps, and rendering only ever
//! reads the state between steps. All gameplay-affecting randomness flows from
//! one seeded generator per session, so a run is fully reproducible from its
//! seed and input sequence.

pub mod core;
pub mod harness;
pub mod sim;

pub use crate::core::config::GameConfig;
pub use crate::sim::session::{Session, SessionState};
