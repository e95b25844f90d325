//! The galactic conquest simulation engine
//!
//! Single-threaded and tick-based. Per-tick ordering is fixed by
//! [`session::Session::update`]: input sampling, hover and bookkeeping,
//! history sampling, fleet advance/interception/arrival, star production,
//! AI decisions, win/loss check. No step suspends or yields; rendering
//! only ever observes the state between ticks.

pub mod ai;
pub mod combat;
pub mod command;
pub mod events;
pub mod fleet;
pub mod history;
pub mod session;
pub mod starfield;
