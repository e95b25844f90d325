//! Core types, configuration and errors shared across the simulation

pub mod config;
pub mod error;
pub mod types;
