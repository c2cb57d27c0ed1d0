//! Schelling - residential segregation on a square lattice

pub mod core;
pub mod simulation;
pub mod spatial;
