//! Lattice storage and neighborhood queries

pub mod grid;
pub mod neighborhood;

pub use grid::{Grid, Lattice, SatisfactionMap};
