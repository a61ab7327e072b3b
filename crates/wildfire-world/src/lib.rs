//! Forest simulation engine.
//!
//! This module implements the toroidal forest grid and the step engine that
//! spreads fire across it one discrete time unit at a time.

pub mod grid;
pub mod simulation;

pub use grid::Grid;
pub use simulation::Simulation;
