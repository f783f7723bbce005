//! Training loop pairing evolved networks with agents of the dodging game.
//!
//! # Architecture
//!
//! ```text
//! EvolutionDriver
//!     ↓ config, population
//! Population::run (dodger-neat)
//!     ↓ genomes of one generation
//! run_generation
//!     ↓ one network and one agent per genome
//! Simulation::step (per frame)
//!     ↓ sense → steer → move → obstacles → collide → leader bonus
//! Fitness credited to genomes, frame handed to a FrameObserver
//! ```
//!
//! Fitness rules live in [`FitnessPolicy`]; timing, frame limit and seed in
//! [`SimulationSettings`]. A [`FrameObserver`] sees every frame and may abort
//! the current generation or ask the whole run to stop; [`Headless`] does
//! neither.

pub use self::{driver::*, fitness::*, generation::*, observer::*, simulation::*};

mod driver;
mod fitness;
mod generation;
mod observer;
mod simulation;
