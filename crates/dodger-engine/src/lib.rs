//! Simulation engine for the obstacle dodging game.
//!
//! The engine is split into two layers, following the same layout as the
//! rest of the workspace:
//!
//! - [`core`] - Geometry ([`Rect`]) and world settings, free of game rules
//! - [`engine`] - Agents, obstacles, the obstacle stream, the spatial sensor
//!   and the [`World`] tying them together
//!
//! Nothing here knows about neural networks, genomes or fitness; the
//! training crate pairs agents with controllers and turns frame outcomes
//! into fitness.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
