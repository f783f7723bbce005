//! Game mechanics of the dodging game.
//!
//! - [`Agent`] - A player moving horizontally near the bottom edge
//! - [`Obstacle`] - A rectangle falling from the top edge
//! - [`ObstacleStream`] - Time-based spawning, falling and culling of obstacles
//! - [`Sensor`] - Six-zone occupancy radar producing network inputs
//! - [`World`] - Playfield, sensor and obstacles bundled together
//! - [`Entity`] - The "advance one frame" capability shared by agents and obstacles
//!
//! # Frame Flow
//!
//! A frame as driven by a simulation:
//!
//! 1. Each live agent senses the world ([`World::sense`]) and receives a [`Steering`]
//! 2. Each agent advances ([`Entity::advance`]), clamped to the playfield
//! 3. Obstacles advance ([`World::advance_obstacles`]), spawning and culling as needed
//! 4. Each live agent is tested for collision ([`World::collides`])
//!
//! Scoring and fitness are not part of the engine; see the training crate.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dodger_engine::{Entity as _, Steering, World, WorldSettings};
//!
//! let settings = WorldSettings::default();
//! let mut world = World::new(settings.clone(), 42);
//! let mut agent = world.spawn_agent();
//!
//! for _ in 0..30 {
//!     let reading = world.sense(&agent);
//!     let steering = if reading.is_clear() { Steering::Hold } else { Steering::Left };
//!     agent.advance(steering, &settings);
//!     world.advance_obstacles(Duration::from_secs(1) / 30);
//!     if world.collides(&agent) {
//!         agent.kill();
//!         break;
//!     }
//! }
//! ```

pub use self::{agent::*, entity::*, obstacle::*, obstacle_stream::*, sensor::*, world::*};

mod agent;
mod entity;
mod obstacle;
mod obstacle_stream;
mod sensor;
mod world;
