use std::time::Duration;

use crate::core::WorldSettings;

use super::{
    agent::Agent,
    obstacle::Obstacle,
    obstacle_stream::{ObstacleStream, StreamStep},
    sensor::{Sensor, SensorReading},
};

/// The playfield and everything in it except the agents.
///
/// Agents are owned by whoever runs the simulation, since their lifetime is
/// tied to a single generation's pairing with controllers. The world only
/// answers questions about them: what an agent senses and whether it
/// collides.
#[derive(Debug, Clone)]
pub struct World {
    settings: WorldSettings,
    sensor: Sensor,
    stream: ObstacleStream,
}

impl World {
    #[must_use]
    pub fn new(settings: WorldSettings, seed: u64) -> Self {
        let sensor = Sensor::new(settings.height);
        let stream = ObstacleStream::new(&settings, seed);
        Self {
            settings,
            sensor,
            stream,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        self.stream.obstacles()
    }

    /// Creates a fresh agent at the spawn point.
    #[must_use]
    pub fn spawn_agent(&self) -> Agent {
        Agent::spawn(&self.settings)
    }

    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.stream.push(obstacle);
    }

    #[must_use]
    pub fn sense(&self, agent: &Agent) -> SensorReading {
        self.sensor.scan(agent.rect(), self.stream.obstacles())
    }

    /// Returns `true` if the agent overlaps any obstacle.
    #[must_use]
    pub fn collides(&self, agent: &Agent) -> bool {
        self.stream
            .obstacles()
            .iter()
            .any(|obstacle| obstacle.rect().intersects(agent.rect()))
    }

    /// Advances the obstacles by one frame of `dt` simulated time.
    pub fn advance_obstacles(&mut self, dt: Duration) -> StreamStep {
        self.stream.advance(dt, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Rect;

    use super::*;

    fn quiet_settings() -> WorldSettings {
        WorldSettings {
            spawn_interval: Duration::from_secs(3600),
            ..WorldSettings::default()
        }
    }

    #[test]
    fn test_collides_with_overlapping_obstacle() {
        let mut world = World::new(quiet_settings(), 0);
        let agent = world.spawn_agent();
        assert!(!world.collides(&agent));

        world.push_obstacle(Obstacle::new(Rect::new(245.0, 625.0, 10.0, 20.0), 6.0));
        assert!(world.collides(&agent));
    }

    #[test]
    fn test_touching_obstacle_does_not_collide() {
        let mut world = World::new(quiet_settings(), 0);
        let agent = world.spawn_agent();
        // bottom edge exactly at the agent's top edge
        world.push_obstacle(Obstacle::new(Rect::new(245.0, 620.0, 10.0, 20.0), 6.0));
        assert!(!world.collides(&agent));
    }
}
