use std::time::Duration;

use super::Rect;

pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 500.0;
pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 700.0;

pub const DEFAULT_AGENT_WIDTH: f32 = 40.0;
pub const DEFAULT_AGENT_HEIGHT: f32 = 40.0;
pub const DEFAULT_AGENT_SPEED: f32 = 5.0;

pub const DEFAULT_OBSTACLE_WIDTH: f32 = 10.0;
pub const DEFAULT_OBSTACLE_HEIGHT: f32 = 20.0;
pub const DEFAULT_OBSTACLE_SPEED: f32 = 6.0;

pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_millis(350);

/// Geometry and pacing of the game world.
///
/// All lengths are in logical playfield units. The defaults reproduce the
/// reference game: a 500x700 playfield, 40x40 agents moving 5 units per frame,
/// and 10x20 obstacles falling 6 units per frame, one spawned every 350 ms.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
    pub agent_width: f32,
    pub agent_height: f32,
    pub agent_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_speed: f32,
    /// Simulated time between two obstacle spawns.
    pub spawn_interval: Duration,
    /// Range of the vertical centre of a freshly spawned obstacle.
    pub spawn_center_y: (f32, f32),
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
            agent_width: DEFAULT_AGENT_WIDTH,
            agent_height: DEFAULT_AGENT_HEIGHT,
            agent_speed: DEFAULT_AGENT_SPEED,
            obstacle_width: DEFAULT_OBSTACLE_WIDTH,
            obstacle_height: DEFAULT_OBSTACLE_HEIGHT,
            obstacle_speed: DEFAULT_OBSTACLE_SPEED,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            spawn_center_y: (-5.0, 10.0),
        }
    }
}

impl WorldSettings {
    /// Rectangle every agent starts a generation in: horizontally centred,
    /// one agent height above the bottom edge (measured at its centre).
    #[must_use]
    pub fn agent_spawn_rect(&self) -> Rect {
        Rect::from_center(
            self.width / 2.0,
            self.height - self.agent_height,
            self.agent_width,
            self.agent_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spawn_rect_is_bottom_center() {
        let rect = WorldSettings::default().agent_spawn_rect();
        assert_eq!(rect.left(), 230.0);
        assert_eq!(rect.top(), 640.0);
        assert_eq!(rect.bottom(), 680.0);
    }
}
