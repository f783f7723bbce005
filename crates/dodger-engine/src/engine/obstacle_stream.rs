use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::core::{Rect, WorldSettings};

use super::{entity::Entity as _, obstacle::Obstacle};

/// Elapsed-time accumulator deciding when obstacles spawn.
///
/// The clock is advanced by the simulated duration of each frame, never by
/// wall-clock time, so a simulation produces the same spawn cadence whether
/// it is paced for display or runs as fast as possible.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dodger_engine::SpawnClock;
///
/// let mut clock = SpawnClock::new(Duration::from_millis(350));
/// assert_eq!(clock.tick(Duration::from_millis(200)), 0);
/// assert_eq!(clock.tick(Duration::from_millis(200)), 1); // 400ms elapsed
/// assert_eq!(clock.tick(Duration::from_millis(700)), 2); // 1100ms elapsed
/// ```
#[derive(Debug, Clone)]
pub struct SpawnClock {
    interval: Duration,
    elapsed: Duration,
}

impl SpawnClock {
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "spawn interval must be positive");
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the clock and returns how many spawn intervals were crossed.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut crossed = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            crossed += 1;
        }
        crossed
    }
}

/// Result of advancing the obstacle stream by one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStep {
    pub spawned: u32,
    pub removed: usize,
}

/// The set of live obstacles plus the machinery that feeds and drains it.
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    clock: SpawnClock,
    rng: Pcg64Mcg,
    total_spawned: u64,
}

impl ObstacleStream {
    /// Creates an empty stream whose spawn positions are drawn from `seed`.
    #[must_use]
    pub fn new(settings: &WorldSettings, seed: u64) -> Self {
        Self {
            obstacles: vec![],
            clock: SpawnClock::new(settings.spawn_interval),
            rng: Pcg64Mcg::seed_from_u64(seed),
            total_spawned: 0,
        }
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Inserts an obstacle directly, bypassing the spawn clock.
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawns one obstacle near the top edge at a random horizontal position.
    ///
    /// The centre is drawn uniformly from `[0, width]` horizontally and from
    /// `settings.spawn_center_y` vertically; the rectangle is then pushed
    /// back inside the playfield width.
    pub fn spawn(&mut self, settings: &WorldSettings) -> &Obstacle {
        let (y_min, y_max) = settings.spawn_center_y;
        let cx = self.rng.random_range(0.0..=settings.width);
        let cy = self.rng.random_range(y_min..=y_max);
        let rect = Rect::from_center(cx, cy, settings.obstacle_width, settings.obstacle_height)
            .clamped_horizontally(settings.width);
        self.obstacles
            .push(Obstacle::new(rect, settings.obstacle_speed));
        self.total_spawned += 1;
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Advances the stream by one frame lasting `dt` of simulated time.
    ///
    /// Spawns one obstacle per crossed spawn interval, moves every obstacle
    /// down by its speed, and drops those that fell past the bottom edge.
    pub fn advance(&mut self, dt: Duration, settings: &WorldSettings) -> StreamStep {
        let spawned = self.clock.tick(dt);
        for _ in 0..spawned {
            self.spawn(settings);
        }

        let before = self.obstacles.len();
        self.obstacles
            .retain_mut(|obstacle| obstacle.advance((), settings).is_active());

        StreamStep {
            spawned,
            removed: before - self.obstacles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_nanos(33_333_333);

    #[test]
    fn test_spawn_clock_carries_remainder() {
        let mut clock = SpawnClock::new(Duration::from_millis(350));
        let spawned: u32 = (0..30).map(|_| clock.tick(FRAME)).sum();
        // 30 frames at 30fps is just under one second
        assert_eq!(spawned, 2);
        assert_eq!(clock.tick(Duration::from_millis(60)), 1);
    }

    #[test]
    #[should_panic(expected = "spawn interval must be positive")]
    fn test_zero_interval_rejected() {
        let _ = SpawnClock::new(Duration::ZERO);
    }

    #[test]
    fn test_spawned_obstacles_stay_within_width_near_top() {
        let settings = WorldSettings::default();
        let mut stream = ObstacleStream::new(&settings, 7);
        for _ in 0..500 {
            let rect = *stream.spawn(&settings).rect();
            assert!(rect.left() >= 0.0, "{rect:?}");
            assert!(rect.right() <= settings.width, "{rect:?}");
            assert!(rect.top() >= -5.0 - 10.0 && rect.top() <= 10.0 - 10.0, "{rect:?}");
        }
        assert_eq!(stream.total_spawned(), 500);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let settings = WorldSettings::default();
        let mut a = ObstacleStream::new(&settings, 42);
        let mut b = ObstacleStream::new(&settings, 42);
        for _ in 0..100 {
            a.advance(FRAME, &settings);
            b.advance(FRAME, &settings);
        }
        assert_eq!(a.obstacles(), b.obstacles());
    }

    #[test]
    fn test_advance_moves_and_removes() {
        let settings = WorldSettings {
            spawn_interval: Duration::from_secs(3600),
            ..WorldSettings::default()
        };
        let mut stream = ObstacleStream::new(&settings, 0);
        stream.push(Obstacle::new(Rect::new(10.0, 0.0, 10.0, 20.0), 6.0));
        stream.push(Obstacle::new(Rect::new(50.0, 697.0, 10.0, 20.0), 6.0));

        let step = stream.advance(FRAME, &settings);
        assert_eq!(step, StreamStep { spawned: 0, removed: 1 });
        assert_eq!(stream.obstacles().len(), 1);
        assert_eq!(stream.obstacles()[0].rect().top(), 6.0);
    }

    #[test]
    fn test_new_obstacles_fall_in_their_spawn_frame() {
        let settings = WorldSettings::default();
        let mut stream = ObstacleStream::new(&settings, 3);
        let step = stream.advance(settings.spawn_interval, &settings);
        assert_eq!(step.spawned, 1);
        let top = stream.obstacles()[0].rect().top();
        // spawned with top in [-15, 0], then fell 6 units
        assert!((-9.0..=6.0).contains(&top), "top = {top}");
    }
}
