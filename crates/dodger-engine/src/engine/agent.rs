use crate::core::{Rect, WorldSettings};

use super::entity::{Entity, Presence};

/// Discrete horizontal control applied to an agent for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Steering {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("hold")]
    Hold,
}

impl Steering {
    /// Maps a scalar controller output to a steering decision.
    ///
    /// Negative values steer left, positive values steer right, and exactly
    /// zero holds position. `NaN` is treated like zero.
    ///
    /// ```
    /// use dodger_engine::Steering;
    ///
    /// assert_eq!(Steering::from_output(-0.2), Steering::Left);
    /// assert_eq!(Steering::from_output(0.7), Steering::Right);
    /// assert_eq!(Steering::from_output(0.0), Steering::Hold);
    /// assert_eq!(Steering::from_output(-0.0), Steering::Hold);
    /// ```
    #[must_use]
    pub fn from_output(output: f32) -> Self {
        if output < 0.0 {
            Self::Left
        } else if output > 0.0 {
            Self::Right
        } else {
            Self::Hold
        }
    }

    #[must_use]
    pub const fn direction(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::Hold => 0.0,
        }
    }
}

/// One player on the playfield.
///
/// An agent starts alive at the spawn point, moves only horizontally, and is
/// killed by its first collision. Dead agents keep their final rectangle and
/// score but never move or score again.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    rect: Rect,
    speed: f32,
    alive: bool,
    score: f64,
}

impl Agent {
    /// Creates a live agent at the spawn point described by `settings`.
    #[must_use]
    pub fn spawn(settings: &WorldSettings) -> Self {
        Self::at(settings.agent_spawn_rect(), settings.agent_speed)
    }

    /// Creates a live agent at an arbitrary rectangle.
    #[must_use]
    pub fn at(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            speed,
            alive: true,
            score: 0.0,
        }
    }

    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Marks the agent dead. Dying twice is a no-op.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Adds to the score of a live agent.
    ///
    /// # Panics
    ///
    /// Panics if the agent is dead, if `delta` is negative, or if the score
    /// would become negative.
    pub fn add_score(&mut self, delta: f64) {
        assert!(self.alive, "cannot score a dead agent");
        assert!(delta >= 0.0, "score increment must be non-negative, got {delta}");
        self.score += delta;
        assert!(self.score >= 0.0, "agent score became negative: {}", self.score);
    }
}

impl Entity for Agent {
    type Input = Steering;

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, steering: Steering, settings: &WorldSettings) -> Presence {
        if self.alive {
            self.rect = self
                .rect
                .translated(steering.direction() * self.speed, 0.0)
                .clamped_within(settings.width, settings.height);
        }
        Presence::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_output_nan_holds() {
        assert_eq!(Steering::from_output(f32::NAN), Steering::Hold);
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let settings = WorldSettings::default();
        let mut agent = Agent::spawn(&settings);
        agent.advance(Steering::Left, &settings);
        assert_eq!(agent.rect().left(), 225.0);
        agent.advance(Steering::Right, &settings);
        agent.advance(Steering::Right, &settings);
        assert_eq!(agent.rect().left(), 235.0);
        agent.advance(Steering::Hold, &settings);
        assert_eq!(agent.rect().left(), 235.0);
        assert_eq!(agent.rect().top(), 640.0);
    }

    #[test]
    fn test_advance_stays_within_playfield() {
        let settings = WorldSettings::default();
        let starts = [-100.0, -3.0, 0.0, 1.0, 230.0, 458.0, 460.0, 499.0, 700.0];
        for start in starts {
            for steering in [Steering::Left, Steering::Right, Steering::Hold] {
                let mut agent = Agent::at(Rect::new(start, 640.0, 40.0, 40.0), 5.0);
                agent.advance(steering, &settings);
                let rect = agent.rect();
                assert!(
                    rect.left() >= 0.0 && rect.right() <= settings.width,
                    "start {start} steering {steering} ended at {rect:?}",
                );
            }
        }
    }

    #[test]
    fn test_walls_are_not_lethal() {
        let settings = WorldSettings::default();
        let mut agent = Agent::at(Rect::new(2.0, 640.0, 40.0, 40.0), 5.0);
        for _ in 0..10 {
            assert!(agent.advance(Steering::Left, &settings).is_active());
        }
        assert!(agent.is_alive());
        assert_eq!(agent.rect().left(), 0.0);
    }

    #[test]
    fn test_dead_agent_does_not_move() {
        let settings = WorldSettings::default();
        let mut agent = Agent::spawn(&settings);
        agent.kill();
        agent.advance(Steering::Right, &settings);
        assert_eq!(agent.rect().left(), 230.0);
    }

    #[test]
    #[should_panic(expected = "cannot score a dead agent")]
    fn test_dead_agent_cannot_score() {
        let mut agent = Agent::spawn(&WorldSettings::default());
        agent.kill();
        agent.add_score(0.1);
    }

    #[test]
    #[should_panic(expected = "must be non-negative")]
    fn test_negative_score_increment_panics() {
        let mut agent = Agent::spawn(&WorldSettings::default());
        agent.add_score(-1.0);
    }
}
