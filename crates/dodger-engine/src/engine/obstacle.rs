use crate::core::{Rect, WorldSettings};

use super::entity::{Entity, Presence};

/// A falling obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    rect: Rect,
    speed: f32,
}

impl Obstacle {
    #[must_use]
    pub const fn new(rect: Rect, speed: f32) -> Self {
        Self { rect, speed }
    }

    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

impl Entity for Obstacle {
    type Input = ();

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, (): (), settings: &WorldSettings) -> Presence {
        self.rect = self.rect.translated(0.0, self.speed);
        if self.rect.top() > settings.height {
            Presence::Expired
        } else {
            Presence::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_and_expires_past_bottom() {
        let settings = WorldSettings::default();
        let mut obstacle = Obstacle::new(Rect::new(100.0, 688.0, 10.0, 20.0), 6.0);
        // top = 694, still touching the playfield
        assert!(obstacle.advance((), &settings).is_active());
        // top = 700 is on the edge, not past it
        assert!(obstacle.advance((), &settings).is_active());
        assert_eq!(obstacle.rect().top(), 700.0);
        assert!(obstacle.advance((), &settings).is_expired());
    }
}
