use crate::core::{Rect, WorldSettings};

/// Whether an entity is still part of the world after advancing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Presence {
    Active,
    /// The entity left the playfield and should be dropped.
    Expired,
}

/// Capability shared by everything that moves through the playfield.
///
/// Agents take a steering decision as input; obstacles take nothing and fall
/// on their own.
pub trait Entity {
    type Input;

    fn bounds(&self) -> Rect;

    fn advance(&mut self, input: Self::Input, settings: &WorldSettings) -> Presence;
}

/// Kind of a drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SpriteKind {
    #[display("agent")]
    Agent,
    #[display("obstacle")]
    Obstacle,
}

/// A drawable snapshot of one entity, handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

impl Sprite {
    pub fn new<E>(kind: SpriteKind, entity: &E) -> Self
    where
        E: Entity + ?Sized,
    {
        Self {
            kind,
            rect: entity.bounds(),
        }
    }
}
