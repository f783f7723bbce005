//! Occupancy radar turning the playfield into network inputs.
//!
//! The space above an agent is split into six rectangular zones: three
//! columns (the agent's own column plus one agent width to either side)
//! crossed with two bands (a tall *far* band well above the agent and a short
//! *near* band just above it).
//!
//! ```text
//!            left   front  right
//!          +------+------+------+  H - 10h
//!   far    |  LF  |  FF  |  RF  |
//!          |      |      |      |
//!          +------+------+------+  H - 3h
//!   near   |  LN  |  FN  |  RN  |
//!          +------+------+------+  H - h
//!                 [agent]
//! ```
//!
//! The reading is the number of obstacles intersecting each zone. It is a
//! coarse occupancy signal, not a distance, so its size is fixed regardless
//! of how many obstacles are on screen. An obstacle straddling two zones is
//! counted in both.

use crate::core::Rect;

use super::obstacle::Obstacle;

/// Far band starts this many agent heights above the bottom edge.
const FAR_BAND_OFFSET: f32 = 10.0;
/// Far band spans this many agent heights.
const FAR_BAND_SPAN: f32 = 7.0;
const NEAR_BAND_OFFSET: f32 = 3.0;
const NEAR_BAND_SPAN: f32 = 2.0;

/// One of the six sensor zones, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Zone {
    #[display("front-far")]
    FrontFar,
    #[display("left-far")]
    LeftFar,
    #[display("right-far")]
    RightFar,
    #[display("front-near")]
    FrontNear,
    #[display("left-near")]
    LeftNear,
    #[display("right-near")]
    RightNear,
}

impl Zone {
    pub const LEN: usize = 6;

    pub const ALL: [Zone; Self::LEN] = [
        Zone::FrontFar,
        Zone::LeftFar,
        Zone::RightFar,
        Zone::FrontNear,
        Zone::LeftNear,
        Zone::RightNear,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column offset in agent widths relative to the agent's left edge.
    const fn column(self) -> f32 {
        match self {
            Zone::FrontFar | Zone::FrontNear => 0.0,
            Zone::LeftFar | Zone::LeftNear => -1.0,
            Zone::RightFar | Zone::RightNear => 1.0,
        }
    }

    const fn is_far(self) -> bool {
        matches!(self, Zone::FrontFar | Zone::LeftFar | Zone::RightFar)
    }
}

/// Obstacle counts per zone, indexed in [`Zone::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SensorReading([u32; Zone::LEN]);

impl SensorReading {
    #[must_use]
    pub const fn count(&self, zone: Zone) -> u32 {
        self.0[zone.index()]
    }

    #[must_use]
    pub const fn counts(&self) -> &[u32; Zone::LEN] {
        &self.0
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Converts the counts into network inputs.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_inputs(&self) -> [f32; Zone::LEN] {
        self.0.map(|c| c as f32)
    }
}

/// Computes [`SensorReading`]s for agents on a playfield of fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensor {
    playfield_height: f32,
}

impl Sensor {
    #[must_use]
    pub const fn new(playfield_height: f32) -> Self {
        Self { playfield_height }
    }

    /// Returns the rectangle covered by `zone` for an agent occupying `agent`.
    #[must_use]
    pub fn zone_rect(&self, agent: &Rect, zone: Zone) -> Rect {
        let (w, h) = (agent.width(), agent.height());
        let (offset, span) = if zone.is_far() {
            (FAR_BAND_OFFSET, FAR_BAND_SPAN)
        } else {
            (NEAR_BAND_OFFSET, NEAR_BAND_SPAN)
        };
        Rect::new(
            agent.left() + zone.column() * w,
            self.playfield_height - offset * h,
            w,
            span * h,
        )
    }

    /// Counts the obstacles intersecting each zone around `agent`.
    #[must_use]
    pub fn scan(&self, agent: &Rect, obstacles: &[Obstacle]) -> SensorReading {
        let counts = Zone::ALL.map(|zone| {
            let area = self.zone_rect(agent, zone);
            let hits = obstacles
                .iter()
                .filter(|obstacle| obstacle.rect().intersects(&area))
                .count();
            u32::try_from(hits).unwrap_or(u32::MAX)
        });
        SensorReading(counts)
    }
}
