use std::{
    ops::ControlFlow,
    thread,
    time::{Duration, Instant},
};

use dodger_engine::{Agent, Obstacle, WorldSettings};

/// Heads-up figures shown alongside a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub generation: usize,
    pub alive: usize,
    /// Index and score of the current leader, `None` once all agents died.
    pub leader: Option<(usize, f64)>,
    pub global_best_score: f64,
}

/// Read-only snapshot of a frame, handed to a [`FrameObserver`].
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame: u64,
    pub settings: &'a WorldSettings,
    /// Every agent of the generation; dead ones keep their last position.
    pub agents: &'a [Agent],
    pub obstacles: &'a [Obstacle],
    pub hud: Hud,
}

/// Receives every simulated frame.
pub trait FrameObserver {
    /// Returning [`ControlFlow::Break`] aborts the current generation.
    fn on_frame(&mut self, view: &FrameView<'_>) -> ControlFlow<()>;

    /// Whether the whole run should stop after the current generation.
    fn quit_requested(&self) -> bool {
        false
    }
}

impl<O> FrameObserver for &mut O
where
    O: FrameObserver + ?Sized,
{
    fn on_frame(&mut self, view: &FrameView<'_>) -> ControlFlow<()> {
        (**self).on_frame(view)
    }

    fn quit_requested(&self) -> bool {
        (**self).quit_requested()
    }
}

/// Observer that never looks and never aborts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl FrameObserver for Headless {
    fn on_frame(&mut self, _view: &FrameView<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Throttles a loop to a fixed rate in wall-clock time.
///
/// Only viewers pace themselves; the simulation advances by its fixed tick
/// regardless.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    deadline: Option<Instant>,
}

impl FramePacer {
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        assert!(fps > 0, "frame rate must be positive");
        Self {
            period: Duration::from_secs(1) / fps,
            deadline: None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next frame is due.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline
            .map_or(Duration::ZERO, |deadline| deadline.saturating_duration_since(now))
    }

    /// Sleeps until the next frame is due. A caller that fell behind is not
    /// made to catch up.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.deadline = Some(Instant::now() + self.period);
    }
}
