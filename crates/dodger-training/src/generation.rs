use std::{ops::ControlFlow, time::Duration};

use dodger_engine::{Obstacle, World, WorldSettings};
use dodger_neat::{FeedForwardNetwork, Genome, NeatConfig, NetworkError};

use crate::{
    fitness::FitnessPolicy,
    observer::{FrameObserver, FrameView, Hud},
    simulation::Simulation,
};

/// Simulated time advanced by one frame: 1/30 s.
pub const DEFAULT_TICK: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Everything about a generation except the genomes and the engine config.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub world: WorldSettings,
    pub fitness: FitnessPolicy,
    /// Simulated time per frame; drives obstacle spawning.
    pub tick: Duration,
    /// Ends a generation after this many frames even if agents survive.
    pub frame_limit: Option<u64>,
    /// Base seed of the obstacle stream; generation `n` uses `seed + n`.
    pub seed: u64,
    /// Obstacles placed in the world before the first frame of every
    /// generation.
    pub initial_obstacles: Vec<Obstacle>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            fitness: FitnessPolicy::default(),
            tick: DEFAULT_TICK,
            frame_limit: None,
            seed: 0,
            initial_obstacles: vec![],
        }
    }
}

/// State carried from one generation to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    generation: usize,
    global_best_score: f64,
}

impl RunContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of generations started so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Highest agent score reached in any generation; starts at zero.
    #[must_use]
    pub fn global_best_score(&self) -> f64 {
        self.global_best_score
    }

    fn begin_generation(&mut self) -> usize {
        self.generation += 1;
        self.generation
    }

    fn observe_score(&mut self, score: f64) {
        if score > self.global_best_score {
            self.global_best_score = score;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Termination {
    /// No agent left alive (also the outcome of an empty generation).
    #[display("extinct")]
    Extinct,
    /// The observer aborted the generation.
    #[display("aborted")]
    Aborted,
    #[display("frame limit")]
    FrameLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    /// 1-based generation number.
    pub generation: usize,
    pub frames: u64,
    /// Highest score any agent reached, zero if none scored.
    pub best_score: f64,
    /// Agent that first reached `best_score`.
    pub best_index: Option<usize>,
    pub termination: Termination,
    pub survivors: usize,
}

/// Plays one generation: one agent per genome, until every agent is dead,
/// the observer aborts, or the frame limit is reached.
///
/// Fitness is credited to `genomes` in place. The run context's generation
/// counter is incremented exactly once, however the generation ends.
pub fn run_generation<O>(
    genomes: &mut [Genome],
    config: &NeatConfig,
    settings: &SimulationSettings,
    context: &mut RunContext,
    observer: &mut O,
) -> Result<GenerationSummary, NetworkError>
where
    O: FrameObserver + ?Sized,
{
    let generation = context.begin_generation();
    tracing::debug!(generation, genomes = genomes.len(), "starting generation");

    let mut pilots = genomes
        .iter()
        .map(|genome| FeedForwardNetwork::create(genome, config))
        .collect::<Result<Vec<_>, _>>()?;

    let seed = settings.seed.wrapping_add(generation as u64);
    let mut world = World::new(settings.world.clone(), seed);
    for obstacle in &settings.initial_obstacles {
        world.push_obstacle(obstacle.clone());
    }
    let mut sim = Simulation::new(world, pilots.len(), settings.fitness.clone(), settings.tick);

    let termination = loop {
        if sim.alive_count() == 0 {
            break Termination::Extinct;
        }
        if settings.frame_limit.is_some_and(|limit| sim.frame() >= limit) {
            break Termination::FrameLimit;
        }

        let report = sim.step(&mut pilots, &mut *genomes);
        if let Some(leader) = report.leader {
            context.observe_score(leader.score);
        }

        let view = FrameView {
            frame: report.frame,
            settings: sim.world().settings(),
            agents: sim.agents(),
            obstacles: sim.world().obstacles(),
            hud: Hud {
                generation,
                alive: report.alive,
                leader: report.leader.map(|leader| (leader.index, leader.score)),
                global_best_score: context.global_best_score(),
            },
        };
        if let ControlFlow::Break(()) = observer.on_frame(&view) {
            break Termination::Aborted;
        }
    };

    let best = sim.best();
    let summary = GenerationSummary {
        generation,
        frames: sim.frame(),
        best_score: best.map_or(0.0, |best| best.score),
        best_index: best.map(|best| best.index),
        termination,
        survivors: sim.alive_count(),
    };
    tracing::info!(
        generation,
        frames = summary.frames,
        best_score = summary.best_score,
        survivors = summary.survivors,
        global_best_score = context.global_best_score(),
        %termination,
        "generation finished",
    );
    Ok(summary)
}

/// Plays one generation with a single genome, as when watching a saved
/// winner.
///
/// Fitness stored with the genome is discarded first, so the genome ends
/// holding only what this run earned.
pub fn replay_genome<O>(
    genome: &mut Genome,
    config: &NeatConfig,
    settings: &SimulationSettings,
    observer: &mut O,
) -> Result<GenerationSummary, NetworkError>
where
    O: FrameObserver + ?Sized,
{
    genome.reset_fitness();
    run_generation(
        std::slice::from_mut(genome),
        config,
        settings,
        &mut RunContext::new(),
        observer,
    )
}
