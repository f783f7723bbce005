//! Genetic reproduction and the generation loop.
//!
//! # Algorithm Overview
//!
//! Each generation:
//!
//! 1. **Evolve** - If the current genomes were evaluated, replace them with
//!    their offspring (skipped on the very first generation)
//! 2. **Reset** - Every genome's fitness is set to zero
//! 3. **Evaluate** - The caller credits fitness to each genome
//! 4. **Record** - Statistics are collected and reporters notified
//! 5. **Stop check** - The run ends early when the fitness threshold is met
//!    or the evaluator asks to stop
//!
//! # Key Components
//!
//! - [`Population`] - Genomes of the current generation plus run-wide state
//!   (id counter, best genome, statistics, reporters, RNG)
//! - [`PopulationEvolver`] - Reproduction parameters and the
//!   [`evolve`](PopulationEvolver::evolve) step
//!
//! # Genetic Operators
//!
//! ## Elitism
//!
//! The `elitism` fittest genomes are copied into the next generation with
//! their ids and weights unchanged. Their fitness is reset like everyone
//! else's, so an elite must earn its place again.
//!
//! ## Tournament Selection
//!
//! Each parent is the fittest of `tournament_size` distinct genomes drawn at
//! random. A tournament the size of the population always picks the overall
//! best; a size of 1 is a uniform random pick.
//!
//! ## Crossover and Mutation
//!
//! Two selected parents are blended with [`weights::blx_alpha`] and the child
//! is passed through [`weights::mutate`]. Both clamp to `weight_max`.
//!
//! # Design Decisions
//!
//! ## Fitness Lives on the Genome
//!
//! The evaluator receives `&mut [Genome]` and credits fitness in place
//! through [`Genome::add_fitness`]. The loop owns resetting: every genome
//! handed to the evaluator starts at zero, including elites and the first
//! generation.
//!
//! ## Best Genome Across Generations
//!
//! [`Population::run`] returns the fittest genome seen in any generation,
//! not the champion of the last one. A later generation that does worse
//! (for example on a harder obstacle seed) does not replace an earlier,
//! fitter winner.
//!
//! ## Determinism
//!
//! With `neat.seed` set, initial weights and every reproduction draw come
//! from one [`Pcg64Mcg`] stream, so the same config and evaluator reproduce
//! the same run.

use std::ops::ControlFlow;

use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::{
    config::{ConfigError, NeatConfig},
    genome::{Genome, GenomeId},
    reporter::Reporter,
    statistics::{GenerationStats, Statistics},
    weights,
};

/// Reproduction parameters.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    /// Number of top genomes preserved unchanged
    pub elite_count: usize,
    /// Weights are clamped to `[-max_weight, max_weight]`
    pub max_weight: f32,
    /// Tournament size for parent selection
    pub tournament_size: usize,
    /// Standard deviation of Gaussian mutation noise
    pub mutation_sigma: f32,
    /// BLX-α range expansion factor
    pub blx_alpha: f32,
    /// Per-weight mutation probability
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    #[must_use]
    pub fn from_config(config: &NeatConfig) -> Self {
        Self {
            elite_count: config.reproduction.elitism,
            max_weight: config.genome.weight_max,
            tournament_size: config.reproduction.tournament_size,
            mutation_sigma: config.mutation.sigma,
            blx_alpha: config.reproduction.blx_alpha,
            mutation_rate: config.mutation.rate,
        }
    }

    /// Produces the next generation from evaluated genomes.
    ///
    /// # Arguments
    ///
    /// * `genomes` - Evaluated genomes of the current generation
    /// * `next_id` - Id counter; advanced once per child
    /// * `rng` - Random source for selection, crossover and mutation
    ///
    /// The result has the same length as `genomes`. Elites keep their ids;
    /// each child takes the next id from `next_id`. Every returned genome has
    /// zero fitness.
    ///
    /// # Panics
    ///
    /// Panics if `genomes` is empty.
    pub fn evolve<R>(&self, genomes: &[Genome], next_id: &mut u64, rng: &mut R) -> Vec<Genome>
    where
        R: Rng + ?Sized,
    {
        assert!(!genomes.is_empty(), "cannot evolve an empty population");

        let mut ranked = genomes.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

        let mut next = Vec::with_capacity(genomes.len());
        next.extend(ranked.iter().take(self.elite_count).map(|elite| {
            let mut elite = (*elite).clone();
            elite.reset_fitness();
            elite
        }));

        while next.len() < genomes.len() {
            let p1 = tournament_select(&ranked, self.tournament_size, rng);
            let p2 = tournament_select(&ranked, self.tournament_size, rng);

            let mut child = weights::blx_alpha(
                p1.weights(),
                p2.weights(),
                self.blx_alpha,
                self.max_weight,
                rng,
            );
            weights::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                rng,
            );

            let id = GenomeId::from(*next_id);
            *next_id += 1;
            next.push(Genome::new(id, child));
        }

        next
    }
}

/// Picks `tournament_size` distinct genomes at random and returns the fittest.
fn tournament_select<'a, R>(pool: &[&'a Genome], tournament_size: usize, rng: &mut R) -> &'a Genome
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    pool.choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
        .copied()
        .expect("tournament pool must not be empty")
}

/// A population of genomes evolved generation by generation.
pub struct Population {
    config: NeatConfig,
    evolver: PopulationEvolver,
    genomes: Vec<Genome>,
    evaluated: bool,
    generation: usize,
    next_id: u64,
    best: Option<Genome>,
    statistics: Statistics,
    reporters: Vec<Box<dyn Reporter>>,
    rng: Pcg64Mcg,
}

impl std::fmt::Debug for Population {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Population")
            .field("generation", &self.generation)
            .field("genomes", &self.genomes.len())
            .field("reporters", &self.reporters.len())
            .finish_non_exhaustive()
    }
}

impl Population {
    /// Creates `population_size` random genomes.
    ///
    /// The RNG is seeded from `neat.seed` when set, otherwise from entropy.
    pub fn new(config: NeatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.neat.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg64Mcg::seed_from_u64(seed);

        let mut next_id = 0;
        let genomes = (0..config.neat.population_size)
            .map(|_| {
                let id = GenomeId::from(next_id);
                next_id += 1;
                Genome::random(id, &config, &mut rng)
            })
            .collect();

        Ok(Self {
            evolver: PopulationEvolver::from_config(&config),
            config,
            genomes,
            evaluated: false,
            generation: 0,
            next_id,
            best: None,
            statistics: Statistics::default(),
            reporters: vec![],
            rng,
        })
    }

    pub fn add_reporter<R>(&mut self, reporter: R)
    where
        R: Reporter + 'static,
    {
        self.reporters.push(Box::new(reporter));
    }

    #[must_use]
    pub fn config(&self) -> &NeatConfig {
        &self.config
    }

    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Number of generations evaluated so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Runs up to `generations` generations.
    ///
    /// # Arguments
    ///
    /// * `evaluate` - Credits fitness to one generation's genomes
    /// * `generations` - Upper bound on generations evaluated by this call
    ///
    /// `evaluate` receives every genome with fitness reset to zero and must
    /// credit their fitness in place. Returning [`ControlFlow::Break`] ends
    /// the run after the current generation has been recorded.
    ///
    /// Returns the fittest genome seen across all generations of this
    /// population, or `None` if no generation was ever evaluated.
    pub fn run<F>(&mut self, mut evaluate: F, generations: usize) -> Option<Genome>
    where
        F: FnMut(&mut [Genome], &NeatConfig) -> ControlFlow<()>,
    {
        for _ in 0..generations {
            let generation = self.generation;
            if self.evaluated {
                self.genomes = self
                    .evolver
                    .evolve(&self.genomes, &mut self.next_id, &mut self.rng);
            }
            for reporter in &mut self.reporters {
                reporter.start_generation(generation);
            }

            for genome in &mut self.genomes {
                genome.reset_fitness();
            }
            let flow = evaluate(&mut self.genomes, &self.config);
            self.evaluated = true;

            let threshold_met = self.record(generation);

            for reporter in &mut self.reporters {
                reporter.end_generation(&self.config, generation);
            }
            self.generation += 1;

            if threshold_met || flow.is_break() {
                break;
            }
        }
        self.best.clone()
    }

    /// Records statistics and the best genome; returns whether the fitness
    /// threshold was reached.
    fn record(&mut self, generation: usize) -> bool {
        let Some(stats) = GenerationStats::from_genomes(generation, &self.genomes) else {
            return false;
        };
        for reporter in &mut self.reporters {
            reporter.post_evaluate(&self.config, &self.genomes, &stats);
        }

        let Some(champion) = self.genomes.iter().find(|g| g.id() == stats.best_genome) else {
            return false;
        };
        if self
            .best
            .as_ref()
            .is_none_or(|best| champion.fitness() > best.fitness())
        {
            self.best = Some(champion.clone());
        }

        let threshold_met = self
            .config
            .neat
            .fitness_threshold
            .is_some_and(|threshold| champion.fitness() >= threshold);
        if threshold_met {
            for reporter in &mut self.reporters {
                reporter.found_solution(&self.config, generation, champion);
            }
        }

        self.statistics.record(stats);
        threshold_met
    }
}
