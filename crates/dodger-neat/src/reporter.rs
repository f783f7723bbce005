//! Progress hooks for [`Population::run`](crate::Population::run).

use crate::{config::NeatConfig, genome::Genome, statistics::GenerationStats};

/// Observer of a population run.
///
/// All methods default to doing nothing.
pub trait Reporter {
    fn start_generation(&mut self, _generation: usize) {}

    /// Called after every genome of the generation has been evaluated.
    fn post_evaluate(
        &mut self,
        _config: &NeatConfig,
        _genomes: &[Genome],
        _stats: &GenerationStats,
    ) {
    }

    /// Called when the best genome reaches the configured fitness threshold.
    fn found_solution(&mut self, _config: &NeatConfig, _generation: usize, _best: &Genome) {}

    fn end_generation(&mut self, _config: &NeatConfig, _generation: usize) {}
}

/// Reports progress through `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn start_generation(&mut self, generation: usize) {
        tracing::debug!(generation, "running generation");
    }

    fn post_evaluate(&mut self, _config: &NeatConfig, genomes: &[Genome], stats: &GenerationStats) {
        tracing::info!(
            generation = stats.generation,
            population = genomes.len(),
            best_genome = %stats.best_genome,
            best = stats.fitness.max,
            mean = stats.fitness.mean,
            std_dev = stats.fitness.std_dev,
            "generation evaluated",
        );
    }

    fn found_solution(&mut self, config: &NeatConfig, generation: usize, best: &Genome) {
        tracing::info!(
            generation,
            genome = %best.id(),
            fitness = best.fitness(),
            threshold = config.neat.fitness_threshold,
            "fitness threshold reached",
        );
    }
}
