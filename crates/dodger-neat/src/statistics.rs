use serde::Serialize;

use crate::genome::{Genome, GenomeId};

/// Descriptive statistics of a set of `f32` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub median: f32,
    pub variance: f32,
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Computes statistics from unsorted values; `None` if there are none.
    ///
    /// ```
    /// use dodger_neat::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f32::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes statistics from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f32]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f32;
        let mean = sorted_values.iter().sum::<f32>() / n;
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f32>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_genome: GenomeId,
    pub fitness: DescriptiveStats,
}

impl GenerationStats {
    /// Summarizes evaluated genomes; `None` for an empty population.
    #[must_use]
    pub fn from_genomes(generation: usize, genomes: &[Genome]) -> Option<Self> {
        let best = genomes
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))?;
        let fitness = DescriptiveStats::new(genomes.iter().map(Genome::fitness))?;
        Some(Self {
            generation,
            best_genome: best.id(),
            fitness,
        })
    }
}

/// Per-generation history of a population run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Statistics {
    generations: Vec<GenerationStats>,
}

impl Statistics {
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    #[must_use]
    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    #[must_use]
    pub fn best_fitnesses(&self) -> Vec<f32> {
        self.generations.iter().map(|g| g.fitness.max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genome(id: u64, fitness: f32) -> Genome {
        let mut genome = Genome::new(GenomeId::from(id), vec![]);
        genome.add_fitness(fitness);
        genome
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(DescriptiveStats::new([]), None);
    }

    #[test]
    fn test_spread() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.variance, 4.0);
        assert_eq!(stats.std_dev, 2.0);
    }

    #[test]
    fn test_generation_stats_picks_best_genome() {
        let genomes = [genome(1, -100.0), genome(2, 30.0), genome(3, 12.0)];
        let stats = GenerationStats::from_genomes(4, &genomes).unwrap();
        assert_eq!(stats.generation, 4);
        assert_eq!(stats.best_genome, GenomeId::from(2));
        assert_eq!(stats.fitness.max, 30.0);
        assert_eq!(stats.fitness.min, -100.0);
        assert!(GenerationStats::from_genomes(0, &[]).is_none());
    }

    #[test]
    fn test_history() {
        let mut statistics = Statistics::default();
        statistics.record(GenerationStats::from_genomes(0, &[genome(0, 1.0), genome(1, 3.0)]).unwrap());
        statistics.record(GenerationStats::from_genomes(1, &[genome(0, 5.0)]).unwrap());
        assert_eq!(statistics.generations().len(), 2);
        assert_eq!(statistics.best_fitnesses(), vec![3.0, 5.0]);
        assert_eq!(statistics.generations()[0].fitness.mean, 2.0);
    }
}
