//! Evolution engine: genomes encoding small feed-forward networks, evolved by
//! a genetic algorithm.
//!
//! # How Evolution Works
//!
//! 1. **Configure** - Hyperparameters come from a TOML file ([`NeatConfig`])
//! 2. **Populate** - [`Population::new`] creates random [`Genome`]s
//! 3. **Evaluate** - [`Population::run`] hands each generation's genomes to a
//!    caller-supplied evaluator, which decodes them with
//!    [`FeedForwardNetwork::create`] and credits fitness in place
//! 4. **Reproduce** - [`PopulationEvolver`] keeps the elites and breeds the
//!    rest (tournament selection, BLX-α crossover, Gaussian mutation)
//! 5. **Report** - [`Reporter`]s observe every generation, [`Statistics`]
//!    keeps the history
//!
//! The topology is fixed by the config: inputs, an optional hidden layer and
//! outputs, fully connected. There is no speciation and no structural
//! mutation; only weights evolve.
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//! use dodger_neat::{FeedForwardNetwork, NeatConfig, Population};
//!
//! let mut config = NeatConfig::default();
//! config.neat.population_size = 10;
//! config.neat.seed = Some(1);
//!
//! let mut population = Population::new(config).unwrap();
//! let winner = population.run(
//!     |genomes, config| {
//!         for genome in genomes {
//!             let net = FeedForwardNetwork::create(genome, config).unwrap();
//!             let output = net.activate(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0])[0];
//!             genome.add_fitness(output);
//!         }
//!         ControlFlow::Continue(())
//!     },
//!     5,
//! );
//! assert!(winner.is_some());
//! ```

pub use self::{
    config::*, genome::*, network::*, population::*, reporter::*, statistics::*,
};

mod config;
mod genome;
mod network;
mod population;
mod reporter;
mod statistics;
pub mod weights;
