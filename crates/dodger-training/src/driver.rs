use std::{
    ops::ControlFlow,
    path::{Path, PathBuf},
};

use dodger_engine::Zone;
use dodger_neat::{
    ConfigError, Genome, LogReporter, NeatConfig, NetworkError, PersistError, Population,
    Statistics,
};

use crate::{
    generation::{GenerationSummary, RunContext, SimulationSettings, run_generation},
    observer::FrameObserver,
};

/// File the best genome of a run is written to unless told otherwise.
pub const WINNER_FILE_NAME: &str = "winner.json";

/// Checks that networks built from `config` take one input per sensor zone.
pub fn check_sensor_inputs(config: &NeatConfig) -> Result<(), ConfigError> {
    let inputs = config.genome.num_inputs;
    if inputs != Zone::LEN {
        return Err(ConfigError::Invalid {
            reason: format!(
                "genome.num_inputs must be {} (one per sensor zone), got {inputs}",
                Zone::LEN,
            ),
        });
    }
    Ok(())
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DriverError {
    #[display("invalid evolution config")]
    Config { source: ConfigError },
    #[display("cannot build network")]
    Network { source: NetworkError },
}

/// Result of a complete training run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Fittest genome across all generations; `None` if no generation ran.
    pub winner: Option<Genome>,
    pub global_best_score: f64,
    pub statistics: Statistics,
    pub summaries: Vec<GenerationSummary>,
    /// Where the winner was saved, or why saving failed.
    pub saved: Option<Result<PathBuf, PersistError>>,
}

impl RunOutcome {
    #[must_use]
    pub fn generations(&self) -> usize {
        self.summaries.len()
    }

    #[must_use]
    pub fn saved_to(&self) -> Option<&Path> {
        match &self.saved {
            Some(Ok(path)) => Some(path),
            _ => None,
        }
    }

    #[must_use]
    pub fn persist_error(&self) -> Option<&PersistError> {
        match &self.saved {
            Some(Err(err)) => Some(err),
            _ => None,
        }
    }
}

/// Runs the evolution engine against the game and persists the winner.
#[derive(Debug, Clone)]
pub struct EvolutionDriver {
    config: NeatConfig,
    settings: SimulationSettings,
    generations: usize,
    winner_path: PathBuf,
}

impl EvolutionDriver {
    pub const DEFAULT_GENERATIONS: usize = 60;

    /// Validates `config` up front so that no generation runs with a bad one.
    pub fn new(config: NeatConfig, settings: SimulationSettings) -> Result<Self, DriverError> {
        config.validate()?;
        check_sensor_inputs(&config)?;
        Ok(Self {
            config,
            settings,
            generations: Self::DEFAULT_GENERATIONS,
            winner_path: PathBuf::from(WINNER_FILE_NAME),
        })
    }

    /// Loads the evolution config from a TOML file.
    pub fn from_config_file<P>(path: P, settings: SimulationSettings) -> Result<Self, DriverError>
    where
        P: AsRef<Path>,
    {
        let config = NeatConfig::from_file(path)?;
        Self::new(config, settings)
    }

    #[must_use]
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    #[must_use]
    pub fn winner_path<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.winner_path = path.into();
        self
    }

    #[must_use]
    pub fn config(&self) -> &NeatConfig {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Evolves for the configured number of generations, stopping early if
    /// the fitness threshold is met or the observer asks to quit.
    ///
    /// A failure to save the winner is logged and reported in
    /// [`RunOutcome::saved`]; it does not fail the run.
    pub fn run<O>(&self, observer: &mut O) -> Result<RunOutcome, DriverError>
    where
        O: FrameObserver + ?Sized,
    {
        let mut population = Population::new(self.config.clone())?;
        population.add_reporter(LogReporter);

        let mut context = RunContext::new();
        let mut summaries = vec![];
        let mut failure = None;
        let winner = population.run(
            |genomes, config| {
                match run_generation(genomes, config, &self.settings, &mut context, &mut *observer) {
                    Ok(summary) => summaries.push(summary),
                    Err(err) => {
                        failure = Some(err);
                        return ControlFlow::Break(());
                    }
                }
                if observer.quit_requested() {
                    tracing::info!("training stopped by request");
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            },
            self.generations,
        );
        if let Some(err) = failure {
            return Err(err.into());
        }

        let saved = winner.as_ref().map(|winner| self.save_winner(winner));
        tracing::info!(
            generations = summaries.len(),
            global_best_score = context.global_best_score(),
            "training finished",
        );

        Ok(RunOutcome {
            winner,
            global_best_score: context.global_best_score(),
            statistics: population.statistics().clone(),
            summaries,
            saved,
        })
    }

    fn save_winner(&self, winner: &Genome) -> Result<PathBuf, PersistError> {
        match winner.save_json(&self.winner_path) {
            Ok(()) => {
                tracing::info!(
                    path = %self.winner_path.display(),
                    genome = %winner.id(),
                    fitness = winner.fitness(),
                    "saved winner",
                );
                Ok(self.winner_path.clone())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save winner");
                Err(err)
            }
        }
    }
}
