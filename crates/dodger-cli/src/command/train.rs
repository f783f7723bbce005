use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use dodger_neat::{Genome, Statistics};
use dodger_training::{EvolutionDriver, Headless, RunOutcome, WINNER_FILE_NAME};

use crate::{command::SimulationArg, ui, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    pub(crate) simulation: SimulationArg,
    /// Maximum number of generations
    #[arg(long, default_value_t = EvolutionDriver::DEFAULT_GENERATIONS)]
    generations: usize,
    /// File the best genome is saved to
    #[arg(long, default_value = WINNER_FILE_NAME)]
    output: PathBuf,
    /// Write a training report as JSON (to stdout if no path is given)
    #[arg(long, num_args = 0..=1)]
    report: Option<Option<PathBuf>>,
}

#[derive(Debug, serde::Serialize)]
struct TrainingReport<'a> {
    trained_at: DateTime<Utc>,
    generations: usize,
    global_best_score: f64,
    winner: Option<&'a Genome>,
    winner_path: Option<&'a Path>,
    statistics: &'a Statistics,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        simulation,
        generations,
        output,
        report,
    } = arg;

    let config = simulation.load_config()?;
    let driver = EvolutionDriver::new(config, simulation.settings())
        .with_context(|| format!("Invalid config: {}", simulation.config.display()))?
        .generations(*generations)
        .winner_path(output);

    let outcome = if simulation.watch {
        ui::watch(simulation.fps, |viewer| driver.run(viewer))?
    } else {
        driver.run(&mut Headless)?
    };

    print_summary(&outcome);

    if let Some(report_path) = report {
        let report = TrainingReport {
            trained_at: Utc::now(),
            generations: outcome.generations(),
            global_best_score: outcome.global_best_score,
            winner: outcome.winner.as_ref(),
            winner_path: outcome.saved_to(),
            statistics: &outcome.statistics,
        };
        util::save_json(&report, report_path.as_deref())?;
    }

    if let Some(Err(err)) = outcome.saved {
        return Err(err).with_context(|| format!("Failed to save winner: {}", output.display()));
    }
    Ok(())
}

fn print_summary(outcome: &RunOutcome) {
    eprintln!("Training finished");
    eprintln!("  Generations: {}", outcome.generations());
    eprintln!("  Global best score: {:.1}", outcome.global_best_score);
    if let Some(last) = outcome.statistics.generations().last() {
        let fitness = &last.fitness;
        eprintln!(
            "  Last generation fitness: min {:.1} / mean {:.1} / max {:.1}",
            fitness.min, fitness.mean, fitness.max,
        );
    }
    match &outcome.winner {
        Some(winner) => eprintln!("  Winner: genome {} ({:.1})", winner.id(), winner.fitness()),
        None => eprintln!("  Winner: none"),
    }
    if let Some(path) = outcome.saved_to() {
        eprintln!("  Saved to: {}", path.display());
    }
}
