use std::path::PathBuf;

use anyhow::Context as _;
use dodger_neat::Genome;
use dodger_training::{
    GenerationSummary, Headless, WINNER_FILE_NAME, check_sensor_inputs, replay_genome,
};

use crate::{command::SimulationArg, ui};

/// Frame cap for a headless replay without `--frame-limit`: ten simulated
/// minutes. A good genome may otherwise never die.
const HEADLESS_REPLAY_FRAME_LIMIT: u64 = 30 * 60 * 10;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Genome file written by `train`
    #[arg(default_value = WINNER_FILE_NAME)]
    winner: PathBuf,
    #[clap(flatten)]
    pub(crate) simulation: SimulationArg,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { winner, simulation } = arg;

    let config = simulation.load_config()?;
    check_sensor_inputs(&config)
        .with_context(|| format!("Invalid config: {}", simulation.config.display()))?;
    let mut genome = Genome::load_json(winner)
        .with_context(|| format!("Failed to load genome: {}", winner.display()))?;
    eprintln!("Replaying genome {} from {}", genome.id(), winner.display());

    let mut settings = simulation.settings();
    if !simulation.watch && settings.frame_limit.is_none() {
        settings.frame_limit = Some(HEADLESS_REPLAY_FRAME_LIMIT);
    }
    eprintln!("  Seed: {}", settings.seed);

    let summary = if simulation.watch {
        ui::watch(simulation.fps, |viewer| {
            replay_genome(&mut genome, &config, &settings, viewer)
        })?
    } else {
        replay_genome(&mut genome, &config, &settings, &mut Headless)?
    };

    print_summary(&summary, &genome);
    Ok(())
}

fn print_summary(summary: &GenerationSummary, genome: &Genome) {
    eprintln!("Replay finished ({})", summary.termination);
    eprintln!("  Frames: {}", summary.frames);
    eprintln!("  Score: {:.1}", summary.best_score);
    eprintln!("  Fitness: {:.1}", genome.fitness());
}
