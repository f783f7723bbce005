use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dodger_neat::NeatConfig;
use dodger_training::SimulationSettings;

use crate::util;

use self::{init_config::InitConfigArg, replay::ReplayArg, train::TrainArg};

mod init_config;
mod replay;
mod train;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dodger.toml";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve agents and save the best genome
    Train(#[clap(flatten)] TrainArg),
    /// Play one game with a saved genome
    Replay(#[clap(flatten)] ReplayArg),
    /// Write a config file with the default hyperparameters
    InitConfig(#[clap(flatten)] InitConfigArg),
}

/// Options shared by every command that runs the game.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulationArg {
    /// Evolution config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Show the game in the terminal
    #[arg(long)]
    watch: bool,
    /// Frames per second while watching
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
    /// End each generation after this many frames
    #[arg(long)]
    frame_limit: Option<u64>,
    /// Seed for obstacles and, when training, the population
    #[arg(long)]
    seed: Option<u64>,
}

impl SimulationArg {
    fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            frame_limit: self.frame_limit,
            seed: self.seed.unwrap_or_else(rand::random),
            ..SimulationSettings::default()
        }
    }

    fn load_config(&self) -> anyhow::Result<NeatConfig> {
        let mut config = NeatConfig::from_file(&self.config)
            .with_context(|| format!("Failed to load config: {}", self.config.display()))?;
        if self.seed.is_some() {
            config.neat.seed = self.seed;
        }
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let watching = match &args.mode {
        Mode::Train(arg) => arg.simulation.watch,
        Mode::Replay(arg) => arg.simulation.watch,
        Mode::InitConfig(_) => false,
    };
    // the viewer owns the terminal, so logs would garble it
    util::init_tracing(if watching { "off" } else { "info" });

    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::InitConfig(arg) => init_config::run(&arg)?,
    }
    Ok(())
}
