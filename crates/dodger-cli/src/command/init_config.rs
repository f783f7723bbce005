use std::{fs::File, io::Write as _, path::PathBuf};

use anyhow::Context as _;
use dodger_neat::NeatConfig;

use crate::command::DEFAULT_CONFIG_FILE;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InitConfigArg {
    /// Config file to create
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    output: PathBuf,
    /// Overwrite the file if it already exists
    #[arg(long)]
    force: bool,
}

pub(crate) fn run(arg: &InitConfigArg) -> anyhow::Result<()> {
    let InitConfigArg { output, force } = arg;

    let text = NeatConfig::default()
        .to_toml_string()
        .context("Failed to serialize the default config")?;
    let mut file = if *force {
        File::create(output)
    } else {
        File::create_new(output)
    }
    .with_context(|| format!("Failed to create config file: {}", output.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write config file: {}", output.display()))?;

    eprintln!("Wrote default config to {}", output.display());
    Ok(())
}
