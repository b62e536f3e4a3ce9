//! Writes a fresh default configuration file.

use std::path::PathBuf;

use clap::Args;
use ledctl_config::ConfigSnapshot;

use crate::commands::common::resolve_config_path;

#[derive(Args)]
pub struct InitArgs {
    /// Where to write the config file (defaults to the platform config directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    force: bool,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    let path = resolve_config_path(args.path)?;

    if path.exists() && !args.force {
        anyhow::bail!("{} already exists, pass --force to overwrite", path.display());
    }

    ledctl_config::persist::save(&path, &ConfigSnapshot::default())?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
