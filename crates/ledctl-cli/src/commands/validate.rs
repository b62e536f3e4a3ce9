//! Validates a configuration file without starting the scheduler.

use std::path::PathBuf;

use clap::Args;

use crate::commands::common::resolve_config_path;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(short, long)]
    path: Option<PathBuf>,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let path = resolve_config_path(args.path)?;
    let snapshot = ledctl_config::persist::load(&path)?;
    let errors = ledctl_config::validation::validate(&snapshot);

    println!("{}", path.display());
    println!("  sinks:    {}", snapshot.sinks.len());
    println!("  bindings: {}", snapshot.bindings.len());

    if errors.is_empty() {
        println!("No configuration drift found.");
        Ok(())
    } else {
        for err in &errors {
            println!("  ! {err}");
        }
        anyhow::bail!("{} configuration drift issue(s) found", errors.len());
    }
}
