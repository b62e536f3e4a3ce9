//! Lists the sinks defined in a configuration file.

use std::path::PathBuf;

use clap::Args;
use ledctl_config::Sink;

use crate::commands::common::resolve_config_path;

#[derive(Args)]
pub struct SinksArgs {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(short, long)]
    path: Option<PathBuf>,
}

pub fn run(args: SinksArgs) -> anyhow::Result<()> {
    let path = resolve_config_path(args.path)?;
    let snapshot = ledctl_config::persist::load(&path)?;

    if snapshot.sinks.is_empty() {
        println!("No sinks defined in {}", path.display());
        return Ok(());
    }

    for sink in &snapshot.sinks {
        let kind = match sink {
            Sink::Local(_) => "local",
            Sink::Remote(_) => "remote",
            Sink::Virtual(_) => "virtual",
        };
        println!(
            "  {:10} {:8} leds={:<6} enabled={}",
            sink.id(),
            kind,
            sink.led_count(),
            sink.enabled()
        );
    }
    Ok(())
}
