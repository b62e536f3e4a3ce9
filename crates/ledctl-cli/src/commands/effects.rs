//! Effect listing command.

use clap::Args;
use ledctl_effects::{EFFECT_TABLE, effect_metadata};

#[derive(Args)]
pub struct EffectsArgs {
    /// Show engine/audio details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.effect {
        let meta = effect_metadata(name).ok_or_else(|| anyhow::anyhow!("Unknown effect: {name}"))?;
        println!("{}", meta.name);
        println!("{}", "=".repeat(meta.name.len()));
        println!();
        println!("  category:        {}", meta.category);
        println!("  default engine:  {}", meta.default_engine.as_str());
        println!("  audio reactive:  {}", meta.audio_reactive);
        println!("  audio toggle:    {}", meta.supports_audio_toggle);
        return Ok(());
    }

    println!("Available Effects");
    println!("==================");
    println!();
    for meta in EFFECT_TABLE {
        println!(
            "  {:15} {:7} {:8} reactive={:<5} toggle={}",
            meta.name,
            meta.default_engine.as_str(),
            meta.category,
            meta.audio_reactive,
            meta.supports_audio_toggle
        );
    }
    println!();
    println!("Use 'ledctl effects <name>' for details on one effect.");
    Ok(())
}
