//! ledctl CLI - command-line interface for the ledctl LED lighting controller.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ledctl")]
#[command(author, version, about = "ledctl LED lighting controller CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduler and audio analyzer against a configuration file
    Run(commands::run::RunArgs),

    /// Validate a configuration file without starting the scheduler
    Validate(commands::validate::ValidateArgs),

    /// Write a fresh default configuration file
    Init(commands::init::InitArgs),

    /// List known effects and their engine/audio capability
    Effects(commands::effects::EffectsArgs),

    /// List the sinks defined in a configuration file
    Sinks(commands::sinks::SinksArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    tracing::debug!(command = ?std::mem::discriminant(&cli.command), "dispatching command");

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Init(args) => commands::init::run(args),
        Commands::Effects(args) => commands::effects::run(args),
        Commands::Sinks(args) => commands::sinks::run(args),
    }
}
