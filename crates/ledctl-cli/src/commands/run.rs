//! Runs the scheduler and the audio analyzer task against a configuration file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Args;
use ledctl_audio_analysis::AudioMetricsStore;

use crate::commands::common::{load_and_report, resolve_config_path};

#[derive(Args)]
pub struct RunArgs {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(short, long)]
    path: Option<PathBuf>,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let path = resolve_config_path(args.path)?;
    let config = Arc::new(load_and_report(&path)?);

    println!("ledctl: {} sink(s), {} binding(s), target {} fps", config.sinks.len(), config.bindings.len(), config.hardware.effective_fps());
    println!("Press Ctrl+C to stop...");

    let should_stop = Arc::new(AtomicBool::new(false));
    let ctrlc_flag = Arc::clone(&should_stop);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        ctrlc_flag.store(true, Ordering::SeqCst);
    })?;

    let audio = Arc::new(AudioMetricsStore::new(config.audio.sample_rate, config.audio.effective_fft_size()));

    let audio_task = {
        let audio = Arc::clone(&audio);
        let config = Arc::clone(&config);
        let should_stop = Arc::clone(&should_stop);
        std::thread::spawn(move || {
            ledctl_audio_io::run_blocking(
                &audio,
                &config.audio.pcm,
                config.audio.sample_rate,
                config.audio.stereo,
                config.audio.effective_fft_size(),
                || should_stop.load(Ordering::Relaxed),
            );
        })
    };

    let mut scheduler = ledctl_scheduler::Scheduler::new();
    let config_source = {
        let config = Arc::clone(&config);
        move || Arc::clone(&config)
    };
    ledctl_scheduler::run(&mut scheduler, config_source, &audio, &should_stop);

    audio_task.join().map_err(|_| anyhow::anyhow!("audio analyzer task panicked"))?;
    println!("Done.");
    Ok(())
}
