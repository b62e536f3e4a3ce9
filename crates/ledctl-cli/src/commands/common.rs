//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};

use ledctl_config::ConfigSnapshot;

/// Resolves the config path argument, falling back to the platform default
/// config directory when `None`.
pub fn resolve_config_path(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => Ok(ledctl_config::persist::default_config_path()?),
    }
}

/// Loads a configuration snapshot and logs (but does not fail on) any
/// configuration-drift issues validation finds (§7).
pub fn load_and_report(path: &Path) -> anyhow::Result<ConfigSnapshot> {
    let snapshot = ledctl_config::persist::load(path)?;
    for err in ledctl_config::validation::validate(&snapshot) {
        tracing::warn!(error = %err, "configuration drift detected");
    }
    Ok(snapshot)
}
