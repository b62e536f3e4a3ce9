//! TOML persistence helpers, in the style of the teacher's preset store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::snapshot::ConfigSnapshot;

/// Loads a [`ConfigSnapshot`] from a TOML file.
pub fn load(path: &Path) -> ConfigResult<ConfigSnapshot> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Serializes and writes a [`ConfigSnapshot`] to a TOML file, creating parent
/// directories as needed.
pub fn save(path: &Path, snapshot: &ConfigSnapshot) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(snapshot)?;
    fs::write(path, text).map_err(|source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Default config file location: `<config dir>/ledctl/config.toml`.
pub fn default_config_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("ledctl").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let snapshot = ConfigSnapshot::default();
        save(&path, &snapshot).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.hardware.target_fps, snapshot.hardware.target_fps);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load(Path::new("/nonexistent/ledctl/config.toml"));
        assert!(matches!(err, Err(ConfigError::ReadFile { .. })));
    }
}
