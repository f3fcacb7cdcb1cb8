pub mod range_types;

use crate::game_logic::errors::{CamkiiError, CamkiiResult};
use crate::resources::GameConfig;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_config_path() -> CamkiiResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or(CamkiiError::ConfigDirNotFound)?;
    path.push("camkii");
    fs::create_dir_all(&path)?;
    path.push("config.toml");
    Ok(path)
}

pub fn load_config_from(path: &Path) -> CamkiiResult<GameConfig> {
    if !path.exists() {
        return Err(CamkiiError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str::<GameConfig>(&contents)?)
}

pub fn load_config() -> CamkiiResult<GameConfig> {
    load_config_from(&get_config_path()?)
}

/// Load the user's config, falling back to defaults when it is missing or unreadable
pub fn load_config_or_default() -> GameConfig {
    match load_config() {
        Ok(config) => config,
        Err(CamkiiError::ConfigFileNotFound { .. }) => GameConfig::default(),
        Err(err) => {
            warn!("Failed to load config, using defaults: {err}");
            GameConfig::default()
        }
    }
}

pub fn save_config_to(config: &GameConfig, path: &Path) -> CamkiiResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("camkii-config-{}.toml", std::process::id()));

        let mut config = GameConfig::default();
        config.username = "kinase".to_string();
        config.phosphorylations = 3;

        save_config_to(&config, &path).expect("save should succeed");
        let loaded = load_config_from(&path).expect("load should succeed");
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.username, "kinase");
        assert_eq!(loaded.phosphorylations, 3);
        assert_eq!(
            loaded.settings.docking_distance.get(),
            config.settings.docking_distance.get()
        );
    }

    #[test]
    fn test_missing_config_file() {
        let path = std::env::temp_dir().join("camkii-definitely-missing.toml");
        let result = load_config_from(&path);
        assert!(matches!(result, Err(CamkiiError::ConfigFileNotFound { .. })));
    }

    #[test]
    fn test_partial_config_is_rejected() {
        let path = std::env::temp_dir().join(format!("camkii-bad-{}.toml", std::process::id()));
        fs::write(&path, "username = 42").expect("write should succeed");
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(CamkiiError::DeserializationFailed(_))));
    }
}
