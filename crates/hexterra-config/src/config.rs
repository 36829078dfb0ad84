//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use hexterra_metrics::HexMetrics;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Hexagon geometry, terracing, and perturbation.
    pub metrics: HexMetrics,
    /// Grid dimensions.
    pub grid: GridConfig,
    /// Noise texture and terrain sculpting.
    pub noise: NoiseConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Grid dimensions, in regions. Cells per region come from the metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Regions along X.
    pub chunk_count_x: u32,
    /// Regions along Z.
    pub chunk_count_z: u32,
}

/// Noise configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Seed for the perturbation texture and the terrain heightmap.
    pub seed: u32,
    /// Width and height of the square perturbation texture, in texels.
    pub texture_size: usize,
    /// Feature count across one tile of the perturbation texture.
    pub texture_frequency: f64,
    /// Heightmap frequency per cell.
    pub terrain_frequency: f64,
    /// Highest elevation level the heightmap produces.
    pub max_elevation: i32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log a per-region piece breakdown after each rebuild.
    pub log_piece_stats: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            chunk_count_x: 4,
            chunk_count_z: 3,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 1234,
            texture_size: 256,
            texture_frequency: 8.0,
            terrain_frequency: 0.08,
            max_elevation: 6,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_piece_stats: false,
        }
    }
}

/// Platform config directory for hexterra, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexterra"))
}

impl Config {
    /// Checks every section for values that cannot produce a grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.metrics.validate()?;
        if self.grid.chunk_count_x == 0 || self.grid.chunk_count_z == 0 {
            return Err(ConfigError::InvalidSetting(
                "grid",
                format!(
                    "{}x{} regions",
                    self.grid.chunk_count_x, self.grid.chunk_count_z
                ),
            ));
        }
        if self
            .metrics
            .grid_dimensions(self.grid.chunk_count_x, self.grid.chunk_count_z)
            .is_none()
        {
            return Err(ConfigError::InvalidSetting(
                "grid",
                format!(
                    "{}x{} regions exceed the cell limit",
                    self.grid.chunk_count_x, self.grid.chunk_count_z
                ),
            ));
        }
        if self.noise.texture_size == 0 {
            return Err(ConfigError::InvalidSetting(
                "noise.texture_size",
                "must be at least 1".to_string(),
            ));
        }
        if self.noise.max_elevation < 0 {
            return Err(ConfigError::InvalidSetting(
                "noise.max_elevation",
                self.noise.max_elevation.to_string(),
            ));
        }
        Ok(())
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-reads the file: `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("outer_radius: 10.0"));
        assert!(ron_str.contains("chunk_count_x: 4"));
        assert!(ron_str.contains("seed: 1234"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(grid: (chunk_count_x: 9))").unwrap();
        assert_eq!(config.grid.chunk_count_x, 9);
        assert_eq!(config.grid.chunk_count_z, 3);
        assert_eq!(config.metrics, HexMetrics::default());
        assert_eq!(config.noise, NoiseConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_metrics_rejected() {
        let mut config = Config::default();
        config.metrics.terraces_per_slope = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMetrics(_))
        ));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut config = Config::default();
        config.grid.chunk_count_z = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting("grid", _))
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let mut config = Config::default();
        config.grid.chunk_count_x = u32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting("grid", _))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.metrics.terraces_per_slope = 3;
        config.grid.chunk_count_x = 8;
        config.noise.seed = 99;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.metrics.elevation_step = 5.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().metrics.elevation_step, 5.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_parse_error_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
