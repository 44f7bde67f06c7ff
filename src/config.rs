//! # Demo Configuration
//!
//! Loads the demo binary's settings from `tide-almanac.toml`: the
//! water-level factors handed to the height model and the query the demo
//! runs against the generated table. The library itself takes everything as
//! explicit arguments; configuration stops at the binary boundary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Demo settings loaded from `tide-almanac.toml`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Parameters for the generated demo tide table.
    pub table: TableConfig,
    /// The query the demo runs against it.
    pub query: QueryConfig,
}

/// Water-level factors for the semidiurnal height model.
#[derive(Debug, Deserialize, Serialize)]
pub struct TableConfig {
    /// Unscaled low-water level in meters.
    pub min_water_factor: f64,
    /// Unscaled high-water level in meters.
    pub max_water_factor: f64,
    /// Spring-neap level applied to the whole table.
    pub neap_factor: f64,
}

/// Position and threshold for the demo queries.
#[derive(Debug, Deserialize, Serialize)]
pub struct QueryConfig {
    /// 1-based day to anchor the queries on.
    pub day_number: usize,
    /// 1-based tide event the interval query starts from.
    pub tide_number: usize,
    /// Height threshold in meters for the interval query.
    pub height_to_find: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            table: TableConfig {
                min_water_factor: 2.0,
                max_water_factor: 5.0,
                neap_factor: 3.82,
            },
            query: QueryConfig {
                day_number: 2,
                tide_number: 3,
                height_to_find: 4.3,
            },
        }
    }
}

impl Config {
    /// Load configuration from `tide-almanac.toml` in the working directory.
    /// Falls back to the default configuration if the file is missing or
    /// invalid.
    pub fn load() -> Self {
        Self::load_from_path("tide-almanac.toml")
    }

    /// Load configuration from the given path, falling back to defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: invalid config file format: {e}");
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_matches_the_demo_fixture() {
        let config = Config::default();
        assert_eq!(config.table.min_water_factor, 2.0);
        assert_eq!(config.table.max_water_factor, 5.0);
        assert_eq!(config.table.neap_factor, 3.82);
        assert_eq!(config.query.day_number, 2);
        assert_eq!(config.query.height_to_find, 4.3);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.table.neap_factor, parsed.table.neap_factor);
        assert_eq!(config.query.tide_number, parsed.query.tide_number);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_from_path("/nonexistent/path/tide-almanac.toml");
        assert_eq!(config.table.max_water_factor, 5.0);
    }

    #[test]
    fn valid_file_overrides_the_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[table]\nmin_water_factor = 3.0\nmax_water_factor = 9.0\nneap_factor = 1.5\n\
             \n[query]\nday_number = 1\ntide_number = 2\nheight_to_find = 5.5\n"
        )
        .unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.table.max_water_factor, 9.0);
        assert_eq!(config.query.height_to_find, 5.5);
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not toml at all {{{{").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.table.min_water_factor, 2.0);
    }
}
