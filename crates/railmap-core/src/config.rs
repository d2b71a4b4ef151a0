//! Configuration loading and typed config structures.
//!
//! The configuration lives in `railmap-config.yaml` at the project root.
//! Every field has a default, so an empty file (or no file at all) gives a
//! working setup reading the sample datasets under `data/`.
//!
//! Environment variables override the file:
//! - `RAILMAP_DATA_DIR` overrides `data.dir`
//! - `RAILMAP_PORT` overrides `server.port`
//! - `RAILMAP_LOG_LEVEL` overrides `logging.level`

use std::path::{Path, PathBuf};

use railmap_loader::DatasetSources;
use railmap_types::RegionCode;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The CSV delimiter is not a single ASCII character.
    #[error("CSV delimiter must be ASCII, got {0:?}")]
    InvalidDelimiter(char),

    /// An excluded code is blank.
    #[error("excluded department codes must not be blank")]
    BlankExcludedCode,
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RailmapConfig {
    /// Dataset locations.
    #[serde(default)]
    pub data: DataConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RailmapConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `RAILMAP_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("RAILMAP_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(port) = std::env::var("RAILMAP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(level) = std::env::var("RAILMAP_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

/// Dataset locations and reading options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Directory the file names below are relative to.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Department boundaries (`GeoJSON`).
    #[serde(default = "default_geometry_file")]
    pub geometry_file: String,

    /// Population table.
    #[serde(default = "default_population_file")]
    pub population_file: String,

    /// Rail service table (JSON).
    #[serde(default = "default_rail_file")]
    pub rail_file: String,

    /// Line network overlay (`GeoJSON`). `null` disables it.
    #[serde(default = "default_lines_file")]
    pub lines_file: Option<String>,

    /// Field delimiter of the population table.
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,

    /// Departments removed from every dataset before processing.
    #[serde(default = "default_excluded_codes")]
    pub excluded_codes: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            geometry_file: default_geometry_file(),
            population_file: default_population_file(),
            rail_file: default_rail_file(),
            lines_file: default_lines_file(),
            csv_delimiter: default_csv_delimiter(),
            excluded_codes: default_excluded_codes(),
        }
    }
}

impl DataConfig {
    /// Resolve file names against `dir` for the loader.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelimiter`] for a non-ASCII
    /// delimiter and [`ConfigError::BlankExcludedCode`] for a blank
    /// excluded code.
    pub fn sources(&self) -> Result<DatasetSources, ConfigError> {
        let Some(csv_delimiter) = u8::try_from(self.csv_delimiter)
            .ok()
            .filter(u8::is_ascii)
        else {
            return Err(ConfigError::InvalidDelimiter(self.csv_delimiter));
        };

        let excluded_codes = self
            .excluded_codes
            .iter()
            .map(|c| RegionCode::normalize(c).ok_or(ConfigError::BlankExcludedCode))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DatasetSources {
            geometry: self.dir.join(&self.geometry_file),
            population: self.dir.join(&self.population_file),
            rail: self.dir.join(&self.rail_file),
            lines: self.lines_file.as_ref().map(|f| self.dir.join(f)),
            csv_delimiter,
            excluded_codes,
        })
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_geometry_file() -> String {
    "departement.geojson".to_owned()
}

fn default_population_file() -> String {
    "donnees_departements.csv".to_owned()
}

fn default_rail_file() -> String {
    "tgv_desserte.json".to_owned()
}

#[allow(clippy::unnecessary_wraps)]
fn default_lines_file() -> Option<String> {
    Some("lignes_lgv.geojson".to_owned())
}

const fn default_csv_delimiter() -> char {
    ';'
}

fn default_excluded_codes() -> Vec<String> {
    vec!["2A".to_owned(), "2B".to_owned()]
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}
