//! The main config loading module for fstation.
//!
//! Handles loading and deserializing settings from `station.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config generation for `fst --init`.

use crate::config::{General, InternalNetwork, Network};
use crate::utils::get_home;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Raw configuration as read from the toml file.
/// It is converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    network: Network,
}

/// Main configuration struct for fstation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    general: General,
    network: InternalNetwork,
}

/// Conversion from RawConfig to Config
/// This handles clamping and normalizing the raw values
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            network: InternalNetwork::from(raw.network),
        }
    }
}

const DEFAULT_TOML: &str = r##"# station.toml - default configuration for fstation

# Commented values are the internal defaults.

[general]
# Sort order of a freshly loaded listing
# sort = "name"         # "name", "size" or "date"
# direction = "asc"     # "asc" or "desc"

[network]
# Request timeout in seconds (1 to 300)
# timeout_secs = 10
# user_agent = "fstation/<version>"
# Base URL relative hrefs are resolved against when the listing is read from a file
# base_url = "https://files.example.com/pub/"
"##;

impl Config {
    /// Loads the configuration from `path`, or from [default_path](Self::default_path).
    ///
    /// A missing file gives the defaults with a notice on stderr. An unreadable or invalid file
    /// gives the defaults and logs the error.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);

        if !path.exists() {
            eprintln!(
                "No station.toml config file found. Using internal defaults. (Tip: run 'fst --init' to generate a config file.)"
            );
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "config loaded");
                    config
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), "error parsing config: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(path = %path.display(), "error reading config: {e}");
                Self::default()
            }
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Self::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn network(&self) -> &InternalNetwork {
        &self.network
    }

    /// Determine the default configuration file path.
    /// Checks the FSTATION_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/fstation/station.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FSTATION_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("fstation/station.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/fstation/station.toml");
        }
        PathBuf::from("station.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        Ok(())
    }
}
