//! `.docmap.toml` configuration.
//!
//! A single optional file at the scan root. Two sections: `[scan]` with
//! exclusion globs applied to paths relative to the root, and `[render]`
//! with a color toggle. A missing file yields the defaults.

use std::{fs, io, path::Path};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file looked up at the scan root.
pub const CONFIG_FILENAME: &str = ".docmap.toml";

/// Errors from loading or compiling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid TOML or has the wrong shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: String,
        /// Underlying TOML error.
        source: Box<toml::de::Error>,
    },

    /// An exclusion pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },
}

/// Parsed `.docmap.toml` contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory scanning options.
    #[serde(default)]
    pub scan: ScanConfig,
    /// Rendering options.
    #[serde(default)]
    pub render: RenderConfig,
}

/// The `[scan]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Glob patterns excluded from directory scans, matched against
    /// paths relative to the scan root.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// The `[render]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Whether to emit ANSI colors. Defaults to true.
    #[serde(default = "default_color")]
    pub color: bool,
}

/// Serde default for [`RenderConfig::color`].
fn default_color() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Config {
    /// Loads `.docmap.toml` from `root` if present, otherwise defaults.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source: Box::new(source),
        })
    }

    /// Compiles the exclusion patterns into a matcher.
    pub fn exclude_set(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.scan.exclude {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::InvalidPattern {
            pattern: "<combined>".to_string(),
            source,
        })
    }
}
