//! Configuration and pre-computed feature flags
//!
//! Configuration is read from TOML, but only when asked: library calls see
//! the config passed to [`SupportConfig::install`], or the defaults.
//! The lookup order for [`SupportConfig::discover`] is:
//!
//! 1. The file named by `EXPECT_SUPPORT_CONFIG`
//! 2. `<config dir>/expect-support/config.toml` (XDG on Linux)
//! 3. Built-in defaults
//!
//! ```toml
//! [features]
//! module_method_rebinding = true
//!
//! [diff]
//! color = false
//! expected_label = "expected"
//! actual_label = "actual"
//!
//! [warnings]
//! enabled = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "EXPECT_SUPPORT_CONFIG";

/// Directory name under the user config dir
const CONFIG_DIR_NAME: &str = "expect-support";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

static CURRENT: OnceLock<SupportConfig> = OnceLock::new();

/// Errors reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file is not valid config TOML
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },
}

/// Capabilities of the host, decided once and read by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Features {
    /// Whether the root lookup primitive can be rebound to any object
    ///
    /// When off, the root lookup is only used for objects in the root mixin.
    #[serde(default = "default_true")]
    pub module_method_rebinding: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for Features {
    fn default() -> Self {
        Self {
            module_method_rebinding: true,
        }
    }
}

impl Features {
    /// Features with root lookup rebinding unavailable
    #[must_use]
    pub const fn without_rebinding() -> Self {
        Self {
            module_method_rebinding: false,
        }
    }

    /// The process-wide feature set
    ///
    /// Taken from the installed [`SupportConfig`], else the defaults. Never
    /// reads the filesystem.
    #[must_use]
    pub fn detect() -> Self {
        SupportConfig::current().features
    }
}

/// Diff rendering preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiffConfig {
    /// Colorize rendered output
    #[serde(default)]
    pub color: bool,
    /// Label for the expected side
    #[serde(default = "default_expected_label")]
    pub expected_label: String,
    /// Label for the actual side
    #[serde(default = "default_actual_label")]
    pub actual_label: String,
}

fn default_expected_label() -> String {
    "expected".to_string()
}

fn default_actual_label() -> String {
    "actual".to_string()
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            color: false,
            expected_label: default_expected_label(),
            actual_label: default_actual_label(),
        }
    }
}

/// Warning preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningConfig {
    /// Emit warnings and deprecations at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportConfig {
    /// Feature flags
    #[serde(default)]
    pub features: Features,
    /// Diff rendering
    #[serde(default)]
    pub diff: DiffConfig,
    /// Warnings
    #[serde(default)]
    pub warnings: WarningConfig,
}

impl SupportConfig {
    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default per-user config file location
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
    }

    /// The config file that [`SupportConfig::discover`] would read, if any
    #[must_use]
    pub fn discover_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        Self::user_config_path().filter(|path| path.exists())
    }

    /// Find and load config, falling back to defaults
    ///
    /// An unreadable or invalid file is logged and ignored.
    #[must_use]
    pub fn discover() -> Self {
        let Some(path) = Self::discover_path() else {
            log::debug!("no config file found, using defaults");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                config
            },
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            },
        }
    }

    /// The process-wide config
    ///
    /// Whatever was passed to [`SupportConfig::install`], else the defaults.
    /// Files are only read by [`SupportConfig::load`] and
    /// [`SupportConfig::discover`].
    #[must_use]
    pub fn current() -> &'static Self {
        CURRENT.get_or_init(Self::default)
    }

    /// Install the process-wide config before anything reads it
    ///
    /// Returns the config back if one is already in place.
    pub fn install(self) -> Result<(), Self> {
        CURRENT.set(self)
    }

    /// Render as pretty TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
