//! Output formatting for human and JSON modes
//!
//! Command results can be rendered either as human-readable text or as
//! machine-parseable JSON.

use serde::Serialize;

use crate::config::{Features, SupportConfig};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Effective configuration and where it came from
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    /// File the config was read from, if any
    pub source: Option<String>,
    /// The configuration
    pub config: SupportConfig,
}

/// Feature flags as read by the core
#[derive(Debug, Serialize)]
pub struct FeaturesReport {
    /// Whether the root lookup can be rebound to any object
    pub module_method_rebinding: bool,
    /// Order of lookups the resolver will try
    pub resolution_order: Vec<String>,
}

/// Version information
#[derive(Debug, Serialize)]
pub struct VersionReport {
    /// Crate version
    pub version: String,
}

impl ConfigReport {
    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) -> anyhow::Result<String> {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_human(&self) -> anyhow::Result<String> {
        let source = self.source.as_deref().unwrap_or("built-in defaults");
        let body = self.config.to_toml_string()?;
        Ok(format!("# source: {source}\n{body}"))
    }
}

impl FeaturesReport {
    /// Describe a feature set
    #[must_use]
    pub fn new(features: Features, fallbacks: impl IntoIterator<Item = &'static str>) -> Self {
        let primary = if features.module_method_rebinding {
            "root lookup"
        } else {
            "root lookup (root mixin only), else own lookup"
        };
        let mut resolution_order = vec![primary.to_string()];
        resolution_order.extend(fallbacks.into_iter().map(str::to_string));
        Self {
            module_method_rebinding: features.module_method_rebinding,
            resolution_order,
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) -> anyhow::Result<String> {
        match mode {
            OutputMode::Human => {
                let mut out = format!("module_method_rebinding: {}\n", self.module_method_rebinding);
                out.push_str("resolution order:");
                for (i, step) in self.resolution_order.iter().enumerate() {
                    out.push_str(&format!("\n  {}. {step}", i + 1));
                }
                Ok(out)
            },
            OutputMode::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl VersionReport {
    /// The running crate version
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: crate::VERSION.to_string(),
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) -> anyhow::Result<String> {
        match mode {
            OutputMode::Human => Ok(format!("expect-support v{}", self.version)),
            OutputMode::Json => Ok(serde_json::to_string(self)?),
        }
    }
}
