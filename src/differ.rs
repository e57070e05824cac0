//! Lazily initialised diff rendering
//!
//! Failure messages sometimes want a human-readable comparison of expected
//! and actual values. The renderer behind [`differ`] is built on first use,
//! from a factory registered with [`register_differ`] or, failing that, the
//! built-in [`ExpectedActual`] renderer.

use std::sync::{Mutex, OnceLock, PoisonError};

use colored::Colorize;
use serde_json::Value;
use thiserror::Error;

use crate::config::{DiffConfig, SupportConfig};

/// Renders a comparison of two values
pub trait DiffRenderer: Send + Sync {
    /// Render `expected` against `actual`
    fn render(&self, expected: &Value, actual: &Value) -> String;
}

/// Builds the renderer on first use
pub type DifferFactory = Box<dyn FnOnce() -> Box<dyn DiffRenderer> + Send>;

/// Errors registering a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DifferError {
    /// The renderer was already built
    #[error("diff renderer already initialised")]
    AlreadyInitialized,
}

/// Registration state, guarded by one lock so registering and building
/// cannot interleave
enum FactorySlot {
    /// Not built yet, with the factory to build from, if any
    Pending(Option<DifferFactory>),
    /// The factory has been consumed by [`differ`]
    Consumed,
}

static FACTORY: Mutex<FactorySlot> = Mutex::new(FactorySlot::Pending(None));
static DIFFER: OnceLock<Box<dyn DiffRenderer>> = OnceLock::new();

/// Register the factory used to build the renderer
///
/// Fails once [`differ`] has started building. A later registration
/// replaces an earlier one.
pub fn register_differ<F, R>(factory: F) -> Result<(), DifferError>
where
    F: FnOnce() -> R + Send + 'static,
    R: DiffRenderer + 'static,
{
    let mut slot = FACTORY.lock().unwrap_or_else(PoisonError::into_inner);
    if matches!(*slot, FactorySlot::Consumed) {
        return Err(DifferError::AlreadyInitialized);
    }
    let factory: DifferFactory = Box::new(move || -> Box<dyn DiffRenderer> { Box::new(factory()) });
    *slot = FactorySlot::Pending(Some(factory));
    Ok(())
}

/// Whether the renderer has been built yet
#[must_use]
pub fn is_initialized() -> bool {
    DIFFER.get().is_some()
}

fn take_factory() -> Option<DifferFactory> {
    let mut slot = FACTORY.lock().unwrap_or_else(PoisonError::into_inner);
    match std::mem::replace(&mut *slot, FactorySlot::Consumed) {
        FactorySlot::Pending(factory) => factory,
        FactorySlot::Consumed => None,
    }
}

/// The renderer, built on first call
#[must_use]
pub fn differ() -> &'static dyn DiffRenderer {
    DIFFER
        .get_or_init(|| match take_factory() {
            Some(factory) => {
                log::debug!("building registered diff renderer");
                factory()
            },
            None => Box::new(ExpectedActual::from_config(&SupportConfig::current().diff)),
        })
        .as_ref()
}

/// Labels both values on their own lines; does not compute a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedActual {
    expected_label: String,
    actual_label: String,
    color: bool,
}

impl Default for ExpectedActual {
    fn default() -> Self {
        Self::from_config(&DiffConfig::default())
    }
}

impl ExpectedActual {
    /// Build from diff preferences
    #[must_use]
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            expected_label: config.expected_label.clone(),
            actual_label: config.actual_label.clone(),
            color: config.color,
        }
    }

    fn format_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

impl DiffRenderer for ExpectedActual {
    fn render(&self, expected: &Value, actual: &Value) -> String {
        let width = self.expected_label.len().max(self.actual_label.len());
        let expected = Self::format_value(expected);
        let actual = Self::format_value(actual);
        let (expected, actual) = if self.color {
            (expected.green().to_string(), actual.red().to_string())
        } else {
            (expected, actual)
        };
        format!(
            "{:>width$}: {expected}\n{:>width$}: {actual}",
            self.expected_label, self.actual_label
        )
    }
}
