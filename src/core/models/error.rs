//! Reflection error types

use thiserror::Error;

use super::Arity;

/// No strategy could produce a genuine handle for a method
///
/// Always describes the first lookup that was attempted; errors raised by
/// fallback lookups are never surfaced through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undefined method `{method}' for {receiver}{}", detail_suffix(.detail.as_deref()))]
pub struct NoSuchMethodError {
    /// Description of the receiver the lookup ran against
    pub receiver: String,
    /// The method name that was requested
    pub method: String,
    /// Extra diagnostic from the lookup that failed, if any
    pub detail: Option<String>,
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(" ({d})")).unwrap_or_default()
}

impl NoSuchMethodError {
    /// Create an error for `receiver` lacking `method`
    #[must_use]
    pub fn new(receiver: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            method: method.into(),
            detail: None,
        }
    }

    /// Attach a diagnostic detail
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Failure of an object's own method lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The object reports that it has no such method
    #[error(transparent)]
    NoSuchMethod(#[from] NoSuchMethodError),

    /// The lookup itself blew up
    #[error("method lookup raised: {0}")]
    Raised(String),
}

/// Failure while invoking a method body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// Called with the wrong number of arguments
    #[error("wrong number of arguments calling `{method}' (given {given}, expected {expected})")]
    WrongArity {
        /// Method name
        method: String,
        /// Declared arity
        expected: Arity,
        /// Number of arguments supplied
        given: usize,
    },

    /// The method body reported an error
    #[error("{0}")]
    Failed(String),
}
