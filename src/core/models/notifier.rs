//! Failure notifiers
//!
//! A notifier is the pluggable callback that receives a failure when an
//! expectation is violated. Two calling conventions exist: legacy notifiers
//! take only the failure, newer ones also take an options mapping. The
//! convention is fixed when the [`Notifier`] is constructed.

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use super::Arity;
use crate::core::ports::Notify;

/// An opaque failure value, passed through without inspection
pub type Failure = anyhow::Error;

/// Extra metadata delivered alongside a failure
pub type Options = Map<String, Value>;

/// Outcome of handing a failure to a notifier
///
/// `Err` means the failure (or whatever the notifier chose) was raised.
pub type NotifyResult = Result<(), Failure>;

/// Signature of a one-argument notifier
pub type UnaryFn = dyn Fn(Failure) -> NotifyResult;

/// Signature of a two-argument notifier
pub type BinaryFn = dyn Fn(Failure, &Options) -> NotifyResult;

/// A failure notifier
#[derive(Clone)]
pub enum Notifier {
    /// The raise primitive: hands the failure straight back as an error
    ///
    /// Accepts an optional second (message) argument, so options must never
    /// be passed to it positionally.
    Raise,
    /// Legacy notifier taking only the failure
    Unary(Rc<UnaryFn>),
    /// Notifier taking the failure and the options mapping
    Binary(Rc<BinaryFn>),
    /// A notifier object implementing [`Notify`]
    Object(Rc<dyn Notify>),
}

impl Notifier {
    /// The notifier used when none has been installed
    #[must_use]
    pub const fn default_notifier() -> Self {
        Self::Raise
    }

    /// Wrap a one-argument closure
    #[must_use]
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Failure) -> NotifyResult + 'static,
    {
        Self::Unary(Rc::new(f))
    }

    /// Wrap a two-argument closure
    #[must_use]
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(Failure, &Options) -> NotifyResult + 'static,
    {
        Self::Binary(Rc::new(f))
    }

    /// Wrap a notifier object
    #[must_use]
    pub fn object<N>(notifier: N) -> Self
    where
        N: Notify + 'static,
    {
        Self::Object(Rc::new(notifier))
    }

    /// Expected parameter count
    ///
    /// Objects that declare an arity are taken at their word; otherwise the
    /// arity of their single entry point, [`Notify::notify`], is used.
    #[must_use]
    pub fn arity(&self) -> Arity {
        match self {
            Self::Raise => Arity::AtLeast(1),
            Self::Unary(_) => Arity::Exactly(1),
            Self::Binary(_) => Arity::Exactly(2),
            Self::Object(obj) => obj.arity().unwrap_or(Arity::Exactly(2)),
        }
    }

    /// Whether this is the raise primitive
    #[must_use]
    pub const fn is_raise(&self) -> bool {
        matches!(self, Self::Raise)
    }

    /// Invoke with the failure alone
    pub(crate) fn call_unary(&self, failure: Failure) -> NotifyResult {
        match self {
            Self::Raise => Err(failure),
            Self::Unary(f) => f(failure),
            Self::Binary(f) => f(failure, &Options::new()),
            Self::Object(obj) => obj.notify(failure, &Options::new()),
        }
    }

    /// Invoke with the failure and options
    ///
    /// The raise primitive reads a second argument as the message, so the
    /// options end up as the message of the raised failure.
    pub(crate) fn call_binary(&self, failure: Failure, options: &Options) -> NotifyResult {
        match self {
            Self::Raise => Err(failure.context(Value::Object(options.clone()).to_string())),
            Self::Unary(f) => f(failure),
            Self::Binary(f) => f(failure, options),
            Self::Object(obj) => obj.notify(failure, options),
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::default_notifier()
    }
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Raise, Self::Raise) => true,
            (Self::Unary(a), Self::Unary(b)) => Rc::ptr_eq(a, b),
            (Self::Binary(a), Self::Binary(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raise => write!(f, "Notifier::Raise"),
            Self::Unary(g) => write!(f, "Notifier::Unary({:p})", Rc::as_ptr(g).cast::<()>()),
            Self::Binary(g) => write!(f, "Notifier::Binary({:p})", Rc::as_ptr(g).cast::<()>()),
            Self::Object(g) => write!(f, "Notifier::Object({:p})", Rc::as_ptr(g).cast::<()>()),
        }
    }
}
