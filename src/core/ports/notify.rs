//! Notifier object port
//!
//! Lets stateful types act as failure notifiers without being wrapped in a
//! closure.

use crate::core::models::{Arity, Failure, NotifyResult, Options};

/// A failure notifier object
#[cfg_attr(test, mockall::automock)]
pub trait Notify {
    /// Declared parameter count, if the notifier advertises one
    ///
    /// Returning `Some(Arity::Exactly(1))` opts into the legacy convention:
    /// options are dropped and an empty mapping is passed instead.
    fn arity(&self) -> Option<Arity> {
        None
    }

    /// Receive a failure
    fn notify(&self, failure: Failure, options: &Options) -> NotifyResult;
}
