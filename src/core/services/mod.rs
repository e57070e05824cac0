//! Core services
//!
//! - [`method_resolver`] - Resolve method handles despite lookup overrides
//! - [`failure_channel`] - Per-thread failure notifier with scoped overrides

pub mod failure_channel;
pub mod method_resolver;

pub use failure_channel::{
    AggregatedFailures, FailureAggregator, NotifierGuard, dispatch, failure_notifier,
    install_failure_notifier, notify_failure, reset_failure_notifier, set_failure_notifier,
    with_failure_notifier,
};
pub use method_resolver::{Fallback, MethodResolver};
