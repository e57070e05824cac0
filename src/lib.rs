//! expect-support - Support layer for expectation frameworks
//!
//! Two independent facilities that assertion libraries build on:
//!
//! - **Method handles**: [`method_handle_for`] produces a callable for an
//!   object's method even when the object overrides, breaks, or proxies its
//!   own method lookup.
//! - **Failure notification**: assertion helpers report failures through
//!   [`notify_failure`]. Where the failure goes is decided by the current
//!   thread's notifier, which [`with_failure_notifier`] can swap for the
//!   duration of a closure. With no notifier installed the failure is
//!   returned as an `Err`.
//!
//! # Examples
//!
//! ```
//! use expect_support::{FailureAggregator, Options, notify_failure};
//!
//! let aggregator = FailureAggregator::new();
//! aggregator.aggregate(|| {
//!     notify_failure(anyhow::anyhow!("expected 1, got 2"), &Options::new()).unwrap();
//!     notify_failure(anyhow::anyhow!("expected 3, got 4"), &Options::new()).unwrap();
//! });
//! assert_eq!(aggregator.len(), 2);
//!
//! // Outside the block, failures are raised again
//! assert!(notify_failure(anyhow::anyhow!("boom"), &Options::new()).is_err());
//! ```

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

use std::sync::OnceLock;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod core;
pub mod differ;
pub mod objects;
pub mod output;
pub mod warnings;

pub use crate::config::{Features, SupportConfig};
pub use crate::core::models::{
    Arity, CallError, Failure, Lookup, LookupError, MethodHandle, MethodTable, NoSuchMethodError,
    Notifier, NotifyResult, Options,
};
pub use crate::core::ports::{Notify, Receiver};
pub use crate::core::services::{
    FailureAggregator, MethodResolver, failure_notifier, install_failure_notifier, notify_failure,
    set_failure_notifier, with_failure_notifier,
};
pub use crate::objects::BasicObject;

static RESOLVER: OnceLock<MethodResolver> = OnceLock::new();

/// The process-wide resolver, built from [`Features::detect`]
///
/// Reads no files; install a [`SupportConfig`] first to change its features.
#[must_use]
pub fn method_resolver() -> &'static MethodResolver {
    RESOLVER.get_or_init(|| MethodResolver::new(Features::detect()))
}

/// Resolve a handle for `name` on `receiver`
///
/// See [`MethodResolver`] for the lookup order.
pub fn method_handle_for(
    receiver: &dyn Receiver,
    name: &str,
) -> Result<MethodHandle, NoSuchMethodError> {
    method_resolver().resolve(receiver, name)
}
