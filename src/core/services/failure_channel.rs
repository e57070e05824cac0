//! Failure notification channel
//!
//! Each thread owns a single notifier slot. Assertion helpers report failures
//! through [`notify_failure`], which forwards them to whatever notifier is
//! current. With nothing installed, the failure comes straight back as an
//! `Err`, so a reported failure can never be silently lost.
//!
//! Overrides are scoped: [`with_failure_notifier`] installs a notifier for the
//! duration of a closure and restores the previous one through a drop guard,
//! so restoration happens on normal return, on `Err` results and on panic.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use log::{debug, trace};
use thiserror::Error;

use crate::core::models::{Failure, Notifier, NotifyResult, Options};

thread_local! {
    static CURRENT: RefCell<Option<Notifier>> = const { RefCell::new(None) };
}

fn replace_slot(notifier: Option<Notifier>) -> Option<Notifier> {
    CURRENT.with(|slot| slot.replace(notifier))
}

/// The current thread's notifier, or the raise notifier if none is set
#[must_use]
pub fn failure_notifier() -> Notifier {
    CURRENT.with(|slot| slot.borrow().clone().unwrap_or_default())
}

/// Install `notifier` for the current thread
///
/// No arity check happens here; the convention is resolved at dispatch.
pub fn set_failure_notifier(notifier: Notifier) {
    debug!("installing failure notifier {notifier:?}");
    replace_slot(Some(notifier));
}

/// Clear the current thread's notifier, reverting to the default
pub fn reset_failure_notifier() {
    replace_slot(None);
}

/// Report a failure to the current notifier
///
/// Errors returned by the notifier are passed through untouched.
pub fn notify_failure(failure: Failure, options: &Options) -> NotifyResult {
    // Clone out of the slot so the notifier may itself swap notifiers.
    let notifier = failure_notifier();
    dispatch(&notifier, failure, options)
}

/// Hand a failure to a specific notifier, honoring its calling convention
///
/// - one-parameter notifiers get the failure only; options are dropped
/// - the raise primitive gets the failure only, since its optional second
///   parameter is a message and not an options mapping
/// - everything else gets the failure and the options
pub fn dispatch(notifier: &Notifier, failure: Failure, options: &Options) -> NotifyResult {
    let arity = notifier.arity();
    trace!("dispatching failure to {notifier:?} (arity {arity})");

    if arity.is_exactly(1) || notifier.is_raise() {
        notifier.call_unary(failure)
    } else {
        notifier.call_binary(failure, options)
    }
}

/// Restores the previous notifier when dropped
///
/// Guards must be dropped in reverse order of creation. Tied to the thread
/// that created it.
#[must_use = "the notifier is restored as soon as the guard is dropped"]
pub struct NotifierGuard {
    previous: Option<Notifier>,
    _thread_bound: PhantomData<Rc<()>>,
}

impl fmt::Debug for NotifierGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierGuard").field("previous", &self.previous).finish()
    }
}

impl Drop for NotifierGuard {
    fn drop(&mut self) {
        debug!("restoring failure notifier {:?}", self.previous);
        replace_slot(self.previous.take());
    }
}

/// Install `notifier` until the returned guard is dropped
pub fn install_failure_notifier(notifier: Notifier) -> NotifierGuard {
    debug!("installing scoped failure notifier {notifier:?}");
    let previous = replace_slot(Some(notifier));
    NotifierGuard {
        previous,
        _thread_bound: PhantomData,
    }
}

/// Run `f` with `notifier` installed, then restore the previous notifier
///
/// Returns whatever `f` returns. Restoration also runs if `f` panics.
pub fn with_failure_notifier<T, F>(notifier: Notifier, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _guard = install_failure_notifier(notifier);
    f()
}

/// Several failures collected by a [`FailureAggregator`]
#[derive(Debug, Error)]
#[error("{}", render_aggregate(.failures))]
pub struct AggregatedFailures {
    /// The collected failures, in report order
    pub failures: Vec<Failure>,
}

fn render_aggregate(failures: &[Failure]) -> String {
    let mut out = format!("Got {} failures:", failures.len());
    for (i, failure) in failures.iter().enumerate() {
        out.push_str(&format!("\n\n  {}) {failure}", i + 1));
    }
    out
}

/// Collects failures instead of raising them
///
/// Lets a block report several failures and surface them together.
#[derive(Debug, Clone, Default)]
pub struct FailureAggregator {
    collected: Rc<RefCell<Vec<(Failure, Options)>>>,
}

impl FailureAggregator {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that records into this aggregator
    #[must_use]
    pub fn notifier(&self) -> Notifier {
        let sink = Rc::clone(&self.collected);
        Notifier::binary(move |failure, options| {
            sink.borrow_mut().push((failure, options.clone()));
            Ok(())
        })
    }

    /// Run `f` with failures collected here
    pub fn aggregate<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        with_failure_notifier(self.notifier(), f)
    }

    /// Number of failures collected
    #[must_use]
    pub fn len(&self) -> usize {
        self.collected.borrow().len()
    }

    /// Whether nothing has been collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collected.borrow().is_empty()
    }

    /// Options recorded with each failure, in report order
    #[must_use]
    pub fn options(&self) -> Vec<Options> {
        self.collected.borrow().iter().map(|(_, options)| options.clone()).collect()
    }

    /// Drain collected failures and options
    pub fn take(&self) -> Vec<(Failure, Options)> {
        self.collected.borrow_mut().drain(..).collect()
    }

    /// Surface what was collected
    ///
    /// A single failure is returned as-is; several are wrapped in
    /// [`AggregatedFailures`].
    pub fn finish(&self) -> NotifyResult {
        let mut failures: Vec<Failure> = self.take().into_iter().map(|(failure, _)| failure).collect();
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(AggregatedFailures { failures }.into()),
        }
    }
}
