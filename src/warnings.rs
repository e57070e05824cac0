//! Warning and deprecation notices
//!
//! Unlike failures, warnings go through a single process-wide notifier. The
//! default logs at `warn` level. Messages carry the caller's source location.

use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::SupportConfig;

/// Signature of a warning notifier
pub type WarningFn = dyn Fn(&str) + Send + Sync;

static NOTIFIER: RwLock<Option<Arc<WarningFn>>> = RwLock::new(None);

fn log_warning(message: &str) {
    log::warn!("{message}");
}

/// The current warning notifier
#[must_use]
pub fn warning_notifier() -> Arc<WarningFn> {
    NOTIFIER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(|| Arc::new(log_warning))
}

/// Replace the warning notifier for the whole process
pub fn set_warning_notifier<F>(notifier: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    *NOTIFIER.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(notifier));
}

/// Go back to logging warnings
pub fn reset_warning_notifier() {
    *NOTIFIER.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Emit `message` with the caller's location appended
///
/// Silent when the installed [`SupportConfig`] disables warnings.
#[track_caller]
pub fn warn_with(message: &str) {
    if !SupportConfig::current().warnings.enabled {
        return;
    }
    let location = Location::caller();
    let notifier = warning_notifier();
    notifier(&format!("{message} Called from {}:{}.", location.file(), location.line()));
}

/// Emit a general warning
#[track_caller]
pub fn warning(text: &str) {
    warn_with(&format!("WARNING: {text}"));
}

/// Emit a deprecation notice, optionally naming the replacement
#[track_caller]
pub fn deprecate(deprecated: &str, replacement: Option<&str>) {
    let mut message = format!("DEPRECATION: {deprecated} is deprecated.");
    if let Some(replacement) = replacement {
        message.push_str(&format!(" Use {replacement} instead."));
    }
    warn_with(&message);
}
