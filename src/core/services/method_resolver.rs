//! Method resolver - produces method handles for uncooperative objects
//!
//! Asking an object for its method is easy to subvert: the object can
//! override its lookup to return junk, to fail, or to proxy to another
//! object. The resolver runs an ordered chain of lookups:
//!
//! 1. **Primary**: the root lookup primitive, which reads the genuine method
//!    table and ignores overrides. Without rebinding support it is only used
//!    for objects in the root mixin; other objects get their own lookup.
//! 2. **Fallbacks**: tried only if the primary fails. Anything other than a
//!    genuine handle (a wrong-shaped answer, or an error) is discarded.
//!
//! When every step fails the error from the primary lookup is returned, since
//! it is the most specific diagnostic.

use log::debug;

use crate::config::Features;
use crate::core::models::{Lookup, LookupError, MethodHandle, NoSuchMethodError};
use crate::core::ports::{Receiver, root_method};

/// A lookup step tried after the primary lookup fails
pub type Fallback = fn(&dyn Receiver, &str) -> Result<Lookup, LookupError>;

/// Resolves method handles via a fixed chain of lookups
#[derive(Debug, Clone)]
pub struct MethodResolver {
    features: Features,
    fallbacks: Vec<(&'static str, Fallback)>,
}

impl Default for MethodResolver {
    fn default() -> Self {
        Self::new(Features::default())
    }
}

impl MethodResolver {
    /// Create a resolver for a host with the given capabilities
    #[must_use]
    pub fn new(features: Features) -> Self {
        let own: Fallback = own_lookup;
        Self {
            features,
            fallbacks: vec![("own lookup", own)],
        }
    }

    /// The capabilities this resolver was built with
    #[must_use]
    pub const fn features(&self) -> Features {
        self.features
    }

    /// Labels of the fallback steps, in the order they run
    pub fn fallback_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fallbacks.iter().map(|(label, _)| *label)
    }

    /// Resolve a handle for `name` on `receiver`
    pub fn resolve(
        &self,
        receiver: &dyn Receiver,
        name: &str,
    ) -> Result<MethodHandle, NoSuchMethodError> {
        let original = match self.primary(receiver, name) {
            Ok(handle) => return Ok(handle),
            Err(err) => err,
        };

        for (label, fallback) in &self.fallbacks {
            match fallback(receiver, name) {
                Ok(Lookup::Handle(handle)) => {
                    debug!("resolved `{name}' on {} via {label}", receiver.describe());
                    return Ok(handle);
                },
                Ok(Lookup::Other(value)) => {
                    debug!("{label} for `{name}' returned a non-handle ({value}), discarding");
                },
                Err(err) => {
                    debug!("{label} for `{name}' failed ({err}), discarding");
                },
            }
        }

        Err(original)
    }

    fn primary(&self, receiver: &dyn Receiver, name: &str) -> Result<MethodHandle, NoSuchMethodError> {
        if self.features.module_method_rebinding || receiver.includes_root() {
            root_method(receiver, name)
        } else {
            direct_lookup(receiver, name)
        }
    }
}

fn own_lookup(receiver: &dyn Receiver, name: &str) -> Result<Lookup, LookupError> {
    receiver.method(name)
}

/// The object's own lookup, with every failure reported as a missing method
///
/// A non-handle answer or a raised error gives the same error as a plain
/// miss on the receiver.
fn direct_lookup(receiver: &dyn Receiver, name: &str) -> Result<MethodHandle, NoSuchMethodError> {
    match receiver.method(name) {
        Ok(Lookup::Handle(handle)) => Ok(handle),
        Ok(Lookup::Other(value)) => {
            debug!("own lookup for `{name}' returned a non-handle ({value}), discarding");
            Err(NoSuchMethodError::new(receiver.describe(), name))
        },
        Err(LookupError::NoSuchMethod(err)) => Err(err),
        Err(LookupError::Raised(message)) => {
            debug!("own lookup for `{name}' failed ({message}), discarding");
            Err(NoSuchMethodError::new(receiver.describe(), name))
        },
    }
}
