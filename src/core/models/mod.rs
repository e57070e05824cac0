//! Domain models
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`MethodTable`] / [`MethodHandle`] - What an object can do, and a bound callable
//! - [`Lookup`] - The possibly-untrustworthy answer of an object's own lookup
//! - [`Notifier`] - A pluggable failure callback
//! - [`Arity`] - Declared parameter counts

mod arity;
mod error;
mod method;
mod notifier;

pub use arity::Arity;
pub use error::{CallError, LookupError, NoSuchMethodError};
pub use method::{Lookup, MethodBody, MethodDef, MethodHandle, MethodTable};
pub use notifier::{BinaryFn, Failure, Notifier, NotifyResult, Options, UnaryFn};
