//! Reflective object protocol
//!
//! Anything that can be asked for a method handle. Objects expose their
//! genuine method table, but may override [`Receiver::method`] with
//! arbitrary behavior: returning the wrong thing, failing, or proxying to
//! some other object.

use crate::core::models::{Lookup, LookupError, MethodHandle, MethodTable, NoSuchMethodError};

/// An object that methods can be resolved against
pub trait Receiver {
    /// Short description used in diagnostics (e.g. `#<Widget>`)
    fn describe(&self) -> String;

    /// The genuine method table, as seen by the root lookup primitive
    fn methods(&self) -> &MethodTable;

    /// Whether the object participates in the root type's reflection mixin
    ///
    /// Objects that opt out only support their own [`Receiver::method`].
    fn includes_root(&self) -> bool {
        true
    }

    /// The object's own method lookup
    ///
    /// Defaults to the root primitive; implementors may override it.
    fn method(&self, name: &str) -> Result<Lookup, LookupError> {
        root_method(self, name).map(Lookup::Handle).map_err(LookupError::from)
    }
}

/// The root lookup primitive
///
/// Reads the receiver's method table directly, so any override of
/// [`Receiver::method`] is bypassed.
pub fn root_method<R>(receiver: &R, name: &str) -> Result<MethodHandle, NoSuchMethodError>
where
    R: Receiver + ?Sized,
{
    let description = receiver.describe();
    receiver
        .methods()
        .bind(&description, name)
        .ok_or_else(|| NoSuchMethodError::new(description, name))
}
