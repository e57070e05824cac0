//! Ready-made reflective objects
//!
//! [`BasicObject`] is a plain [`Receiver`] backed by a method table. It uses
//! the root lookup unchanged, which makes it the usual building block for
//! wrappers that override lookup.

use serde_json::Value;
use thiserror::Error;

use crate::core::models::{Arity, CallError, MethodTable, NoSuchMethodError};
use crate::core::ports::{Receiver, root_method};

/// Failure of a direct method call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The object has no such method
    #[error(transparent)]
    NoSuchMethod(#[from] NoSuchMethodError),

    /// The method ran and failed
    #[error(transparent)]
    Call(#[from] CallError),
}

/// An object defined entirely by its method table
#[derive(Debug, Clone)]
pub struct BasicObject {
    name: String,
    table: MethodTable,
    includes_root: bool,
}

impl BasicObject {
    /// Create an object that participates in the root mixin
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: MethodTable::new(),
            includes_root: true,
        }
    }

    /// Create an object outside the root mixin
    #[must_use]
    pub fn foreign(name: impl Into<String>) -> Self {
        Self {
            includes_root: false,
            ..Self::new(name)
        }
    }

    /// Builder-style method definition
    #[must_use]
    pub fn with_method<F>(mut self, name: impl Into<String>, arity: Arity, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.table.define(name, arity, body);
        self
    }

    /// The object's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mutable access to the method table
    pub fn methods_mut(&mut self) -> &mut MethodTable {
        &mut self.table
    }

    /// Call a method directly, without going through a handle
    pub fn send(&self, name: &str, args: &[Value]) -> Result<Value, SendError> {
        let handle = root_method(self, name)?;
        Ok(handle.call(args)?)
    }
}

impl Receiver for BasicObject {
    fn describe(&self) -> String {
        format!("#<{}>", self.name())
    }

    fn methods(&self) -> &MethodTable {
        &self.table
    }

    fn includes_root(&self) -> bool {
        self.includes_root
    }
}
