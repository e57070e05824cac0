//! Method tables and bound method handles
//!
//! A [`MethodTable`] is the authoritative record of what an object can do.
//! Binding an entry to a receiver produces a [`MethodHandle`], which captures
//! the method body at that moment and is unaffected by later table edits.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Arity, CallError};

/// Signature of a method body
pub type MethodBody = dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync;

/// A method definition stored in a table
#[derive(Clone)]
pub struct MethodDef {
    arity: Arity,
    body: Arc<MethodBody>,
}

impl MethodDef {
    /// Declared arity of this method
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef").field("arity", &self.arity).finish_non_exhaustive()
    }
}

/// Name to method mapping for a single object
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: BTreeMap<String, MethodDef>,
}

impl MethodTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a method
    pub fn define<F>(&mut self, name: impl Into<String>, arity: Arity, body: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.methods.insert(
            name.into(),
            MethodDef {
                arity,
                body: Arc::new(body),
            },
        );
        self
    }

    /// Remove a method, returning whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.methods.remove(name).is_some()
    }

    /// Look up a definition
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MethodDef> {
        self.methods.get(name)
    }

    /// Whether a method with this name is defined
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Defined method names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Bind a method to a receiver description, producing a handle
    #[must_use]
    pub fn bind(&self, receiver: &str, name: &str) -> Option<MethodHandle> {
        self.get(name).map(|def| MethodHandle {
            receiver: receiver.to_string(),
            name: name.to_string(),
            arity: def.arity(),
            body: Arc::clone(&def.body),
        })
    }
}

/// A callable bound to a specific receiver and method
///
/// Cloning a handle is cheap; all clones share the same body.
#[derive(Clone)]
pub struct MethodHandle {
    receiver: String,
    name: String,
    arity: Arity,
    body: Arc<MethodBody>,
}

impl MethodHandle {
    /// Build a handle directly from a body
    #[must_use]
    pub fn new<F>(receiver: impl Into<String>, name: impl Into<String>, arity: Arity, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            receiver: receiver.into(),
            name: name.into(),
            arity,
            body: Arc::new(body),
        }
    }

    /// The method name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the receiver this handle is bound to
    #[must_use]
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Declared arity
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Invoke the method
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        if !self.arity.accepts(args.len()) {
            return Err(CallError::WrongArity {
                method: self.name.clone(),
                expected: self.arity,
                given: args.len(),
            });
        }
        (self.body)(args)
    }

    /// Whether two handles share the same underlying body
    #[must_use]
    pub fn same_body(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Method: {}#{}({})>", self.receiver, self.name, self.arity)
    }
}

/// Answer from an object's own lookup
///
/// Overridden lookups are free to hand back anything, so the result is not
/// guaranteed to be a genuine handle.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// A genuine, callable handle
    Handle(MethodHandle),
    /// Something else entirely
    Other(Value),
}

impl Lookup {
    /// The handle, if this lookup produced one
    #[must_use]
    pub fn into_handle(self) -> Option<MethodHandle> {
        match self {
            Self::Handle(handle) => Some(handle),
            Self::Other(_) => None,
        }
    }
}
