//! Shared test fixtures
//!
//! Receivers with misbehaving method lookup, and a concrete failure type.

use expect_support::{
    Arity, BasicObject, CallError, Lookup, LookupError, MethodTable, NoSuchMethodError, Receiver,
};
use serde_json::{Value, json};
use thiserror::Error;

/// A failure value with identity, for checking pass-through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {actual}")]
pub struct ExpectationNotMet {
    pub expected: i64,
    pub actual: i64,
}

pub fn failure(expected: i64, actual: i64) -> anyhow::Error {
    ExpectationNotMet { expected, actual }.into()
}

/// A calculator with a few well-behaved methods
pub fn calculator() -> BasicObject {
    BasicObject::new("Calculator")
        .with_method("add", Arity::Exactly(2), |args| {
            match (args[0].as_i64(), args[1].as_i64()) {
                (Some(a), Some(b)) => Ok(json!(a + b)),
                _ => Err(CallError::Failed("add needs integers".to_string())),
            }
        })
        .with_method("zero", Arity::Exactly(0), |_| Ok(json!(0)))
}

/// Overrides lookup to return a non-handle value
pub struct LyingLookup {
    pub inner: BasicObject,
    pub answer: Value,
}

impl Receiver for LyingLookup {
    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn methods(&self) -> &MethodTable {
        self.inner.methods()
    }

    fn includes_root(&self) -> bool {
        self.inner.includes_root()
    }

    fn method(&self, _name: &str) -> Result<Lookup, LookupError> {
        Ok(Lookup::Other(self.answer.clone()))
    }
}

/// Overrides lookup to fail with an unrelated error
pub struct RaisingLookup {
    pub inner: BasicObject,
}

impl Receiver for RaisingLookup {
    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn methods(&self) -> &MethodTable {
        self.inner.methods()
    }

    fn includes_root(&self) -> bool {
        self.inner.includes_root()
    }

    fn method(&self, _name: &str) -> Result<Lookup, LookupError> {
        Err(LookupError::Raised("lookup is broken".to_string()))
    }
}

/// Outside the root mixin, with a working lookup of its own
///
/// Its genuine table is empty; every method comes from `backing`.
pub struct Minimal {
    pub table: MethodTable,
    pub backing: BasicObject,
}

impl Minimal {
    pub fn new(backing: BasicObject) -> Self {
        Self {
            table: MethodTable::new(),
            backing,
        }
    }
}

impl Receiver for Minimal {
    fn describe(&self) -> String {
        "#<Minimal>".to_string()
    }

    fn methods(&self) -> &MethodTable {
        &self.table
    }

    fn includes_root(&self) -> bool {
        false
    }

    fn method(&self, name: &str) -> Result<Lookup, LookupError> {
        self.backing
            .methods()
            .bind(&self.describe(), name)
            .map(Lookup::Handle)
            .ok_or_else(|| NoSuchMethodError::new("#<Minimal> (own lookup)", name).into())
    }
}
