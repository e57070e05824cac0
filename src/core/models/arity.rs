//! Declared parameter counts
//!
//! Both method handles and failure notifiers advertise how many positional
//! arguments they take. Dispatch decisions are made on this value.

/// Number of positional parameters a callable accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many arguments
    Exactly(usize),
    /// At least this many arguments, more are optional
    AtLeast(usize),
}

impl Arity {
    /// Whether the callable takes exactly `count` arguments and no optional ones
    #[must_use]
    pub const fn is_exactly(self, count: usize) -> bool {
        matches!(self, Self::Exactly(n) if n == count)
    }

    /// Whether a call with `given` arguments is acceptable
    #[must_use]
    pub const fn accepts(self, given: usize) -> bool {
        match self {
            Self::Exactly(n) => given == n,
            Self::AtLeast(n) => given >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "{n}+"),
        }
    }
}
