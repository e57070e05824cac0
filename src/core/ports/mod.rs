//! Port traits (interfaces) at the edges of the core
//!
//! - [`Receiver`] - Objects that methods are resolved against
//! - [`Notify`] - Objects that receive failures
//!
//! Ready-made implementations live in [`crate::objects`] and
//! [`crate::core::services::failure_channel`].

mod notify;
mod receiver;

#[cfg(test)]
pub use notify::MockNotify;
pub use notify::Notify;
pub use receiver::{Receiver, root_method};
