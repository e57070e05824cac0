//! Core logic
//!
//! No I/O happens here. External behavior is reached through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Method tables, handles, notifiers, arities, errors
//! - `ports/` - Traits for reflective objects and notifier objects
//! - `services/` - The method resolver and the failure channel

pub mod models;
pub mod ports;
pub mod services;
