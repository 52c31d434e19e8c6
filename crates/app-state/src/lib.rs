//! Application state for the Nexa session core
//!
//! This crate owns the single observable source of truth for "who is logged
//! in", and the controller that mutates it by orchestrating the auth API
//! client and the secure credential store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod observable;
pub mod session;

pub use observable::{Observable, Subscription};
pub use session::{SessionController, SessionState};
