//! Auth API client for the Nexa session core
//!
//! This crate implements the credential-exchange side of the session core:
//! register, password login, federated login (Google/Apple), and the
//! authenticated current-user lookup, all against a single fixed base URL.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use config::ApiConfig;
pub use types::{AuthResponse, User};
