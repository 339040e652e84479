//! Shared types for the fetch and callback demos.
//!
//! This crate holds the data model exchanged with the fixture API, the error
//! type used by the HTTP client, and the configuration both demos read at
//! startup.
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

/// Configuration loading and defaults.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Lock helpers for shared demo state.
pub mod sync;
/// Users, posts and profiles.
pub mod types;

pub use config::{ApiConfig, ChainConfig, DemoConfig};
pub use error::{Error, Result};
pub use sync::IgnoreLock;
pub use types::{NewPost, NewUser, Post, Profile, SessionUser, User};
