//! HTTP demo client for the JSON fixture API.
//!
//! Reads the user list, renders it into a page list, then creates a sample
//! post and a sample user, one request at a time.
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

/// Fixture API client and the shared request routine.
pub mod client;
/// Sequential demo orchestration.
pub mod demo;
/// Page model and user-list rendering.
pub mod render;

pub use client::{FixtureClient, StatusPolicy};
pub use demo::{DemoReport, run};
pub use render::{DEFAULT_HEADING, ListContainer, Page, USER_LIST_ID, render_users};
