//! Sequential asynchronous composition, two ways.
//!
//! The same dependent steps are written first with nested continuations,
//! where each step schedules the next from inside its callback, and then as a
//! linear sequence of `.await` points. Both preserve strict ordering; only the
//! shape of the code changes.
//!
//! Every observable effect goes through a [`Journal`], so callers and tests
//! can check ordering and simulated timing.
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

/// Continuation-passing login flow.
pub mod continuation;
/// Ordered record of log lines and state transitions.
pub mod journal;
/// Linear `async`/`.await` login flow.
pub mod linear;
/// Stage definitions, scripted outcomes and errors.
pub mod stage;
/// Nested delayed log steps.
pub mod steps;

pub use journal::{EntryKind, FlowState, Journal, JournalEntry};
pub use stage::{ChainError, LoginSummary, Outcome, Stage, StageError, StageScript};
