//! Four delayed log lines, scheduled by nesting each timer inside the previous one.

use core::time::Duration;

use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::warn;

use crate::journal::Journal;
use crate::stage::ChainError;

/// Lines logged by the step demo, in order.
pub const STEP_MESSAGES: [&str; 4] = [
    "Step 1 complete",
    "Step 2 complete",
    "Step 3 complete",
    "All steps complete",
];

/// Calls `callback` once `delay` has elapsed, without blocking the caller.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn after<F>(delay: Duration, callback: F)
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        sleep(delay).await;
        callback();
    });
}

/// Logs the four step lines, each `delay` after the previous one, then calls `done`.
///
/// Each timer is only armed from inside the previous timer's callback.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn run_nested_steps<F>(delay: Duration, journal: Journal, done: F)
where
    F: FnOnce() + Send + 'static,
{
    after(delay, move || {
        journal.log(STEP_MESSAGES[0]);
        after(delay, move || {
            journal.log(STEP_MESSAGES[1]);
            after(delay, move || {
                journal.log(STEP_MESSAGES[2]);
                after(delay, move || {
                    journal.log(STEP_MESSAGES[3]);
                    done();
                });
            });
        });
    });
}

/// Runs [`run_nested_steps`] and waits for its final callback.
///
/// # Errors
///
/// Returns [`ChainError::Dropped`] if the final callback never runs.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub async fn await_nested_steps(delay: Duration, journal: Journal) -> Result<(), ChainError> {
    let (sender, receiver) = oneshot::channel();
    run_nested_steps(delay, journal, move || {
        if sender.send(()).is_err() {
            warn!("Step demo finished after its caller stopped waiting");
        }
    });
    receiver.await.map_err(|_| ChainError::Dropped)
}

/// The same four lines written as a flat sequence of suspension points.
pub async fn run_sequential_steps(delay: Duration, journal: &Journal) {
    for message in STEP_MESSAGES {
        sleep(delay).await;
        journal.log(message);
    }
}
