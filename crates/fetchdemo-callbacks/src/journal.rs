use core::time::Duration;
use std::sync::{Arc, Mutex};

use fetchdemo_core::IgnoreLock as _;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::stage::Stage;

/// Login flow state machine: `Idle -> LoggingIn -> ProfileFetch -> PostsFetch -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    /// Nothing started yet.
    Idle,
    /// Login stage in flight.
    LoggingIn,
    /// Profile stage in flight.
    ProfileFetch,
    /// Posts stage in flight.
    PostsFetch,
    /// Final continuation ran.
    Done,
    /// A stage failed; no later stage ran.
    Failed(Stage),
}

/// What a journal entry records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A console line.
    Log(String),
    /// A state machine transition.
    Transition(FlowState),
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Time since the journal was created, on the tokio clock.
    pub elapsed: Duration,
    /// The event itself.
    pub kind: EntryKind,
}

/// Shared, ordered record of everything the callback demos do.
///
/// Cloning is cheap; clones append to the same record. Times are taken from
/// the tokio clock, so a paused test runtime yields exact simulated latencies.
#[derive(Debug, Clone)]
pub struct Journal {
    /// Reference point for entry times.
    started: Instant,
    /// Entries in the order they were recorded.
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl Journal {
    /// Creates an empty journal starting now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Records a console line and emits it through `tracing`.
    pub fn log<T: Into<String>>(&self, message: T) {
        let message = message.into();
        info!("{message}");
        self.push(EntryKind::Log(message));
    }

    /// Records a state transition.
    pub fn transition(&self, state: FlowState) {
        debug!(?state, "Login flow transition");
        self.push(EntryKind::Transition(state));
    }

    fn push(&self, kind: EntryKind) {
        let elapsed = self.started.elapsed();
        self.entries
            .lock_ignore_poison()
            .push(JournalEntry { elapsed, kind });
    }

    /// Snapshot of all entries.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock_ignore_poison().clone()
    }

    /// Logged lines, in order.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock_ignore_poison()
            .iter()
            .filter_map(|entry| match &entry.kind {
                EntryKind::Log(message) => Some(message.clone()),
                EntryKind::Transition(_) => None,
            })
            .collect()
    }

    /// Recorded transitions, in order.
    pub fn states(&self) -> Vec<FlowState> {
        self.entries
            .lock_ignore_poison()
            .iter()
            .filter_map(|entry| match entry.kind {
                EntryKind::Transition(state) => Some(state),
                EntryKind::Log(_) => None,
            })
            .collect()
    }

    /// Latest state, `Idle` before the first transition.
    pub fn current_state(&self) -> FlowState {
        self.states().last().copied().unwrap_or(FlowState::Idle)
    }

    /// Time at which `message` was first logged.
    pub fn logged_at(&self, message: &str) -> Option<Duration> {
        self.entries
            .lock_ignore_poison()
            .iter()
            .find(|entry| matches!(&entry.kind, EntryKind::Log(logged) if logged == message))
            .map(|entry| entry.elapsed)
    }

    /// Time since the journal was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}
