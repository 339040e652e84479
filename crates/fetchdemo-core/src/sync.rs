//! Mutex helpers.

use std::sync::{Mutex, MutexGuard};

/// Acquire a mutex without caring whether a previous holder panicked.
///
/// Demo state behind a lock (journals, recorded requests) stays readable after
/// a panicking continuation, so the poison flag carries no useful information.
pub trait IgnoreLock<T> {
    /// Lock the mutex, recovering the guard from a poisoned lock.
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T>;
}

impl<T> IgnoreLock<T> for Mutex<T> {
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
