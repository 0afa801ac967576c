// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cancellation handles for spawned producers
//!
//! Every producer started by this crate runs on its own tokio task and hands
//! back a [`CancellationHandle`]. The handle carries one operation, `cancel`,
//! and is released by scope: dropping the handle cancels the producer.
//!
//! ```text
//! start() ──▶ CancellationHandle ──cancel()/drop──▶ flag raised + task aborted
//!                                                   (no callback afterwards)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::AbortHandle;
use tracing::debug;

/// Shared flag a producer task checks before every delivery
///
/// Deliveries made through [`CancelFlag::run_unless_raised`] hold the flag's
/// lock, so `raise` waits for an in-flight delivery and no delivery starts
/// after `raise` returns.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancelFlag(Arc<Mutex<bool>>);

impl CancelFlag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        // a panicking delivery must not make the producer uncancellable
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raise the flag, returning true only for the call that raised it
    pub(crate) fn raise(&self) -> bool {
        let mut raised = self.lock();
        !std::mem::replace(&mut *raised, true)
    }

    pub(crate) fn is_raised(&self) -> bool {
        *self.lock()
    }

    /// Run `deliver` while the flag is held down, or return `None` if raised
    ///
    /// `deliver` must not raise this same flag.
    pub(crate) fn run_unless_raised<R>(&self, deliver: impl FnOnce() -> R) -> Option<R> {
        let raised = self.lock();
        if *raised {
            return None;
        }
        let result = deliver();
        drop(raised);
        Some(result)
    }
}

/// Handle to a running producer
///
/// Cancelling is idempotent and happens automatically on drop.
#[must_use = "dropping a CancellationHandle cancels the producer immediately"]
#[derive(Debug)]
pub struct CancellationHandle {
    flag: CancelFlag,
    task: AbortHandle,
    label: &'static str,
}

impl CancellationHandle {
    pub(crate) fn new(flag: CancelFlag, task: AbortHandle, label: &'static str) -> Self {
        Self { flag, task, label }
    }

    /// Stop all future deliveries
    ///
    /// Returns `true` if this call performed the cancellation and `false` if
    /// the producer was already cancelled.
    pub fn cancel(&self) -> bool {
        if !self.flag.raise() {
            return false;
        }
        self.task.abort();
        debug!(producer = self.label, "Producer cancelled");
        true
    }

    /// Whether `cancel` has been called (explicitly or by drop)
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_raised()
    }
}

impl Drop for CancellationHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
