// Copyright (c) 2025 - Cowboy AI, Inc.
//! Latest-value binding over a push-based sequence
//!
//! [`LatestValueBinding`] observes a stream on a spawned task and keeps only
//! the most recent item in a `tokio::sync::watch` cell. Renderers poll the
//! cell (`state`, `current`) or wait for the next change (`changed`, `watch`).
//!
//! ```text
//!   sequence ──▶ observer task ──transition──▶ watch cell ──▶ renderers
//!                     ▲                            ▲
//!                     └──────── detach() ──────────┘
//!                     (flag raised, task aborted, cell → Empty)
//! ```
//!
//! Every writer checks the detach flag while holding the cell's write lock,
//! so nothing observed after `detach` returns can reach the cell.

use futures::{Stream, StreamExt};
use std::fmt::{Debug, Display};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::state::{BindingInput, BindingState, StateMachine};
use crate::cancel::{CancelFlag, CancellationHandle};

/// Binding that tracks the latest value of an observed sequence
///
/// Dropping the binding detaches it, so each `attach` is paired with exactly
/// one effective `detach`.
#[derive(Debug)]
pub struct LatestValueBinding<T> {
    cell: Arc<watch::Sender<BindingState<T>>>,
    watcher: watch::Receiver<BindingState<T>>,
    observation: CancellationHandle,
    finished: CancelFlag,
}

impl<T> LatestValueBinding<T>
where
    T: Clone + Debug + Send + Sync + 'static,
{
    /// Start observing `sequence`
    ///
    /// The state starts `Empty`, becomes `Holding` on every item and returns
    /// to `Empty` when the sequence completes. Must be called inside a tokio
    /// runtime.
    pub fn attach<S>(sequence: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self::observe(sequence.map(BindingInput::Next))
    }

    /// Start observing a sequence that may fail
    ///
    /// The first `Err` empties the state and ends observation.
    pub fn attach_fallible<S, E>(sequence: S) -> Self
    where
        S: Stream<Item = Result<T, E>> + Send + 'static,
        E: Display,
    {
        Self::observe(sequence.map(|item| match item {
            Ok(value) => BindingInput::Next(value),
            Err(error) => BindingInput::Failed(error.to_string()),
        }))
    }

    fn observe<S>(inputs: S) -> Self
    where
        S: Stream<Item = BindingInput<T>> + Send + 'static,
    {
        let (sender, watcher) = watch::channel(BindingState::Empty);
        let cell = Arc::new(sender);
        let flag = CancelFlag::new();

        let finished = CancelFlag::new();

        let task_cell = Arc::clone(&cell);
        let task_flag = flag.clone();
        let task_finished = finished.clone();
        let task = tokio::spawn(async move {
            let mut inputs = std::pin::pin!(inputs);
            let terminal = loop {
                match inputs.next().await {
                    Some(BindingInput::Failed(reason)) => {
                        warn!(error = %reason, "Observed sequence failed");
                        break BindingInput::Failed(reason);
                    }
                    Some(input) => apply(&task_cell, &task_flag, &input),
                    None => {
                        debug!("Observed sequence ended");
                        break BindingInput::Ended;
                    }
                }
            };
            apply(&task_cell, &task_flag, &terminal);
            // raised after the terminal version is published
            task_finished.raise();
        });

        info!(value_type = std::any::type_name::<T>(), "Binding attached");

        Self {
            cell,
            watcher,
            observation: CancellationHandle::new(flag, task.abort_handle(), "binding"),
            finished,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> BindingState<T> {
        self.watcher.borrow().clone()
    }

    /// The latest value, if one is held
    pub fn current(&self) -> Option<T> {
        self.watcher.borrow().value().cloned()
    }

    /// Whether a value is currently held
    pub fn is_holding(&self) -> bool {
        self.watcher.borrow().is_holding()
    }

    /// Wait until the state changes
    ///
    /// Returns `false` immediately once the binding is detached, or once the
    /// observed sequence has finished and its final `Empty` has been seen.
    pub async fn changed(&mut self) -> bool {
        if !self.is_attached() {
            return false;
        }
        if self.finished.is_raised() && !self.watcher.has_changed().unwrap_or(false) {
            return false;
        }
        self.watcher.changed().await.is_ok()
    }

    /// A receiver for renderers that live outside the binding
    ///
    /// Receivers observe the final `Empty` transition made by `detach`.
    pub fn watch(&self) -> watch::Receiver<BindingState<T>> {
        self.cell.subscribe()
    }
}

impl<T> LatestValueBinding<T> {
    /// Stop observing and empty the state
    ///
    /// Idempotent. Returns `true` only for the call that actually detached.
    pub fn detach(&self) -> bool {
        if !self.observation.cancel() {
            return false;
        }
        self.cell.send_if_modified(|state| {
            let was_holding = state.is_holding();
            *state = BindingState::Empty;
            was_holding
        });
        info!(value_type = std::any::type_name::<T>(), "Binding detached");
        true
    }

    /// Whether the binding is still observing
    pub fn is_attached(&self) -> bool {
        !self.observation.is_cancelled()
    }

    /// Whether the observed sequence has ended or failed
    pub fn is_finished(&self) -> bool {
        self.finished.is_raised()
    }
}

fn apply<T>(cell: &watch::Sender<BindingState<T>>, flag: &CancelFlag, input: &BindingInput<T>)
where
    T: Clone + Debug,
{
    cell.send_if_modified(|state| {
        if flag.is_raised() {
            return false;
        }
        *state = state.transition(input);
        true
    });
}

impl<T> Drop for LatestValueBinding<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;
    use tokio_stream::wrappers::UnboundedReceiverStream;

    fn channel_binding() -> (mpsc::UnboundedSender<i32>, LatestValueBinding<i32>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let binding = LatestValueBinding::attach(UnboundedReceiverStream::new(rx));
        (tx, binding)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let (_tx, binding) = channel_binding();
        assert_eq!(binding.state(), BindingState::Empty);
        assert!(binding.is_attached());
        assert!(!binding.is_holding());
    }

    #[tokio::test]
    async fn test_keeps_only_latest() {
        let (tx, mut binding) = channel_binding();

        tx.send(1).unwrap();
        assert!(binding.changed().await);
        assert_eq!(binding.current(), Some(1));

        tx.send(2).unwrap();
        tx.send(3).unwrap();
        while binding.current() != Some(3) {
            assert!(binding.changed().await);
        }
        assert_eq!(binding.state(), BindingState::Holding(3));
    }

    #[tokio::test]
    async fn test_detach_is_idempotent() {
        let (tx, mut binding) = channel_binding();
        tx.send(7).unwrap();
        binding.changed().await;

        assert!(binding.detach());
        assert!(!binding.detach());
        assert!(!binding.is_attached());
        assert_eq!(binding.state(), BindingState::Empty);
        assert!(!binding.changed().await);
    }

    #[tokio::test]
    async fn test_no_updates_after_detach() {
        let (tx, binding) = channel_binding();
        binding.detach();

        let _ = tx.send(9);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(binding.state(), BindingState::Empty);
    }

    #[tokio::test]
    async fn test_holds_last_item_of_open_sequence() {
        let items = stream::iter(vec![1, 2, 3]).chain(stream::pending());
        let binding = LatestValueBinding::attach(items);

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(binding.state(), BindingState::Holding(3));
    }

    #[tokio::test]
    async fn test_sequence_end_empties_state() {
        let binding = LatestValueBinding::attach(stream::iter(vec![1, 2, 3]));

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(binding.state(), BindingState::Empty);
        assert!(binding.is_finished());
        assert!(binding.is_attached());
        assert!(binding.detach());
    }

    #[tokio::test]
    async fn test_changed_reports_end_of_sequence() {
        let mut binding = LatestValueBinding::attach(stream::iter(vec![1, 2]));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(binding.state(), BindingState::Empty);

        let first = timeout(Duration::from_secs(1), binding.changed()).await.unwrap();
        assert!(first);

        let second = timeout(Duration::from_secs(1), binding.changed()).await.unwrap();
        assert!(!second);
        let third = timeout(Duration::from_secs(1), binding.changed()).await.unwrap();
        assert!(!third);
    }

    #[tokio::test]
    async fn test_changed_wakes_for_end_of_sequence() {
        let (tx, mut binding) = channel_binding();
        tx.send(1).unwrap();
        assert!(binding.changed().await);

        drop(tx);
        let ended = timeout(Duration::from_secs(1), binding.changed()).await.unwrap();
        assert!(ended);
        assert_eq!(binding.state(), BindingState::Empty);

        let after = timeout(Duration::from_secs(1), binding.changed()).await.unwrap();
        assert!(!after);
    }

    #[tokio::test]
    async fn test_failure_empties_state_and_stops() {
        let (tx, rx) = mpsc::unbounded_channel::<Result<i32, String>>();
        let mut binding = LatestValueBinding::attach_fallible(UnboundedReceiverStream::new(rx));

        tx.send(Ok(4)).unwrap();
        binding.changed().await;
        assert_eq!(binding.current(), Some(4));

        tx.send(Err("source failed".to_string())).unwrap();
        binding.changed().await;
        assert_eq!(binding.state(), BindingState::Empty);
        assert!(binding.is_finished());
        assert!(!timeout(Duration::from_secs(1), binding.changed()).await.unwrap());

        let _ = tx.send(Ok(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(binding.state(), BindingState::Empty);
    }

    #[tokio::test]
    async fn test_watchers_see_detach() {
        let (tx, mut binding) = channel_binding();
        tx.send(1).unwrap();
        binding.changed().await;

        let mut watcher = binding.watch();
        assert!(watcher.borrow_and_update().is_holding());

        drop(binding);

        watcher.changed().await.unwrap();
        assert!(watcher.borrow().is_empty());
    }
}
