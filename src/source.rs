// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tick Source - timer-driven sequence of integers
//!
//! A [`TickSource`] produces `0, 1, 2, …`, one value per fixed interval,
//! until cancelled. The first tick arrives one full interval after start and
//! later ticks are scheduled from the start instant, not from the previous
//! delivery.
//!
//! ```text
//! t:     0 ─────── p ─────── 2p ─────── 3p ──▶
//! tick:            0         1          2
//! ```
//!
//! Two shapes are offered:
//!
//! - [`TickSource::start`] pushes each tick into a callback and returns a
//!   [`CancellationHandle`]
//! - [`TickSource::ticks`] returns a lazy [`Ticks`] stream; dropping the
//!   stream releases the timer
//!
//! Both require a running tokio runtime.

use futures::{ready, Stream};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, info};

use crate::cancel::{CancelFlag, CancellationHandle};
use crate::config::{duration_millis, TickerConfig};
use crate::errors::{TickerError, TickerResult};
use crate::record::Tick;

/// Fixed-interval tick producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSource {
    interval: Duration,
}

impl TickSource {
    /// Create a tick source with the given period
    ///
    /// A zero period is rejected.
    pub fn new(interval: Duration) -> TickerResult<Self> {
        if interval.is_zero() {
            return Err(TickerError::InvalidInterval);
        }
        Ok(Self { interval })
    }

    /// Create a tick source from configuration
    pub fn from_config(config: &TickerConfig) -> TickerResult<Self> {
        config.validate()?;
        Self::new(config.interval())
    }

    /// The period between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn timer(&self) -> Interval {
        let mut timer = interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Burst);
        timer
    }

    /// Start invoking `on_tick(n)` for n = 0, 1, 2, …
    ///
    /// The callback runs on a spawned task. Once the returned handle is
    /// cancelled (or dropped) the callback is never invoked again; a `cancel`
    /// issued during a callback returns after that callback finishes. The
    /// callback must not cancel its own handle.
    pub fn start<F>(&self, mut on_tick: F) -> CancellationHandle
    where
        F: FnMut(Tick) + Send + 'static,
    {
        let flag = CancelFlag::new();
        let task_flag = flag.clone();
        let mut timer = self.timer();

        let task = tokio::spawn(async move {
            let mut tick: Tick = 0;
            loop {
                timer.tick().await;
                let delivered = task_flag.run_unless_raised(|| {
                    debug!(tick, "Tick");
                    on_tick(tick);
                });
                if delivered.is_none() {
                    break;
                }
                tick += 1;
            }
        });

        info!(interval_ms = duration_millis(self.interval), "Tick source started");
        CancellationHandle::new(flag, task.abort_handle(), "tick-source")
    }

    /// The tick sequence as a lazy stream
    ///
    /// The timer starts when this is called; the first item is ready one
    /// interval later.
    pub fn ticks(&self) -> Ticks {
        Ticks {
            inner: IntervalStream::new(self.timer()),
            next: 0,
        }
    }
}

/// Stream of ticks produced by [`TickSource::ticks`]
pub struct Ticks {
    inner: IntervalStream,
    next: Tick,
}

impl fmt::Debug for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticks")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl Stream for Ticks {
    type Item = Tick;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
            Some(_) => {
                let tick = this.next;
                this.next += 1;
                Poll::Ready(Some(tick))
            }
            None => Poll::Ready(None),
        }
    }
}
