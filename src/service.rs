// Copyright (c) 2025 - Cowboy AI, Inc.
//! Item Service
//!
//! Composes a [`TickSource`] with the pure [`project`] mapping and hands out
//! the resulting record sequence.
//!
//! ```text
//! TickSource ──tick──▶ project() ──Record──▶ consumer
//! ```

use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::debug;

use crate::cancel::CancellationHandle;
use crate::config::TickerConfig;
use crate::errors::TickerResult;
use crate::record::{project, Record};
use crate::source::TickSource;

/// Service producing one [`Record`] per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemService {
    source: TickSource,
}

impl ItemService {
    /// Create a service from configuration
    pub fn new(config: &TickerConfig) -> TickerResult<Self> {
        Ok(Self {
            source: TickSource::from_config(config)?,
        })
    }

    /// Create a service over an existing tick source
    pub fn with_source(source: TickSource) -> Self {
        Self { source }
    }

    /// The underlying tick source
    pub fn source(&self) -> &TickSource {
        &self.source
    }

    /// Lazy record sequence; each call starts an independent timer
    pub fn items(&self) -> BoxStream<'static, Record> {
        self.source
            .ticks()
            .map(|tick| {
                let record = project(tick);
                debug!(tick, id = %record.id(), "Projected record");
                record
            })
            .boxed()
    }

    /// Push each record into `on_record` until the handle is cancelled
    pub fn start<F>(&self, mut on_record: F) -> CancellationHandle
    where
        F: FnMut(Record) + Send + 'static,
    {
        self.source.start(move |tick| on_record(project(tick)))
    }
}
