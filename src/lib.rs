//! Latest-value bindings for the Composable Information Machine
//!
//! This crate wires a timer-driven sequence of records to a binding that
//! keeps only the most recent record and releases its observation when its
//! owner goes away.
//!
//! ```text
//! TickSource ──▶ project() ──▶ LatestValueBinding ──▶ ItemDetail::render()
//! ```

pub mod binding;
pub mod cancel;
pub mod config;
pub mod errors;
pub mod record;
pub mod service;
pub mod source;
pub mod view;

// Re-export commonly used types
pub use binding::{BindingState, LatestValueBinding};
pub use cancel::CancellationHandle;
pub use config::TickerConfig;
pub use errors::{TickerError, TickerResult};
pub use record::{project, Record, Tick};
pub use service::ItemService;
pub use source::{TickSource, Ticks};
pub use view::ItemDetail;
