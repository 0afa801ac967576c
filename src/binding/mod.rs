// Copyright (c) 2025 - Cowboy AI, Inc.
//! Latest-Value Bindings
//!
//! A binding bridges a push-based sequence to a poll-based "current value"
//! view. It keeps at most one value and releases its observation when the
//! consuming context ends.
//!
//! # Core Concepts
//!
//! ## BindingState<T>
//!
//! Exactly one of `Empty` or `Holding(T)`:
//!
//! ```text
//! Time:      ────────────────────────────────────→
//! Sequence:         ●1          ●2         ✕ (end / error / detach)
//! State:     Empty  ├ Holding(1)├ Holding(2)├ Empty
//! ```
//!
//! ## LatestValueBinding<T>
//!
//! Created by `attach`, released by `detach` or by dropping it. The pairing
//! is structural: a binding cannot outlive its owner without being detached.
//!
//! ```rust,ignore
//! use cim_latest_binding::binding::LatestValueBinding;
//!
//! let binding = LatestValueBinding::attach(service.items());
//! if let Some(record) = binding.current() {
//!     println!("{record}");
//! }
//! // dropped here: observation released, state Empty
//! ```

pub mod latest;
pub mod state;

pub use latest::LatestValueBinding;
pub use state::{BindingInput, BindingState, StateMachine};
