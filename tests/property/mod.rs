// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Proptest suites for the tick projection and the binding state machine.

mod record_projection;
