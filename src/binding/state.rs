// Copyright (c) 2025 - Cowboy AI, Inc.
//! Binding State Machine
//!
//! Pure FSM describing what a binding currently holds.
//!
//! # States
//!
//! - Empty: nothing to show
//! - Holding(T): the latest value produced by the observed sequence
//!
//! # Inputs
//!
//! - Next(T): Empty/Holding → Holding(T), replacing any previous value
//! - Ended: Any → Empty (the sequence completed)
//! - Failed: Any → Empty (the sequence produced an error)
//! - Detached: Any → Empty (the consuming context released the binding)
//!
//! There is no history and no queue: a transition keeps at most one value.

use std::fmt::Debug;

/// Current value of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingState<T> {
    /// No value is available
    Empty,

    /// The most recently produced value
    Holding(T),
}

impl<T> BindingState<T> {
    /// Whether a value is present
    pub fn is_holding(&self) -> bool {
        matches!(self, BindingState::Holding(_))
    }

    /// Whether no value is present
    pub fn is_empty(&self) -> bool {
        matches!(self, BindingState::Empty)
    }

    /// Borrow the held value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            BindingState::Holding(value) => Some(value),
            BindingState::Empty => None,
        }
    }

    /// Take the held value, if any
    pub fn into_option(self) -> Option<T> {
        match self {
            BindingState::Holding(value) => Some(value),
            BindingState::Empty => None,
        }
    }
}

impl<T> Default for BindingState<T> {
    fn default() -> Self {
        BindingState::Empty
    }
}

impl<T> From<Option<T>> for BindingState<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => BindingState::Holding(value),
            None => BindingState::Empty,
        }
    }
}

/// Input that drives a binding transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingInput<T> {
    /// The observed sequence produced a value
    Next(T),

    /// The observed sequence completed
    Ended,

    /// The observed sequence failed
    Failed(String),

    /// Observation was released by the consuming context
    Detached,
}

/// Trait for finite state machines
///
/// Binding transitions are total, so `transition` cannot fail.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Compute the state that follows `input`
    fn transition(&self, input: &Self::Input) -> Self;
}

impl<T: Clone + Debug> StateMachine for BindingState<T> {
    type Input = BindingInput<T>;

    fn transition(&self, input: &Self::Input) -> Self {
        match input {
            BindingInput::Next(value) => BindingState::Holding(value.clone()),
            BindingInput::Ended | BindingInput::Failed(_) | BindingInput::Detached => {
                BindingState::Empty
            }
        }
    }
}
