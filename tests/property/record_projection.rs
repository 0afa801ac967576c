// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Record Projection and Binding State
//!
//! Uses proptest to check that the tick projection and the binding state
//! machine hold for arbitrary ticks and arbitrary input sequences.

use cim_latest_binding::binding::{BindingInput, BindingState, StateMachine};
use cim_latest_binding::{project, Record};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn binding_input() -> impl Strategy<Value = BindingInput<u64>> {
    prop_oneof![
        4 => any::<u64>().prop_map(BindingInput::Next),
        1 => Just(BindingInput::Ended),
        1 => "[a-z]{1,8}".prop_map(BindingInput::Failed),
        1 => Just(BindingInput::Detached),
    ]
}

fn replay(inputs: &[BindingInput<u64>]) -> BindingState<u64> {
    inputs
        .iter()
        .fold(BindingState::Empty, |state, input| state.transition(input))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: the n-th record is {id: n + 1, name: "Item n + 1"}
    #[test]
    fn prop_projection_shape(tick in any::<u64>()) {
        let record = project(tick);
        let id = u128::from(tick) + 1;

        prop_assert_eq!(record.id(), id);
        prop_assert_eq!(record.name(), format!("Item {}", id));
        prop_assert_eq!(record, Record::new(id, format!("Item {}", id)));
    }

    /// Property: projection is deterministic
    #[test]
    fn prop_projection_is_deterministic(tick in any::<u64>()) {
        prop_assert_eq!(project(tick), project(tick));
    }

    /// Property: after k records the state holds exactly the k-th
    #[test]
    fn prop_latest_only(ticks in prop::collection::vec(0u64..1_000_000, 1..50)) {
        let inputs: Vec<_> = ticks.iter().copied().map(BindingInput::Next).collect();
        let last = *ticks.last().unwrap();

        prop_assert_eq!(replay(&inputs), BindingState::Holding(last));
    }

    /// Property: the state only depends on the last input
    #[test]
    fn prop_state_depends_on_last_input(inputs in prop::collection::vec(binding_input(), 1..50)) {
        let expected = match inputs.last().unwrap() {
            BindingInput::Next(value) => BindingState::Holding(*value),
            _ => BindingState::Empty,
        };

        prop_assert_eq!(replay(&inputs), expected);
    }

    /// Property: detaching twice is the same as detaching once
    #[test]
    fn prop_detach_idempotent(inputs in prop::collection::vec(binding_input(), 0..20)) {
        let once = replay(&inputs).transition(&BindingInput::Detached);
        let twice = once.transition(&BindingInput::Detached);

        prop_assert_eq!(once.clone(), BindingState::Empty);
        prop_assert_eq!(once, twice);
    }
}
