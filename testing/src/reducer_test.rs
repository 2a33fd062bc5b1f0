//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use slotbook_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(AuthReducer::new())
///     .with_env(test_environment())
///     .given_state(AuthState::new())
///     .when_action(AuthAction::Logout)
///     .then_state(|state| assert!(state.session.is_none()))
///     .then_effects(assertions::assert_has_future_effect)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let effects = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use slotbook_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Assert that effects contain at least one Delay effect
    ///
    /// # Panics
    ///
    /// Panics if no Delay effect is found.
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Delay { .. })),
            "Expected at least one Delay effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbook_core::SmallVec;

    // Toy capacity reducer exercising the harness: reserving the last free
    // slot announces it via a feedback effect.
    #[derive(Clone, Debug)]
    struct GateState {
        free: u32,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum GateAction {
        Reserve,
        Release,
        Filled,
    }

    struct GateReducer;

    struct GateEnv;

    impl Reducer for GateReducer {
        type State = GateState;
        type Action = GateAction;
        type Environment = GateEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            let mut effects = SmallVec::new();
            match action {
                GateAction::Reserve => {
                    state.free = state.free.saturating_sub(1);
                    if state.free == 0 {
                        effects.push(Effect::future(async { Some(GateAction::Filled) }));
                    }
                },
                GateAction::Release => state.free += 1,
                GateAction::Filled => {},
            }
            effects
        }
    }

    #[test]
    fn reserve_takes_a_free_slot_without_effects() {
        ReducerTest::new(GateReducer)
            .with_env(GateEnv)
            .given_state(GateState { free: 3 })
            .when_action(GateAction::Reserve)
            .then_state(|state| {
                assert_eq!(state.free, 2);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn reserving_the_last_slot_announces_it() {
        ReducerTest::new(GateReducer)
            .with_env(GateEnv)
            .given_state(GateState { free: 1 })
            .when_action(GateAction::Reserve)
            .then_state(|state| {
                assert_eq!(state.free, 0);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn release_frees_a_slot() {
        ReducerTest::new(GateReducer)
            .with_env(GateEnv)
            .given_state(GateState { free: 0 })
            .when_action(GateAction::Release)
            .then_state(|state| {
                assert_eq!(state.free, 1);
            })
            .run();
    }

    #[test]
    fn no_effects_assertion_accepts_none_and_empty() {
        assertions::assert_no_effects::<GateAction>(&[Effect::None]);
        assertions::assert_no_effects::<GateAction>(&[]);
    }

    #[test]
    fn effect_count_assertion_counts_entries() {
        assertions::assert_effects_count(&[Effect::<GateAction>::None], 1);
        assertions::assert_effects_count::<GateAction>(&[], 0);
    }
}
