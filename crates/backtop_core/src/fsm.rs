//! State Machine Runtime
//!
//! Flat finite state machines for widget interaction states. A transition
//! fires only when the machine is in its `from` state; any other signal is
//! ignored, so sending a signal twice never re-enters a state.

use std::collections::VecDeque;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for a signal sent to a state machine
pub type SignalId = u32;

/// Number of transitions kept for inspection
const HISTORY_LIMIT: usize = 32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub signal: SignalId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, signal: SignalId, to: StateId) -> Self {
        Self {
            from_state: from,
            signal,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition (from, signal, to)
    pub fn on(mut self, from: StateId, signal: SignalId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, signal, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    initial_state: StateId,
    current_state: StateId,
    transitions: Vec<Transition>,
    /// Most recent transitions, oldest first
    history: VecDeque<(StateId, SignalId, StateId)>,
}

impl StateMachine {
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            initial_state,
            current_state: initial_state,
            transitions,
            history: VecDeque::new(),
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(StateId, SignalId, StateId)> {
        self.history.iter()
    }

    /// Check if a signal would trigger a transition from the current state
    pub fn can_send(&self, signal: SignalId) -> bool {
        self.find(signal).is_some()
    }

    /// Send a signal, returning the (possibly unchanged) current state
    pub fn send(&mut self, signal: SignalId) -> StateId {
        let current = self.current_state;
        let Some(transition) = self.find(signal) else {
            return current;
        };

        let to_state = transition.to_state;
        self.current_state = to_state;

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, signal, to_state));

        tracing::trace!(from = current, signal, to = to_state, "fsm transition");
        to_state
    }

    /// Return to the initial state and forget history
    pub fn reset(&mut self) {
        self.current_state = self.initial_state;
        self.history.clear();
    }

    fn find(&self, signal: SignalId) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.signal == signal)
    }
}
