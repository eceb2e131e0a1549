use super::error::{StateError, StateResult};
use super::{PickerEvent, PickerState, StateTransition};

#[derive(Debug)]
pub struct StateMachine {
    state: PickerState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: PickerState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == PickerState::Enabled
    }

    /// The event the toggle control maps to in the current state.
    pub fn toggle_event(&self) -> PickerEvent {
        match self.state {
            PickerState::Disabled => PickerEvent::Enable,
            PickerState::Enabled => PickerEvent::Disable,
        }
    }

    pub fn can_transition(&self, event: PickerEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: PickerEvent) -> Option<PickerState> {
        use PickerEvent::*;
        match (self.state, event) {
            (PickerState::Disabled, Enable) => Some(PickerState::Enabled),
            (PickerState::Enabled, Disable) => Some(PickerState::Disabled),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: PickerEvent) -> StateResult<PickerState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }

    /// Applies whichever of Enable/Disable the toggle control currently
    /// maps to. Always valid: the toggle acts as a switch.
    pub fn toggle(&mut self) -> StateResult<PickerState> {
        self.transition(self.toggle_event())
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PickerState::{:?}", self.state)
    }
}
