use super::model::PickerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Enable,
    Disable,
}

/// A single recorded transition, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Option<PickerState>,
    pub event: PickerEvent,
    pub to: PickerState,
}

impl StateTransition {
    pub const fn new(from: Option<PickerState>, event: PickerEvent, to: PickerState) -> Self {
        Self { from, event, to }
    }
}
