/// Controller activation state. The picker starts disabled and the single
/// toggle control switches between the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Disabled,
    Enabled,
}
