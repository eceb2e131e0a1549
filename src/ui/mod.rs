pub mod style;
pub mod widgets;

pub use style::{PickerTokens, StyleTokens, LAYOUT_TOKENS, PICKER_TOKENS};
pub use widgets::{picked_color_output, picker_toggle_button};
