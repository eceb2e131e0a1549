use gtk4::prelude::*;
use gtk4::{Label, ToggleButton};

pub fn picker_toggle_button(tooltip: &str) -> ToggleButton {
    let button = ToggleButton::with_label("Pick color");
    button.set_focus_on_click(false);
    button.set_active(false);
    button.set_tooltip_text(Some(tooltip));
    button.add_css_class("picker-toggle");
    button
}

pub fn picked_color_output() -> Label {
    let label = Label::new(Some("none"));
    label.add_css_class("picked-color-output");
    label.set_halign(gtk4::Align::Start);
    label.set_xalign(0.0);
    label.set_selectable(true);
    label
}
