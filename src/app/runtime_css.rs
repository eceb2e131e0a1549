use crate::ui::StyleTokens;
use gtk4::CssProvider;

pub(super) fn install_runtime_css(tokens: StyleTokens) {
    let css = format!(
        "
window.pixlens-root {{
  color: #e4e4e7;
  background: #18181b;
}}
.picker-toggle {{
  border-radius: {control_radius}px;
}}
window.pixlens-root.picker-active .picker-toggle {{
  font-weight: bold;
}}
.picked-color-output {{
  font-family: monospace;
  padding: {spacing_4}px {spacing_8}px;
  border: {border_width}px solid #3f3f46;
  border-radius: {control_radius}px;
  transition: border-color {motion_hover_ms}ms cubic-bezier(0.4, 0, 0.2, 1);
}}
.picker-canvas {{
  background: #000000;
}}
.picker-cursor {{
  border: 3px solid #000000;
  border-radius: 4px;
  background: transparent;
}}
.picker-cursor .hovered-color {{
  font-family: monospace;
  font-size: 11px;
  color: #ffffff;
  background: rgba(0, 0, 0, 0.65);
  border-radius: 3px;
  padding: 1px {spacing_4}px;
}}
.picker-cursor .zoom-preview {{
  margin-top: {spacing_4}px;
}}
",
        control_radius = tokens.control_radius,
        border_width = tokens.border_width,
        spacing_4 = tokens.spacing_4,
        spacing_8 = tokens.spacing_8,
        motion_hover_ms = tokens.motion_hover_ms,
    );

    let provider = CssProvider::new();
    provider.load_from_data(&css);
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
