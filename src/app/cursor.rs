use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, CssProvider, Fixed, Label, Orientation, Picture};

use crate::geometry::{Color, SurfacePoint};
use crate::ui::PickerTokens;

/// The on-screen cursor indicator: a bordered box following the pointer,
/// carrying the hovered hex label and the zoom preview image.
pub(super) struct CursorRuntime {
    layer: Fixed,
    root: GtkBox,
    color_label: Label,
    zoom_picture: Picture,
    border_css: CssProvider,
}

impl CursorRuntime {
    pub(super) fn new(layer: Fixed, tokens: PickerTokens) -> Self {
        let root = GtkBox::new(Orientation::Vertical, 0);
        root.add_css_class("picker-cursor");
        root.set_size_request(tokens.cursor_radius * 2, tokens.cursor_radius * 2);
        // The indicator must never swallow the pointer events it follows.
        root.set_can_target(false);

        let color_label = Label::new(None);
        color_label.add_css_class("hovered-color");
        color_label.set_halign(Align::Center);
        root.append(&color_label);

        let zoom_picture = Picture::new();
        zoom_picture.add_css_class("zoom-preview");
        let side = tokens.zoom_canvas_side() as i32;
        zoom_picture.set_size_request(side, side);
        zoom_picture.set_can_shrink(false);
        root.append(&zoom_picture);

        let border_css = CssProvider::new();
        if let Some(display) = gtk4::gdk::Display::default() {
            gtk4::style_context_add_provider_for_display(
                &display,
                &border_css,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION + 1,
            );
        }

        root.set_visible(false);
        layer.put(&root, 0.0, 0.0);

        Self {
            layer,
            root,
            color_label,
            zoom_picture,
            border_css,
        }
    }

    pub(super) fn set_visible(&self, visible: bool) {
        self.root.set_visible(visible);
    }

    pub(super) fn move_to(&self, origin: SurfacePoint) {
        self.layer
            .move_(&self.root, f64::from(origin.x), f64::from(origin.y));
    }

    /// Updates the hex label and the indicator's border to the hovered
    /// color.
    pub(super) fn set_color(&self, color: Color) {
        let hex = color.to_hex();
        self.color_label.set_text(&hex);
        self.border_css
            .load_from_data(&format!(".picker-cursor {{ border-color: {hex}; }}"));
    }

    /// Displays a finished zoom image; the payload is a self-contained PNG.
    pub(super) fn set_zoom_png(&self, png: Vec<u8>) {
        let bytes = gtk4::glib::Bytes::from_owned(png);
        match gtk4::gdk::Texture::from_bytes(&bytes) {
            Ok(texture) => self.zoom_picture.set_paintable(Some(&texture)),
            Err(err) => {
                tracing::warn!(?err, "failed to load zoom image payload");
            }
        }
    }
}
