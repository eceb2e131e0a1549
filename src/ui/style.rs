/// Compile-time layout tokens — not user-overridable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub control_radius: u16,
    pub border_width: u16,
    pub window_default_width: i32,
    pub window_default_height: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub motion_hover_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    control_radius: 12,
    border_width: 1,
    window_default_width: 1000,
    window_default_height: 640,
    canvas_width: 960,
    canvas_height: 540,
    motion_hover_ms: 160,
};

/// Compile-time picker geometry: cursor visual radius, zoom neighborhood
/// radius, and zoom grid cell size. Fixed at build time, never
/// runtime-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerTokens {
    /// Half the side of the cursor indicator and of the zoom canvas.
    pub cursor_radius: i32,
    /// Pixels sampled on each side of the hovered pixel.
    pub zoom_view_radius: u32,
    /// Side of one magnified grid cell, in canvas pixels.
    pub zoom_pixel_size: u32,
}

impl PickerTokens {
    /// Side of the zoom canvas in pixels.
    pub const fn zoom_canvas_side(&self) -> u32 {
        (self.cursor_radius as u32) * 2
    }

    /// Cells per grid row/column: `2r + 1`.
    pub const fn zoom_grid_side(&self) -> u32 {
        self.zoom_view_radius * 2 + 1
    }

    /// Exact byte length of a well-formed neighborhood buffer.
    pub const fn neighborhood_byte_len(&self) -> usize {
        let side = self.zoom_grid_side() as usize;
        side * side * 4
    }
}

pub const PICKER_TOKENS: PickerTokens = PickerTokens {
    cursor_radius: 50,
    zoom_view_radius: 5,
    zoom_pixel_size: 8,
};
