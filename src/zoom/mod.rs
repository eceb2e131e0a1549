use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

use crate::geometry::Color;
use crate::ui::PickerTokens;

/// Background fill of the zoom canvas; it shows through the 1px gaps
/// between cells as the grid lines.
pub const GRID_BORDER_COLOR: Color = Color::new(0x66, 0x66, 0x66);
pub const CENTER_OUTLINE_COLOR: Color = Color::new(0xff, 0xff, 0xff);

#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("failed to encode zoom image: {message}")]
    EncodeFailed { message: String },
}

pub type ZoomResult<T> = std::result::Result<T, ZoomError>;

const fn opaque(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Renders a neighborhood pixel buffer as a magnified grid.
///
/// Grid cell `(i, j)` is painted at `(i*(P+1), j*(P+1))` from the 4 bytes
/// at buffer offset `(j*n + i) * 4`, alpha ignored. Keep that index
/// pairing as-is: downstream output depends on the exact orientation it
/// produces. A cell the buffer cannot supply (short or empty input) is
/// left unpainted, so the border fill shows through.
pub fn render_zoom_grid(pixels: &[u8], tokens: PickerTokens) -> RgbaImage {
    let canvas_side = tokens.zoom_canvas_side();
    let mut canvas = RgbaImage::from_pixel(canvas_side, canvas_side, opaque(GRID_BORDER_COLOR));

    let n = tokens.zoom_grid_side();
    let cell = tokens.zoom_pixel_size;
    for i in 0..n {
        for j in 0..n {
            let offset = ((j * n + i) * 4) as usize;
            let Some(bytes) = pixels.get(offset..offset + 4) else {
                continue;
            };
            let color = Color::new(bytes[0], bytes[1], bytes[2]);
            fill_rect(
                &mut canvas,
                (i * (cell + 1)) as i32,
                (j * (cell + 1)) as i32,
                cell,
                cell,
                color,
            );
        }
    }

    // Highlight the center cell: a 1px-wide rect one pixel up-left of the
    // cell, with the cell's side. The offset footprint is intentional.
    let corner = (tokens.zoom_view_radius * (cell + 1)) as i32 - 1;
    stroke_rect(&mut canvas, corner, corner, cell, cell, CENTER_OUTLINE_COLOR);

    canvas
}

/// Encodes the canvas as a self-contained PNG, directly loadable as an
/// image widget source.
pub fn encode_png(canvas: &RgbaImage) -> ZoomResult<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| ZoomError::EncodeFailed {
            message: err.to_string(),
        })?;
    Ok(bytes)
}

fn fill_rect(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Color) {
    let pixel = opaque(color);
    for row in 0..height as i32 {
        for col in 0..width as i32 {
            put_pixel_clipped(canvas, x + col, y + row, pixel);
        }
    }
}

/// Paints the 1px-wide hollow border of the `width x height` footprint at
/// `(x, y)`.
fn stroke_rect(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Color) {
    let pixel = opaque(color);
    let right = x + width as i32 - 1;
    let bottom = y + height as i32 - 1;
    for col in x..=right {
        put_pixel_clipped(canvas, col, y, pixel);
        put_pixel_clipped(canvas, col, bottom, pixel);
    }
    for row in y..=bottom {
        put_pixel_clipped(canvas, x, row, pixel);
        put_pixel_clipped(canvas, right, row, pixel);
    }
}

fn put_pixel_clipped(canvas: &mut RgbaImage, x: i32, y: i32, pixel: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PICKER_TOKENS;
    use image::GenericImageView;

    fn canvas_color(canvas: &RgbaImage, x: u32, y: u32) -> Color {
        let p = canvas.get_pixel(x, y);
        Color::new(p[0], p[1], p[2])
    }

    fn outline_footprint(tokens: PickerTokens) -> (u32, u32, u32) {
        let corner = tokens.zoom_view_radius * (tokens.zoom_pixel_size + 1) - 1;
        (corner, corner, tokens.zoom_pixel_size)
    }

    fn on_outline(tokens: PickerTokens, x: u32, y: u32) -> bool {
        let (ox, oy, side) = outline_footprint(tokens);
        let inside = x >= ox && x < ox + side && y >= oy && y < oy + side;
        inside && (x == ox || x == ox + side - 1 || y == oy || y == oy + side - 1)
    }

    #[test]
    fn uniform_neighborhood_paints_no_border_color_inside_cells() {
        let tokens = PICKER_TOKENS;
        let mut pixels = Vec::with_capacity(tokens.neighborhood_byte_len());
        for _ in 0..tokens.neighborhood_byte_len() / 4 {
            pixels.extend_from_slice(&[10, 200, 30, 255]);
        }

        let canvas = render_zoom_grid(&pixels, tokens);
        let cell = tokens.zoom_pixel_size;
        for i in 0..tokens.zoom_grid_side() {
            for j in 0..tokens.zoom_grid_side() {
                for dx in 0..cell {
                    for dy in 0..cell {
                        let x = i * (cell + 1) + dx;
                        let y = j * (cell + 1) + dy;
                        let color = canvas_color(&canvas, x, y);
                        assert_ne!(color, GRID_BORDER_COLOR, "cell ({i},{j}) pixel ({x},{y})");
                        if !on_outline(tokens, x, y) {
                            assert_eq!(color, Color::new(10, 200, 30));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn gaps_between_cells_keep_the_border_color() {
        let tokens = PICKER_TOKENS;
        let pixels = vec![255_u8; tokens.neighborhood_byte_len()];
        let canvas = render_zoom_grid(&pixels, tokens);

        // First gap column sits right after the first cell.
        let gap = tokens.zoom_pixel_size;
        assert_eq!(canvas_color(&canvas, gap, 0), GRID_BORDER_COLOR);
        assert_eq!(canvas_color(&canvas, 0, gap), GRID_BORDER_COLOR);
    }

    #[test]
    fn empty_buffer_renders_border_fill_with_only_the_center_outline() {
        let tokens = PICKER_TOKENS;
        let canvas = render_zoom_grid(&[], tokens);

        let mut outline_pixels = 0_u32;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let color = canvas_color(&canvas, x, y);
                if on_outline(tokens, x, y) {
                    assert_eq!(color, CENTER_OUTLINE_COLOR, "({x},{y})");
                    outline_pixels += 1;
                } else {
                    assert_eq!(color, GRID_BORDER_COLOR, "({x},{y})");
                }
            }
        }
        let side = tokens.zoom_pixel_size;
        assert_eq!(outline_pixels, side * 4 - 4);
    }

    #[test]
    fn buffer_index_pairing_is_preserved() {
        let tokens = PICKER_TOKENS;
        let mut pixels = vec![0_u8; tokens.neighborhood_byte_len()];
        // Buffer pixel index 1 paints grid position i=1, j=0 (second cell
        // of the first canvas row).
        pixels[4..8].copy_from_slice(&[255, 0, 0, 255]);

        let canvas = render_zoom_grid(&pixels, tokens);
        let step = tokens.zoom_pixel_size + 1;
        assert_eq!(canvas_color(&canvas, step, 0), Color::new(255, 0, 0));
        assert_eq!(canvas_color(&canvas, 0, step), Color::new(0, 0, 0));
    }

    #[test]
    fn encode_png_produces_a_decodable_canvas_sized_image() {
        let tokens = PICKER_TOKENS;
        let canvas = render_zoom_grid(&[], tokens);
        let png = encode_png(&canvas).expect("png encoding should succeed");

        let decoded = image::load_from_memory(&png).expect("payload should decode");
        assert_eq!(
            (decoded.width(), decoded.height()),
            (tokens.zoom_canvas_side(), tokens.zoom_canvas_side())
        );
    }
}
