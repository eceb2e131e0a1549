use gtk4::prelude::*;
use gtk4::DrawingArea;

use crate::surface::Surface;

/// Converts the backing buffer into a cairo image surface (premultiplied
/// BGRA, as `Format::ARgb32` expects on little-endian hosts).
pub(super) fn surface_to_cairo_image(surface: &Surface) -> Option<gtk4::cairo::ImageSurface> {
    let width = i32::try_from(surface.width()).ok()?;
    let height = i32::try_from(surface.height()).ok()?;
    let mut cairo_surface =
        gtk4::cairo::ImageSurface::create(gtk4::cairo::Format::ARgb32, width, height).ok()?;
    let stride = usize::try_from(cairo_surface.stride()).ok()?;

    {
        let mut data = cairo_surface.data().ok()?;
        let src = surface.as_raw();
        let src_width = surface.width() as usize;
        let src_height = surface.height() as usize;
        let src_row_len = src_width.checked_mul(4)?;

        for row in 0..src_height {
            let src_row_offset = row.checked_mul(src_row_len)?;
            let src_row_end = src_row_offset.checked_add(src_row_len)?;
            if src_row_end > src.len() {
                return None;
            }

            let dst_row_offset = row.checked_mul(stride)?;
            let dst_row_end = dst_row_offset.checked_add(src_row_len)?;
            if dst_row_end > data.len() {
                return None;
            }

            let src_row = &src[src_row_offset..src_row_end];
            let dst_row = &mut data[dst_row_offset..dst_row_end];

            for (src_pixel, dst_pixel) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(4)) {
                let r = src_pixel[0];
                let g = src_pixel[1];
                let b = src_pixel[2];
                let a = src_pixel[3];
                match a {
                    0 => {
                        dst_pixel[0] = 0;
                        dst_pixel[1] = 0;
                        dst_pixel[2] = 0;
                        dst_pixel[3] = 0;
                    }
                    255 => {
                        dst_pixel[0] = b;
                        dst_pixel[1] = g;
                        dst_pixel[2] = r;
                        dst_pixel[3] = 255;
                    }
                    _ => {
                        let alpha = u16::from(a);
                        let premul_r = ((u16::from(r) * alpha + 127) / 255) as u8;
                        let premul_g = ((u16::from(g) * alpha + 127) / 255) as u8;
                        let premul_b = ((u16::from(b) * alpha + 127) / 255) as u8;
                        dst_pixel[0] = premul_b;
                        dst_pixel[1] = premul_g;
                        dst_pixel[2] = premul_r;
                        dst_pixel[3] = a;
                    }
                }
            }
        }
    }

    cairo_surface.flush();
    Some(cairo_surface)
}

pub(super) fn install_canvas_draw(canvas: &DrawingArea, image: gtk4::cairo::ImageSurface) {
    canvas.set_draw_func(move |_, context, _, _| {
        if let Err(err) = context
            .set_source_surface(&image, 0.0, 0.0)
            .and_then(|_| context.paint())
        {
            tracing::warn!(?err, "failed to paint drawing surface");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SurfacePoint;

    #[test]
    fn cairo_image_matches_surface_dimensions() {
        let surface = Surface::test_pattern(12, 7).expect("surface");
        let image = surface_to_cairo_image(&surface).expect("cairo image");
        assert_eq!(image.width(), 12);
        assert_eq!(image.height(), 7);
    }

    #[test]
    fn opaque_pixels_swizzle_to_bgra() {
        let surface =
            Surface::from_pixels(1, 1, vec![10, 20, 30, 255]).expect("single pixel surface");
        assert_eq!(surface.color_at(SurfacePoint::new(0, 0)).rgb(), (10, 20, 30));

        let mut image = surface_to_cairo_image(&surface).expect("cairo image");
        let data = image.data().expect("image data");
        assert_eq!(&data[0..4], &[30, 20, 10, 255]);
    }
}
