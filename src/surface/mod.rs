use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

use crate::geometry::{Color, SurfaceBounds, SurfacePoint};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    PixelLengthMismatch { expected: usize, actual: usize },
    #[error("surface dimensions must be positive, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
    #[error("failed to load surface image: {message}")]
    ImageLoadFailed { message: String },
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// The drawing surface: a rectangular RGBA8 raster with a readable backing
/// buffer, row-major, 4 bytes per pixel.
///
/// Reads outside the surface bounds yield transparent zero pixels; callers
/// sampling near an edge tolerate those rather than clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> SurfaceResult<Self> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySurface { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(SurfaceError::PixelLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_rgba_image(image: RgbaImage) -> SurfaceResult<Self> {
        let (width, height) = image.dimensions();
        Self::from_pixels(width, height, image.into_raw())
    }

    /// Loads and decodes an image file for the initial demo fill, scaling
    /// it to exactly `width x height`.
    pub fn from_image_path(path: &Path, width: u32, height: u32) -> SurfaceResult<Self> {
        let decoded = image::open(path).map_err(|err| SurfaceError::ImageLoadFailed {
            message: err.to_string(),
        })?;
        let scaled = image::imageops::resize(
            &decoded.to_rgba8(),
            width.max(1),
            height.max(1),
            image::imageops::FilterType::Triangle,
        );
        Self::from_rgba_image(scaled)
    }

    /// A generated stand-in fill for when no demo image is available.
    pub fn test_pattern(width: u32, height: u32) -> SurfaceResult<Self> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySurface { width, height });
        }
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8;
            let b = 255 - ((u32::from(r) + u32::from(g)) / 2) as u8;
            image::Rgba([r, g, b, 255])
        });
        Self::from_rgba_image(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> SurfaceBounds {
        SurfaceBounds::new(self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// The read primitive: copies a `width x height` region starting at
    /// `(x, y)` into a fresh row-major buffer. Out-of-bounds coordinates
    /// read as transparent zeros.
    pub fn read_region(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let row_len = width as usize * 4;
        let mut out = vec![0_u8; row_len * height as usize];

        let src_width = self.width as i64;
        let src_height = self.height as i64;
        for row in 0..height as i64 {
            let src_y = y as i64 + row;
            if src_y < 0 || src_y >= src_height {
                continue;
            }
            let first_col = (x as i64).max(0);
            let last_col = (x as i64 + width as i64).min(src_width);
            if first_col >= last_col {
                continue;
            }
            let src_offset = (src_y * src_width + first_col) as usize * 4;
            let src_len = (last_col - first_col) as usize * 4;
            let dst_offset = row as usize * row_len + (first_col - x as i64) as usize * 4;
            out[dst_offset..dst_offset + src_len]
                .copy_from_slice(&self.pixels[src_offset..src_offset + src_len]);
        }
        out
    }

    /// Color Sampler: the color of exactly one pixel, alpha ignored.
    /// Coordinates are expected in-bounds; outside them the read primitive
    /// yields zeros and the result is `#000000`.
    pub fn color_at(&self, point: SurfacePoint) -> Color {
        let data = self.read_region(point.x, point.y, 1, 1);
        Color::new(data[0], data[1], data[2])
    }

    /// Neighborhood Extractor: the `(2r+1) x (2r+1)` block centered on
    /// `center`, flat row-major. No clamping near edges: out-of-bounds
    /// samples are whatever the read primitive yields.
    pub fn neighborhood(&self, center: SurfacePoint, radius: u32) -> Vec<u8> {
        let side = radius * 2 + 1;
        self.read_region(
            center.x - radius as i32,
            center.y - radius as i32,
            side,
            side,
        )
    }
}
