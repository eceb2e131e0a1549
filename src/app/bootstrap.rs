use std::path::Path;

use crate::config::load_app_config;
use crate::error::AppResult;
use crate::surface::Surface;
use crate::ui::{StyleTokens, LAYOUT_TOKENS};

pub(super) struct AppBootstrap {
    pub(super) style_tokens: StyleTokens,
    pub(super) surface: Surface,
}

pub(super) fn bootstrap_app_runtime() -> AppResult<AppBootstrap> {
    let config = load_app_config();
    let style_tokens = LAYOUT_TOKENS;
    let surface = resolve_demo_surface(
        config.demo_image.as_deref(),
        style_tokens.canvas_width as u32,
        style_tokens.canvas_height as u32,
    )?;
    Ok(AppBootstrap {
        style_tokens,
        surface,
    })
}

/// The drawing surface's one write: the initial demo fill. A configured
/// image that fails to load degrades to the generated test pattern.
fn resolve_demo_surface(demo_image: Option<&Path>, width: u32, height: u32) -> AppResult<Surface> {
    if let Some(path) = demo_image {
        match Surface::from_image_path(path, width, height) {
            Ok(surface) => {
                tracing::info!(path = %path.display(), "loaded demo image");
                return Ok(surface);
            }
            Err(err) => {
                tracing::warn!(
                    ?err,
                    path = %path.display(),
                    "failed to load demo image; falling back to test pattern"
                );
            }
        }
    }
    Ok(Surface::test_pattern(width, height)?)
}
