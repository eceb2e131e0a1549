use gtk4::gdk;
use gtk4::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to access default display for clipboard operations")]
    DisplayUnavailable,
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

/// Copies the picked hex string to the display clipboard.
pub fn copy_text(text: &str) -> ClipboardResult<()> {
    let display = gdk::Display::default().ok_or(ClipboardError::DisplayUnavailable)?;
    display.clipboard().set_text(text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unavailable_error_names_the_display() {
        let err = ClipboardError::DisplayUnavailable;
        assert!(format!("{err}").contains("display"));
    }
}
