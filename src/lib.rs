pub mod app;
pub mod clipboard;
mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod notification;
pub mod picker;
pub mod state;
pub mod surface;
pub mod ui;
pub mod worker;
pub mod zoom;
pub use error::{AppError, AppResult};

/// Entrypoint used by higher-level integrations and CLI bindings.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting pixlens");

    let mut app = app::App::new();
    app.start()?;

    tracing::info!("shutdown complete with state={:?}", app.session().state());
    Ok(())
}
