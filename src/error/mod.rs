use crate::state::StateError;
use crate::surface::SurfaceError;
use crate::worker::WorkerError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Worker(#[from] WorkerError),
    #[error("could not create canvas drawing context")]
    CanvasContext,
}
