use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::ui::PickerTokens;
use crate::zoom;

/// Controller -> worker. The pixel buffer moves into the channel; the
/// sender never touches it again.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderRequest {
    Zoom { seq: u64, pixels: Vec<u8> },
}

/// Worker -> controller. `Failed` is the explicit error signal so a
/// worker-side failure never just leaves the preview silently stale.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderResponse {
    Image { seq: u64, png: Vec<u8> },
    Failed { seq: u64, reason: String },
}

impl RenderResponse {
    pub fn seq(&self) -> u64 {
        match self {
            RenderResponse::Image { seq, .. } | RenderResponse::Failed { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn render worker thread")]
    SpawnFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("render worker channel is closed")]
    ChannelClosed,
}

pub type WorkerResult<T> = std::result::Result<T, WorkerError>;

/// The zoom render worker: one long-lived background thread, no shared
/// state with the controller, two mpsc channels.
pub struct RenderWorker {
    requests: Sender<RenderRequest>,
    responses: Receiver<RenderResponse>,
    handle: Option<JoinHandle<()>>,
}

impl RenderWorker {
    pub fn spawn(tokens: PickerTokens) -> WorkerResult<Self> {
        let (request_tx, request_rx) = mpsc::channel::<RenderRequest>();
        let (response_tx, response_rx) = mpsc::channel::<RenderResponse>();
        let handle = thread::Builder::new()
            .name("zoom-render".to_string())
            .spawn(move || run_worker(tokens, request_rx, response_tx))
            .map_err(|source| WorkerError::SpawnFailed { source })?;

        Ok(Self {
            requests: request_tx,
            responses: response_rx,
            handle: Some(handle),
        })
    }

    /// Fire-and-forget: the controller does not wait for the response.
    pub fn submit(&self, request: RenderRequest) -> WorkerResult<()> {
        self.requests
            .send(request)
            .map_err(|_| WorkerError::ChannelClosed)
    }

    /// Non-blocking poll for the main-loop response pump.
    pub fn try_recv(&self) -> WorkerResult<Option<RenderResponse>> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::ChannelClosed),
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        // Closing the request channel lets the worker loop finish.
        let (closed_tx, _) = mpsc::channel();
        let _ = std::mem::replace(&mut self.requests, closed_tx);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("render worker thread panicked before shutdown");
            }
        }
    }
}

fn run_worker(
    tokens: PickerTokens,
    requests: Receiver<RenderRequest>,
    responses: Sender<RenderResponse>,
) {
    tracing::debug!("render worker started");
    while let Ok(request) = requests.recv() {
        let response = handle_request(tokens, request);
        if responses.send(response).is_err() {
            break;
        }
    }
    tracing::debug!("render worker stopped");
}

fn handle_request(tokens: PickerTokens, request: RenderRequest) -> RenderResponse {
    match request {
        RenderRequest::Zoom { seq, pixels } => {
            let expected = tokens.neighborhood_byte_len();
            if pixels.len() != expected {
                tracing::error!(
                    seq,
                    expected,
                    actual = pixels.len(),
                    "rejecting zoom payload with malformed length"
                );
                return RenderResponse::Failed {
                    seq,
                    reason: format!(
                        "zoom payload length {} does not match expected {expected}",
                        pixels.len()
                    ),
                };
            }

            let canvas = zoom::render_zoom_grid(&pixels, tokens);
            match zoom::encode_png(&canvas) {
                Ok(png) => RenderResponse::Image { seq, png },
                Err(err) => {
                    tracing::error!(seq, ?err, "zoom image encoding failed");
                    RenderResponse::Failed {
                        seq,
                        reason: err.to_string(),
                    }
                }
            }
        }
    }
}
