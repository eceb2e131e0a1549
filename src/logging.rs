use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber. `RUST_LOG` is honored;
/// `info` is the default level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber was already initialized");
    }
}
