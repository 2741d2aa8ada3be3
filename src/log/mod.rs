use tracing::Level;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::util::SubscriberInitExt;

pub fn initialize_logger(verbose: bool) -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
