pub mod cli;
pub mod download;
pub mod env;
pub mod library;
pub mod link_store;
mod log;
pub mod model;
pub mod pipeline;
pub mod spotify;
pub mod workspace;
pub mod youtube;

use cli::Arguments;
use download::Download;
use library::Library;
use pipeline::{ConfigurationError, Pipeline, Settings};
use spotify::TrackSource;
use youtube::Search;

pub use log::initialize_logger;

pub async fn run(arguments: Arguments) -> Result<(), pipeline::Error> {
    env::load_dotenv();

    run_with(
        |key| std::env::var(key).ok(),
        arguments,
        Box::new(youtube::Searcher::default()),
        Box::new(download::YtDlp::default()),
        Box::new(library::MusicApp::default()),
    )
    .await
}

/// Checks the credentials before anything else is touched, authorizes with Spotify when a
/// playlist is to be resolved, then runs the whole pipeline.
pub async fn run_with(
    credential_lookup: impl Fn(&str) -> Option<String>,
    arguments: Arguments,
    searcher: Box<dyn Search + Send + Sync>,
    downloader: Box<dyn Download + Send + Sync>,
    library: Box<dyn Library + Send + Sync>,
) -> Result<(), pipeline::Error> {
    let credentials = env::load_from(credential_lookup).map_err(ConfigurationError::Credentials)?;

    let track_source: Option<Box<dyn TrackSource + Send + Sync>> = match arguments.spotify_url {
        None => None,
        Some(_) => Some(Box::new(
            spotify::Resolver::authorize(&credentials, arguments.token_cache.clone())
                .await
                .map_err(ConfigurationError::Authorization)?,
        )),
    };

    let settings = Settings {
        output_directory: arguments.output_dir,
        links_file: arguments.links_file,
        playlist_name: arguments.playlist,
        ..Settings::default()
    };

    Pipeline::new(settings, track_source, searcher, downloader, library)
        .run(arguments.spotify_url.as_deref())
        .await
}
