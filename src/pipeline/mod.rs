use crate::download::{self, Download, AUDIO_EXTENSION};
use crate::library::{self, Library};
use crate::model::{MediaLocator, TrackDescriptor};
use crate::spotify::{ResolutionError, TrackSource};
use crate::youtube::Search;
use crate::{link_store, workspace};
use amplify_derive::Display;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PLAYLIST_NAME: &str = "Recently Downloaded";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "DownloadedMP3s";
pub const DEFAULT_LINKS_FILE: &str = "youtube_links.txt";

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum Error {
    Configuration(ConfigurationError),
    Resolution(ResolutionError),
    OutputDirectoryPreparation(io::Error),
    LinkFileWrite(io::Error),
    LinkFileRead(io::Error),
    Download(download::Error),
    Import(io::Error),
    Cleanup(io::Error),
}

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum ConfigurationError {
    Credentials(crate::env::LoadError),
    Authorization(crate::spotify::AuthorizationError),
    NoTrackSource,
}

impl From<ConfigurationError> for Error {
    fn from(configuration_error: ConfigurationError) -> Self {
        Self::Configuration(configuration_error)
    }
}

impl From<ResolutionError> for Error {
    fn from(resolution_error: ResolutionError) -> Self {
        Self::Resolution(resolution_error)
    }
}

impl From<download::Error> for Error {
    fn from(download_error: download::Error) -> Self {
        Self::Download(download_error)
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub output_directory: PathBuf,
    pub links_file: PathBuf,
    pub playlist_name: String,
    pub cleanup_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            links_file: PathBuf::from(DEFAULT_LINKS_FILE),
            playlist_name: DEFAULT_PLAYLIST_NAME.to_owned(),
            cleanup_extensions: vec![AUDIO_EXTENSION.to_owned()],
        }
    }
}

/// Searches every descriptor in order and keeps the matches. A failed search counts as a miss.
pub async fn find_matches(
    searcher: &(dyn Search + Send + Sync),
    descriptors: &[TrackDescriptor],
) -> Vec<MediaLocator> {
    let mut locators = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        match searcher.best_match(descriptor).await {
            Ok(Some(locator)) => {
                info!("✓ {} → {}", descriptor, locator);
                locators.push(locator);
            }
            Ok(None) => info!("✗ {} → no result", descriptor),
            Err(error) => {
                warn!("error searching for '{}': {:#}", descriptor, error);
                info!("✗ {} → no result", descriptor);
            }
        }
    }

    locators
}

pub struct Pipeline {
    settings: Settings,
    track_source: Option<Box<dyn TrackSource + Send + Sync>>,
    searcher: Box<dyn Search + Send + Sync>,
    downloader: Box<dyn Download + Send + Sync>,
    library: Box<dyn Library + Send + Sync>,
}

impl Pipeline {
    pub fn new(
        settings: Settings,
        track_source: Option<Box<dyn TrackSource + Send + Sync>>,
        searcher: Box<dyn Search + Send + Sync>,
        downloader: Box<dyn Download + Send + Sync>,
        library: Box<dyn Library + Send + Sync>,
    ) -> Self {
        Self {
            settings,
            track_source,
            searcher,
            downloader,
            library,
        }
    }

    /// Without a playlist source the existing links file is downloaded as it is.
    pub async fn run(&self, playlist_source: Option<&str>) -> Result<(), Error> {
        let settings = &self.settings;

        workspace::prepare(&settings.output_directory)
            .map_err(Error::OutputDirectoryPreparation)?;

        if let Some(playlist_source) = playlist_source {
            let track_source = self
                .track_source
                .as_ref()
                .ok_or(ConfigurationError::NoTrackSource)?;

            info!("🔗 Getting YouTube links from Spotify playlist...");
            let descriptors = track_source.track_descriptors(playlist_source).await?;
            let locators = find_matches(self.searcher.as_ref(), &descriptors).await;
            link_store::write(&settings.links_file, &locators).map_err(Error::LinkFileWrite)?;
        }

        info!("📥 Reading YouTube links...");
        let locators = link_store::read(&settings.links_file).map_err(Error::LinkFileRead)?;

        info!("🎧 Downloading MP3s...");
        if locators.is_empty() {
            warn!("{} holds no links", settings.links_file.display());
        }
        download::download_all(
            self.downloader.as_ref(),
            &locators,
            &settings.output_directory,
        )
        .await?;

        info!(
            "🎶 Importing into Apple Music playlist: {}",
            settings.playlist_name
        );
        library::import_directory(
            self.library.as_ref(),
            &settings.output_directory,
            &settings.playlist_name,
            AUDIO_EXTENSION,
        )
        .await
        .map_err(Error::Import)?;

        info!("🧹 Cleaning up downloaded files...");
        let cleanup_extensions: Vec<&str> = settings
            .cleanup_extensions
            .iter()
            .map(String::as_str)
            .collect();
        workspace::clean(&settings.output_directory, &cleanup_extensions)
            .map_err(Error::Cleanup)?;
        info!("🧹 Cleaned up {}", settings.output_directory.display());

        info!("✅ Done!");
        Ok(())
    }
}
