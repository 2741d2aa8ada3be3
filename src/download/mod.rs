use crate::model::MediaLocator;
use amplify_derive::Display;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

pub const AUDIO_EXTENSION: &str = "mp3";

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum Error {
    Spawn(io::Error),
    Failed {
        locator: MediaLocator,
        status: ExitStatus,
    },
}

#[async_trait]
pub trait Download {
    async fn download(&self, locator: &MediaLocator, output_directory: &Path)
        -> Result<(), Error>;
}

/// Downloads every locator in order, stopping at the first failure.
pub async fn download_all(
    downloader: &(dyn Download + Send + Sync),
    locators: &[MediaLocator],
    output_directory: &Path,
) -> Result<(), Error> {
    for (index, locator) in locators.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, locators.len(), locator);
        downloader.download(locator, output_directory).await?;
    }

    Ok(())
}

pub struct YtDlp {
    program: String,
}

impl YtDlp {
    const FORMAT: &'static str = "bestaudio/best";
    const AUDIO_QUALITY: &'static str = "192K";
    const OUTPUT_TEMPLATE: &'static str = "%(title)s.%(ext)s";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, locator: &MediaLocator, output_directory: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["--format", Self::FORMAT])
            .arg("--extract-audio")
            .args(["--audio-format", AUDIO_EXTENSION])
            .args(["--audio-quality", Self::AUDIO_QUALITY])
            .arg("--output")
            .arg(output_directory.join(Self::OUTPUT_TEMPLATE))
            .arg("--")
            .arg(locator.as_str());
        command
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl Download for YtDlp {
    async fn download(
        &self,
        locator: &MediaLocator,
        output_directory: &Path,
    ) -> Result<(), Error> {
        let status = self
            .command(locator, output_directory)
            .status()
            .await
            .map_err(Error::Spawn)?;

        if !status.success() {
            return Err(Error::Failed {
                locator: locator.clone(),
                status,
            });
        }

        Ok(())
    }
}
