use crate::model::{MediaLocator, TrackDescriptor};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

#[async_trait]
pub trait Search {
    async fn best_match(
        &self,
        descriptor: &TrackDescriptor,
    ) -> Result<Option<MediaLocator>, anyhow::Error>;
}

pub fn watch_url(video_id: &str) -> MediaLocator {
    MediaLocator::new(format!("{}{}", WATCH_URL_PREFIX, video_id))
}

#[derive(Deserialize)]
struct SearchResults {
    #[serde(default)]
    entries: Vec<SearchEntry>,
}

#[derive(Deserialize)]
struct SearchEntry {
    id: String,
}

fn parse_search_output(output: &[u8]) -> Result<Option<MediaLocator>, anyhow::Error> {
    let results: SearchResults =
        serde_json::from_slice(output).context("on parsing the yt-dlp search output")?;

    Ok(results
        .entries
        .into_iter()
        .next()
        .map(|entry| watch_url(&entry.id)))
}

pub struct Searcher {
    program: String,
}

impl Searcher {
    const MAX_RESULTS: usize = 1;
    const FORMAT: &'static str = "bestaudio/best";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, descriptor: &TrackDescriptor) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["--quiet", "--no-warnings", "--flat-playlist", "--dump-single-json"])
            .args(["--format", Self::FORMAT])
            .arg(format!("ytsearch{}:{}", Self::MAX_RESULTS, descriptor));
        command
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl Search for Searcher {
    async fn best_match(
        &self,
        descriptor: &TrackDescriptor,
    ) -> Result<Option<MediaLocator>, anyhow::Error> {
        let output = self
            .command(descriptor)
            .output()
            .await
            .with_context(|| format!("on running {}", self.program))?;

        if !output.status.success() {
            return Err(anyhow!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        parse_search_output(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_canonical_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ").as_str(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn takes_the_first_search_entry() {
        let output = br#"{
            "_type": "playlist",
            "id": "never gonna give you up",
            "entries": [
                {"_type": "url", "id": "dQw4w9WgXcQ", "title": "Never Gonna Give You Up"},
                {"_type": "url", "id": "yPYZpwSpKmA", "title": "Together Forever"}
            ]
        }"#;

        assert_eq!(
            parse_search_output(output).unwrap(),
            Some(watch_url("dQw4w9WgXcQ"))
        );
    }

    #[test]
    fn no_entries_means_no_match() {
        assert_eq!(parse_search_output(br#"{"entries": []}"#).unwrap(), None);
        assert_eq!(parse_search_output(br#"{"_type": "playlist"}"#).unwrap(), None);
    }

    #[test]
    fn garbage_output_is_an_error() {
        assert!(parse_search_output(b"ERROR: something went wrong").is_err());
    }

    #[test]
    fn searches_for_exactly_one_result() {
        let searcher = Searcher::default();
        let command = searcher.command(&TrackDescriptor::new("Heroes", Some("David Bowie")));
        let arguments: Vec<_> = command
            .as_std()
            .get_args()
            .map(|argument| argument.to_string_lossy().into_owned())
            .collect();

        assert_eq!(command.as_std().get_program(), "yt-dlp");
        assert!(arguments.contains(&"--flat-playlist".to_owned()));
        assert_eq!(arguments.last().unwrap(), "ytsearch1:Heroes David Bowie");
    }
}
