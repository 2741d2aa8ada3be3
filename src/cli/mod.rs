use crate::pipeline::{DEFAULT_LINKS_FILE, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_PLAYLIST_NAME};
use clap::Parser;
use std::path::PathBuf;

/// Download songs from a Spotify playlist and import them into Apple Music.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Arguments {
    /// Spotify playlist URL or URI. Without it the existing links file is used as it is.
    #[arg(long, alias = "spotify_url")]
    pub spotify_url: Option<String>,

    /// Apple Music playlist name.
    #[arg(long, default_value = DEFAULT_PLAYLIST_NAME)]
    pub playlist: String,

    /// File holding one YouTube link per line.
    #[arg(long, default_value = DEFAULT_LINKS_FILE)]
    pub links_file: PathBuf,

    /// Working directory for the MP3 files, emptied on every run.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    pub output_dir: PathBuf,

    /// Where the Spotify token is cached between runs.
    #[arg(long, default_value = ".spotify_token_cache.json")]
    pub token_cache: PathBuf,

    #[arg(short, long)]
    pub verbose: bool,
}
