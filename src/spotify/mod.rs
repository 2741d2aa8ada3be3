use crate::model::TrackDescriptor;
use amplify_derive::Display;
use async_trait::async_trait;
use rspotify::model::{IdError, PlaylistId};
use thiserror::Error;

mod playlist;

pub use playlist::Resolver;

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum AuthorizationError {
    AuthorizeUrlCreation(rspotify::ClientError),
    TokenRetrieval(rspotify::ClientError),
}

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum ResolutionError {
    InvalidPlaylistId(IdError),
    Api(rspotify::ClientError),
}

impl From<rspotify::ClientError> for ResolutionError {
    fn from(client_error: rspotify::ClientError) -> Self {
        Self::Api(client_error)
    }
}

#[async_trait]
pub trait TrackSource {
    async fn track_descriptors(
        &self,
        playlist_source: &str,
    ) -> Result<Vec<TrackDescriptor>, ResolutionError>;
}

/// Accepts a playlist URL (`https://open.spotify.com/playlist/<id>?si=...`), a
/// `spotify:playlist:<id>` or legacy `spotify:user:<user>:playlist:<id>` URI, or a bare id.
pub fn parse_playlist_id(playlist_source: &str) -> Result<PlaylistId<'_>, IdError> {
    const PLAYLIST_MARKERS: [&str; 2] = ["playlist/", "playlist:"];

    let source = playlist_source.trim().trim_end_matches('/');
    let after_marker = PLAYLIST_MARKERS
        .iter()
        .filter_map(|marker| source.rfind(marker).map(|index| index + marker.len()))
        .max();

    match after_marker {
        Some(start_index) => {
            let id = source[start_index..].split('?').next().unwrap_or_default();
            PlaylistId::from_id(id)
        }
        None => {
            let last_segment = source.rsplit('/').next().unwrap_or_default();
            let id_or_uri = last_segment.split('?').next().unwrap_or_default();
            PlaylistId::from_id_or_uri(id_or_uri)
        }
    }
}

trait ToSearchQuery {
    fn title(&self) -> &str;
    fn artist_name(&self) -> Option<&str>;

    fn to_search_query(&self) -> TrackDescriptor {
        TrackDescriptor::new(self.title(), self.artist_name())
    }
}

impl ToSearchQuery for rspotify::model::FullTrack {
    fn title(&self) -> &str {
        self.name.as_str()
    }

    fn artist_name(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }
}
