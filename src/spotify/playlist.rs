use crate::env::{Credentials, SPOTIFY_REDIRECT_URI};
use crate::model::TrackDescriptor;
use crate::spotify::{
    parse_playlist_id, AuthorizationError, ResolutionError, ToSearchQuery, TrackSource,
};
use async_trait::async_trait;
use futures::StreamExt;
use rspotify::clients::{BaseClient, OAuthClient};
use rspotify::model::{PlayableItem, PlaylistItem};
use rspotify::{scopes, AuthCodeSpotify, Config, OAuth};
use std::path::PathBuf;
use tracing::debug;

pub struct Resolver {
    spotify_client: AuthCodeSpotify,
}

impl Resolver {
    /// Builds the Spotify client and makes sure it holds a token, asking the operator to
    /// authorize in the browser when the cached one is missing or unusable.
    pub async fn authorize(
        credentials: &Credentials,
        token_cache_path: PathBuf,
    ) -> Result<Self, AuthorizationError> {
        let spotify_client = AuthCodeSpotify::with_config(
            rspotify::Credentials::new(&credentials.client_id, &credentials.client_secret),
            OAuth {
                redirect_uri: SPOTIFY_REDIRECT_URI.to_owned(),
                scopes: scopes!("playlist-read-private"),
                ..Default::default()
            },
            Config {
                token_cached: true,
                token_refreshing: true,
                cache_path: token_cache_path,
                ..Default::default()
            },
        );

        let authorize_url = spotify_client
            .get_authorize_url(false)
            .map_err(AuthorizationError::AuthorizeUrlCreation)?;
        spotify_client
            .prompt_for_token(&authorize_url)
            .await
            .map_err(AuthorizationError::TokenRetrieval)?;

        Ok(Self { spotify_client })
    }
}

#[async_trait]
impl TrackSource for Resolver {
    async fn track_descriptors(
        &self,
        playlist_source: &str,
    ) -> Result<Vec<TrackDescriptor>, ResolutionError> {
        let id = parse_playlist_id(playlist_source).map_err(ResolutionError::InvalidPlaylistId)?;
        debug!("resolving the playlist {}", playlist_source);

        let mut items = self.spotify_client.playlist_items(id, None, None);
        let mut descriptors = Vec::new();

        while let Some(item) = items.next().await {
            match item? {
                PlaylistItem {
                    track: Some(PlayableItem::Track(track)),
                    ..
                } => descriptors.push(track.to_search_query()),
                _ => continue,
            }
        }

        Ok(descriptors)
    }
}
