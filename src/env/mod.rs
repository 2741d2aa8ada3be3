use amplify_derive::Display;
use std::env;
use thiserror::Error;
use tracing::debug;

pub const SPOTIFY_CLIENT_ID_KEY: &str = "SPOTIFY_CLIENT_ID";
pub const SPOTIFY_CLIENT_SECRET_KEY: &str = "SPOTIFY_CLIENT_SECRET";
/// Only used for the authorization handshake, nothing listens on it.
pub const SPOTIFY_REDIRECT_URI: &str = "https://example.com/callback";

#[derive(Error, Display, Debug, PartialEq, Eq)]
#[display(Debug)]
pub enum LoadError {
    Missing(&'static str),
}

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

pub fn load_dotenv() {
    if let Err(error) = dotenv::dotenv() {
        debug!("no .env file loaded: {}", error);
    }
}

pub fn load() -> Result<Credentials, LoadError> {
    load_dotenv();
    load_from(|key| env::var(key).ok())
}

pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials, LoadError> {
    let required = |key: &'static str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or(LoadError::Missing(key))
    };

    Ok(Credentials {
        client_id: required(SPOTIFY_CLIENT_ID_KEY)?,
        client_secret: required(SPOTIFY_CLIENT_SECRET_KEY)?,
    })
}
