//! Configuration for the authorization flow.
//!
//! Endpoint URLs and flow defaults live here. Spotify's endpoints are fixed,
//! but both can be overridden through environment variables, which is mainly
//! useful for pointing the exchanger at a local endpoint during testing.
//! Credentials themselves are taken from CLI flags (with `SPOTIFY_CLIENT_ID` /
//! `SPOTIFY_CLIENT_SECRET` as environment fallbacks, see `main.rs`); a `.env`
//! file in the working directory is loaded on startup if present.

use std::env;

/// Spotify's OAuth authorization endpoint.
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify's OAuth token endpoint.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Fixed path the provider redirects back to.
pub const CALLBACK_PATH: &str = "/callback";

/// Default port for the local callback listener.
pub const DEFAULT_PORT: u16 = 8000;

/// Scopes requested when the caller does not pass `--scopes`.
pub const DEFAULT_SCOPES: [&str; 3] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
];

/// Loads a `.env` file from the working directory, if one exists.
///
/// A missing file is not an error; flags and real environment variables
/// always take precedence over `.env` entries.
pub fn load_env() {
    dotenv::dotenv().ok();
}

/// Returns the authorization endpoint, honoring a `SPOTIFY_AUTH_URL` override.
pub fn auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL").unwrap_or_else(|_| SPOTIFY_AUTH_URL.to_string())
}

/// Returns the token endpoint, honoring a `SPOTIFY_TOKEN_URL` override.
pub fn token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL").unwrap_or_else(|_| SPOTIFY_TOKEN_URL.to_string())
}

/// Builds the redirect URI for the given local port.
///
/// The result must match a redirect URI registered in the Spotify
/// application settings, e.g. `http://127.0.0.1:8000/callback`.
pub fn redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{}{}", port, CALLBACK_PATH)
}
