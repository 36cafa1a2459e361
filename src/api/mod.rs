//! # API Module
//!
//! HTTP handler for the local callback endpoint used during the OAuth
//! authorization flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles the single redirect from Spotify's authorization
//!   server, extracting the authorization code (or error) from the query
//!   string and reporting it back to the waiting flow through a one-shot
//!   channel. The route is served by [`crate::server::CallbackReceiver`],
//!   which stops listening as soon as one result has been produced.
//!
//! The handler is built on [Axum](https://docs.rs/axum) and plugged into the
//! receiver's router; it holds no state of its own beyond the shared result
//! slot.

mod callback;

pub use callback::callback;
