//! # Spotify Integration Module
//!
//! Interface to Spotify's account service for the OAuth 2.0 authorization
//! code flow. This layer owns everything that talks to (or points the user
//! at) `accounts.spotify.com`:
//!
//! - [`auth`] - Orchestrates the flow end to end: builds the authorization
//!   URL, opens the browser, waits on the local callback listener, and
//!   exchanges the authorization code for tokens at the token endpoint.
//!
//! ## Flow
//!
//! ```text
//! CLI Layer
//!      ↓
//! spotify::auth (URL building, orchestration, token exchange)
//!      ↓                                ↓
//! server::CallbackReceiver      HTTP Layer (reqwest)
//!      ↓                                ↓
//! Browser redirect              Spotify Accounts Service
//! ```
//!
//! The exchange is a confidential-client grant: the client secret travels in
//! the form body of the token request, as the token endpoint expects. All
//! errors are terminal for the run; there are no retries anywhere in the
//! flow.

pub mod auth;
