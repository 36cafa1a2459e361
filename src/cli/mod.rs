//! # CLI Module
//!
//! User-facing command implementation for the authorization tool. The single
//! command wires the parsed flags into the OAuth flow:
//!
//! - [`auth`] - Runs the one-shot authorization code flow and prints the
//!   resulting tokens.
//!
//! All user feedback goes through the crate's output macros (`info!`,
//! `success!`, `warning!`, `error!`); `error!` terminates the process with
//! exit status 1, which is how every failure in the flow surfaces to the
//! shell. Nothing is written to disk.

mod auth;

pub use auth::auth;
