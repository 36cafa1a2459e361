//! Spotify OAuth Authorization CLI Library
//!
//! This library implements a one-shot OAuth 2.0 authorization code flow
//! against the Spotify Web API: it opens a browser for user consent, captures
//! the redirect on a local HTTP listener, and exchanges the returned code for
//! an access/refresh token pair.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the local callback endpoint
//! - `cli` - Command-line interface implementation
//! - `config` - Endpoint URLs, defaults, and environment handling
//! - `server` - Single-shot local HTTP listener for the OAuth callback
//! - `spotify` - Authorization URL building and token exchange
//! - `types` - Data structures and the error taxonomy
//!
//! # Example
//!
//! ```
//! use spotauth::{cli, config};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env();
//!     // cli::auth(...).await;
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it
/// composes across async boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`. Used for general status updates
/// throughout the flow.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with status 1.
///
/// Accepts the same arguments as `println!`. Only for unrecoverable errors;
/// code after this macro will not execute.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Accepts the same arguments as `println!`. For issues that do not require
/// terminating the run.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
