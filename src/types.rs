use std::{fmt, io, time::Duration};

use serde::{Deserialize, Serialize};

/// Parameters for one authorization request. Immutable once built.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

/// Outcome of the browser redirect, produced exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResult {
    Code(String),
    Error(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub token_type: String,
}

/// Everything that can end an authorization run. No variant is retried.
#[derive(Debug)]
pub enum AuthError {
    /// The local callback port could not be bound.
    Bind { port: u16, source: io::Error },
    /// The provider redirected back with an `error` parameter.
    Authorization(String),
    /// The token endpoint answered with a non-2xx status.
    TokenExchange {
        status: u16,
        reason: String,
        body: String,
    },
    /// The callback carried neither `code` nor `error`.
    MalformedCallback,
    /// No callback arrived within the configured wait.
    Timeout(Duration),
    /// The listener stopped before a redirect was captured.
    ReceiverClosed,
    /// The token request failed before a status was available.
    Request(reqwest::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Bind { port, source } => {
                write!(f, "failed to bind 127.0.0.1:{}: {}", port, source)
            }
            AuthError::Authorization(error) => {
                write!(f, "authorization failed: {}", error)
            }
            AuthError::TokenExchange {
                status,
                reason,
                body,
            } => {
                write!(f, "token exchange failed: {} {}: {}", status, reason, body)
            }
            AuthError::MalformedCallback => {
                write!(f, "callback carried neither a code nor an error parameter")
            }
            AuthError::Timeout(limit) => {
                write!(
                    f,
                    "no authorization callback received within {}s",
                    limit.as_secs()
                )
            }
            AuthError::ReceiverClosed => {
                write!(f, "callback listener stopped before a redirect was received")
            }
            AuthError::Request(error) => {
                write!(f, "token request failed: {}", error)
            }
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Bind { source, .. } => Some(source),
            AuthError::Request(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        AuthError::Request(error)
    }
}
