use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url};

use crate::{
    config, error, info,
    server::{CallbackReceiver, MalformedPolicy},
    success,
    types::{AuthError, AuthorizationRequest, AuthorizationResult, TokenResponse},
    warning,
};

/// Bounded timeout for the outbound token request.
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the complete OAuth 2.0 authorization code flow against Spotify.
///
/// This function orchestrates the entire authentication process:
/// 1. Building the authorization URL from the caller's configuration
/// 2. Binding the local callback listener
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the single OAuth callback
/// 5. Exchanging the authorization code for tokens
/// 6. Printing the obtained tokens
///
/// The listener is bound before the browser opens so that a busy port fails
/// the run immediately instead of leaving the user on a consent page whose
/// redirect nobody is listening for.
///
/// # Arguments
///
/// * `client_id` - Spotify application client ID
/// * `client_secret` - Spotify application client secret
/// * `port` - Local port for the callback listener
/// * `scopes` - Permission scopes to request
/// * `timeout` - Optional bound (in seconds) on the callback wait; `None`
///   waits indefinitely
///
/// # Error Handling
///
/// Every failure ends the run with exit status 1: a busy port, a provider
/// `error` redirect (e.g. the user denied consent), a callback with neither
/// parameter, an expired wait, and a rejected token exchange. Browser launch
/// failures only produce a warning with the URL for manual navigation.
///
/// Nothing is persisted; rerun the flow to obtain fresh tokens.
pub async fn authorize(
    client_id: String,
    client_secret: String,
    port: u16,
    scopes: Vec<String>,
    timeout: Option<u64>,
) {
    let redirect_uri = config::redirect_uri(port);

    info!("Client ID: {}", client_id);
    info!("Redirect URI: {}", redirect_uri);
    info!("Scopes: {}", scopes.join(", "));

    let request = AuthorizationRequest {
        client_id,
        redirect_uri,
        scopes,
    };

    let auth_url = match build_authorize_url(&request) {
        Ok(url) => url,
        Err(e) => error!("Failed to build authorization URL: {}", e),
    };

    let receiver = match CallbackReceiver::bind(port, MalformedPolicy::FailFast).await {
        Ok(receiver) => receiver,
        Err(e) => error!("{}", e),
    };

    info!("Opening browser for Spotify authorization...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!(
        "Waiting for authorization... (listening on port {})",
        port
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = receiver.receive(timeout.map(Duration::from_secs)).await;
    pb.finish_and_clear();

    let code = match result {
        Ok(AuthorizationResult::Code(code)) => code,
        Ok(AuthorizationResult::Error(e)) => error!("{}", AuthError::Authorization(e)),
        Err(e) => error!("{}", e),
    };
    success!("Authorization code received");

    info!("Exchanging authorization code for tokens...");
    let token = match exchange_code(
        &config::token_url(),
        &request.client_id,
        &client_secret,
        &code,
        &request.redirect_uri,
    )
    .await
    {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    print_tokens(&token);
}

/// Builds the provider authorization URL for the given request.
///
/// Produces `{auth_url}?client_id=...&response_type=code&redirect_uri=...`
/// `&scope=...` with all parameters form-URL-encoded; scopes are joined with
/// a single space before encoding.
pub fn build_authorize_url(request: &AuthorizationRequest) -> Result<String, String> {
    let scope = request.scopes.join(" ");

    let url = Url::parse_with_params(
        &config::auth_url(),
        &[
            ("client_id", request.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", request.redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// Issues one form-encoded POST (`grant_type=authorization_code`) to
/// `token_url` and parses the JSON response. The redirect URI must match the
/// one used to obtain the code; the provider enforces this, not us.
///
/// # Returns
///
/// - `Ok(TokenResponse)` - the provider accepted the code
/// - `Err(AuthError::TokenExchange { .. })` - non-2xx answer, with status,
///   reason phrase, and the raw response body preserved for diagnostics
/// - `Err(AuthError::Request(_))` - the request never produced a status
///   (connection failure, timeout)
///
/// The request carries a bounded timeout; there are no retries. Authorization
/// codes are single-use and short-lived, so the exchange should happen
/// promptly after the callback.
pub async fn exchange_code(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse, AuthError> {
    let client = Client::builder().timeout(TOKEN_REQUEST_TIMEOUT).build()?;

    let response = client
        .post(token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenExchange {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
        });
    }

    Ok(response.json::<TokenResponse>().await?)
}

fn print_tokens(token: &TokenResponse) {
    let expires_at = Utc::now() + chrono::Duration::seconds(token.expires_in as i64);

    success!("Tokens obtained");
    println!();
    println!(
        "Access token (expires in {} seconds, around {}):",
        token.expires_in,
        expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", token.access_token);
    println!();
    println!("Refresh token (save this - it does not expire):");
    println!("{}", token.refresh_token);
    println!();
    if token.scope.is_empty() {
        println!("Scopes granted: N/A");
    } else {
        println!("Scopes granted: {}", token.scope);
    }
    println!();
    info!(
        "Use the refresh token with grant_type=refresh_token against {} to get new access tokens without repeating this flow.",
        config::token_url()
    );
}
