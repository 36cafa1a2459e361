use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use spotauth::{cli, config};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Spotify application client ID
    #[clap(long, env = "SPOTIFY_CLIENT_ID")]
    client_id: String,

    /// Spotify application client secret
    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Local port for the callback listener; must match the redirect URI
    /// registered with the Spotify application
    #[clap(long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Permission scopes to request
    #[clap(
        long,
        num_args = 1..,
        default_values_t = config::DEFAULT_SCOPES.iter().map(ToString::to_string),
    )]
    scopes: Vec<String>,

    /// Abort the callback wait after this many seconds instead of waiting
    /// indefinitely
    #[clap(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    config::load_env();

    let cli = Cli::parse();

    cli::auth(
        cli.client_id,
        cli.client_secret,
        cli.port,
        cli.scopes,
        cli.timeout,
    )
    .await;
}
