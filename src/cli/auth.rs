use crate::spotify;

pub async fn auth(
    client_id: String,
    client_secret: String,
    port: u16,
    scopes: Vec<String>,
    timeout: Option<u64>,
) {
    spotify::auth::authorize(client_id, client_secret, port, scopes, timeout).await;
}
