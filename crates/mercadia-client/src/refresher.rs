//! Token refresh capability
//!
//! The refresher performs the refresh-token grant through the client's own
//! transport and overwrites the client's token in place. Locking is the
//! caller's job: `Client` holds its refresh lock across this call so that
//! concurrent dispatches collapse into one exchange. A custom implementation
//! can swap in a different renewal policy without touching the client.

use tracing::debug;

use mercadia_auth::{AuthorizedUrl, GRANT_REFRESH_TOKEN, OAUTH_TOKEN_PATH, TokenResponse};

use crate::client::Client;
use crate::error::{Error, Result};
use crate::transport::{BoxFuture, Transport};

/// Abstraction over the token renewal strategy.
pub trait TokenRefresher: Send + Sync {
    /// Obtain a fresh access token for `client` and overwrite its token in
    /// place. On error the old token must be left intact.
    fn refresh<'a>(&'a self, client: &'a Client) -> BoxFuture<'a, Result<()>>;
}

/// Default refresher: a refresh-token grant against the token endpoint.
///
/// The new token's `received_at` is stamped from the local clock, and a
/// response that omits `refresh_token` keeps the previous refresh token.
pub struct OAuthTokenRefresher;

impl TokenRefresher for OAuthTokenRefresher {
    fn refresh<'a>(&'a self, client: &'a Client) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let refresh_token = client.token().await.refresh_token.unwrap_or_default();

            let mut url = AuthorizedUrl::new(&format!("{}{}", client.api_url(), OAUTH_TOKEN_PATH));
            url.add_grant_type(GRANT_REFRESH_TOKEN);
            url.add_client_id(client.id());
            url.add_client_secret(client.secret());
            url.add_refresh_token(&refresh_token);

            let response = client
                .transport()
                .post(url.as_str(), "application/json", String::new())
                .await?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| Error::Transport(e.to_string()))?;

            if !status.is_success() {
                return Err(Error::TokenEndpoint {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: TokenResponse =
                serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;
            client.install_refreshed(parsed).await;
            debug!(client_id = client.id(), "refresh grant succeeded");
            Ok(())
        })
    }
}
