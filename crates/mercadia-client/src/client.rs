//! Authorized client and verb dispatch
//!
//! A `Client` owns one application/user pairing: the application id and
//! secret, the user's authorization code, and the token obtained by
//! exchanging that code. Request dispatch resolves an authorized URL
//! (refreshing the token first when it has expired) and hands the call to
//! the transport, returning the raw response untouched.
//!
//! Concurrency: the token sits behind an `RwLock`; expiry is re-checked
//! under the client's refresh lock so that N concurrent dispatches against
//! an expired token collapse into a single refresh exchange. The write lock
//! is only taken to install a new token, never across a network call.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use common::Secret;
use mercadia_auth::{
    AuthorizedUrl, GRANT_AUTHORIZATION_CODE, OAUTH_TOKEN_PATH, Token, TokenResponse, unix_now,
};

use crate::error::{Error, Result};
use crate::refresher::TokenRefresher;
use crate::transport::Transport;

/// One authorized session against the marketplace API.
///
/// Constructed by [`crate::ClientRegistry`] in normal use; built directly
/// only when wiring custom capabilities. Two clients are cache-equivalent
/// iff they share (application id, authorization code); the secret and
/// redirect URL are inputs to the exchange, not part of the identity.
pub struct Client {
    id: u64,
    secret: Secret,
    code: String,
    redirect_url: String,
    api_url: String,
    token: RwLock<Token>,
    refresh_lock: Mutex<()>,
    transport: Arc<dyn Transport>,
    refresher: Arc<dyn TokenRefresher>,
}

impl Client {
    /// A client for one (application, user) pairing. The token starts
    /// anonymous; call [`Client::authorize`] to run the code exchange.
    pub fn new(
        id: u64,
        user_code: &str,
        secret: &str,
        redirect_url: &str,
        api_url: &str,
        transport: Arc<dyn Transport>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            id,
            secret: Secret::new(secret),
            code: user_code.to_owned(),
            redirect_url: redirect_url.to_owned(),
            api_url: api_url.to_owned(),
            token: RwLock::new(Token::anonymous()),
            refresh_lock: Mutex::new(()),
            transport,
            refresher,
        }
    }

    /// A client with no user code, usable only against public endpoints.
    /// Anonymous is terminal: with no code there is no refresh path.
    pub fn anonymous(
        api_url: &str,
        transport: Arc<dyn Transport>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self::new(0, "", "", "", api_url, transport, refresher)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The application secret, needed by refreshers for the refresh grant.
    pub fn secret(&self) -> &str {
        self.secret.expose()
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Snapshot of the current token.
    pub async fn token(&self) -> Token {
        self.token.read().await.clone()
    }

    /// Overwrite the current token.
    pub async fn set_token(&self, token: Token) {
        *self.token.write().await = token;
    }

    /// Install a refresh-grant response, stamping `received_at` from the
    /// local clock and retaining the previous refresh token if the response
    /// omitted one.
    pub async fn install_refreshed(&self, resp: TokenResponse) {
        let mut token = self.token.write().await;
        token.apply_refresh(resp, unix_now());
    }

    /// True iff the client holds a token, valid or not.
    pub async fn is_authorized(&self) -> bool {
        !self.token.read().await.is_anonymous()
    }

    /// Exchange the authorization code for the initial token pair.
    ///
    /// On a non-success status the response body is carried in the error as
    /// diagnostic text. The token is only written on full success.
    pub async fn authorize(&self) -> Result<()> {
        let mut url = AuthorizedUrl::new(&format!("{}{}", self.api_url, OAUTH_TOKEN_PATH));
        url.add_grant_type(GRANT_AUTHORIZATION_CODE);
        url.add_client_id(self.id);
        url.add_client_secret(self.secret.expose());
        url.add_code(&self.code);
        url.add_redirect_uri(&self.redirect_url);

        let response = self
            .transport
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
        *self.token.write().await = Token::from_response(parsed, unix_now());
        debug!(client_id = self.id, "authorization exchange succeeded");
        Ok(())
    }

    pub async fn get(&self, resource_path: &str) -> Result<reqwest::Response> {
        let url = self.authorized_url(resource_path).await?;
        self.transport.get(url.as_str()).await
    }

    pub async fn post(&self, resource_path: &str, body: &str) -> Result<reqwest::Response> {
        let url = self.authorized_url(resource_path).await?;
        self.transport
            .post(url.as_str(), "application/json", body.to_owned())
            .await
    }

    pub async fn put(&self, resource_path: &str, body: &str) -> Result<reqwest::Response> {
        let url = self.authorized_url(resource_path).await?;
        self.transport.put(url.as_str(), body.to_owned()).await
    }

    pub async fn delete(&self, resource_path: &str) -> Result<reqwest::Response> {
        let url = self.authorized_url(resource_path).await?;
        self.transport.delete(url.as_str(), None).await
    }

    /// Resolve the full request URL for a resource path.
    ///
    /// Authorized clients get a non-expired access token appended, refreshing
    /// first when needed; a refresh error aborts here, before any transport
    /// call. The anonymous client carries no token parameter at all.
    async fn authorized_url(&self, resource_path: &str) -> Result<AuthorizedUrl> {
        let mut url = AuthorizedUrl::new(&format!("{}{}", self.api_url, resource_path));

        if self.is_authorized().await {
            self.ensure_fresh_token().await?;
            url.add_access_token(&self.token.read().await.access_token);
        }

        Ok(url)
    }

    /// Refresh the token if it has expired, single-flight per client.
    ///
    /// Expiry is re-checked after acquiring the refresh lock: a waiter whose
    /// predecessor already refreshed proceeds without issuing a second
    /// exchange. A failed refresh leaves the token unchanged and surfaces
    /// the error to the caller that triggered it; later callers retry
    /// independently.
    async fn ensure_fresh_token(&self) -> Result<()> {
        if !self.token.read().await.is_expired() {
            return Ok(());
        }

        let _guard = self.refresh_lock.lock().await;
        if !self.token.read().await.is_expired() {
            return Ok(());
        }

        debug!(client_id = self.id, "access token expired, refreshing");
        if let Err(e) = self.refresher.refresh(self).await {
            warn!(client_id = self.id, error = %e, "token refresh failed");
            return Err(e);
        }
        Ok(())
    }
}
