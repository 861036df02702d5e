//! Client registry
//!
//! Process-wide cache mapping (application id, user code) to a live client,
//! plus one shared anonymous client for callers that never supply a code.
//! For a given key at most one client exists for the registry's lifetime:
//! the first successful construction wins and every later lookup returns the
//! same instance.
//!
//! The registry lock is held across a first-time authorization exchange, so
//! first-time authorizations serialize process-wide, including for
//! unrelated keys. A failed exchange caches nothing; the next caller with
//! the same key retries from scratch.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use mercadia_auth::API_URL;

use crate::client::Client;
use crate::error::Result;
use crate::refresher::{OAuthTokenRefresher, TokenRefresher};
use crate::transport::{HttpTransport, Transport};

/// Cache of authorized clients, keyed by (application id, user code).
pub struct ClientRegistry {
    api_url: String,
    transport: Arc<dyn Transport>,
    refresher: Arc<dyn TokenRefresher>,
    anonymous: Arc<Client>,
    clients: Mutex<HashMap<String, Arc<Client>>>,
}

impl ClientRegistry {
    /// Registry against the production API with the default transport and
    /// refresher.
    pub fn new() -> Self {
        Self::with_capabilities(
            API_URL,
            Arc::new(HttpTransport::new()),
            Arc::new(OAuthTokenRefresher),
        )
    }

    /// Registry with injected capabilities. This is the hook for test
    /// doubles and for embedders that bring their own transport or renewal
    /// policy; every client the registry constructs shares these references.
    pub fn with_capabilities(
        api_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        let api_url = api_url.into();
        let anonymous = Arc::new(Client::anonymous(
            &api_url,
            transport.clone(),
            refresher.clone(),
        ));
        Self {
            api_url,
            transport,
            refresher,
            anonymous,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Obtain the client for an (application, user) pairing.
    ///
    /// An empty `user_code` yields the shared anonymous client immediately:
    /// no lock, no network. Otherwise a cache hit returns the existing
    /// client; a miss constructs one and runs its authorization-code
    /// exchange synchronously before the registry lock is released, caching
    /// it only on success.
    pub async fn obtain_client(
        &self,
        id: u64,
        user_code: &str,
        secret: &str,
        redirect_url: &str,
    ) -> Result<Arc<Client>> {
        if user_code.is_empty() {
            return Ok(self.anonymous.clone());
        }

        let key = format!("{id}{user_code}");
        let mut clients = self.clients.lock().await;

        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        debug!(client_id = id, "building client for first-time authorization");
        let client = Arc::new(Client::new(
            id,
            user_code,
            secret,
            redirect_url,
            &self.api_url,
            self.transport.clone(),
            self.refresher.clone(),
        ));

        if let Err(e) = client.authorize().await {
            warn!(client_id = id, error = %e, "authorization exchange failed");
            return Err(e);
        }

        clients.insert(key, client.clone());
        Ok(client)
    }

    /// The shared anonymous client, for public endpoints only.
    pub fn anonymous_client(&self) -> Arc<Client> {
        self.anonymous.clone()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
