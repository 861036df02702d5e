//! Transport capability
//!
//! The four HTTP verbs the client dispatches, abstracted so tests (or an
//! embedding application) can substitute canned responses for real network
//! calls. Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
//! (`Arc<dyn Transport>`).

use std::future::Future;
use std::pin::Pin;

use crate::error::{Error, Result};

/// Boxed future alias used by the capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Abstraction over the HTTP verbs the client dispatches.
///
/// Implementations return the raw response untouched: no status inspection,
/// no retries. Error mapping is limited to wrapping connection failures in
/// [`Error::Transport`].
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<reqwest::Response>>;

    fn post<'a>(
        &'a self,
        url: &'a str,
        content_type: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<reqwest::Response>>;

    fn put<'a>(&'a self, url: &'a str, body: String) -> BoxFuture<'a, Result<reqwest::Response>>;

    /// DELETE may carry a body on some endpoints; the default transport sends
    /// none when `body` is `None`.
    fn delete<'a>(
        &'a self,
        url: &'a str,
        body: Option<String>,
    ) -> BoxFuture<'a, Result<reqwest::Response>>;
}

/// Default transport backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move { self.http.get(url).send().await.map_err(transport_error) })
    }

    fn post<'a>(
        &'a self,
        url: &'a str,
        content_type: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            self.http
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(body)
                .send()
                .await
                .map_err(transport_error)
        })
    }

    fn put<'a>(&'a self, url: &'a str, body: String) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            self.http
                .put(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(transport_error)
        })
    }

    fn delete<'a>(
        &'a self,
        url: &'a str,
        body: Option<String>,
    ) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            let mut request = self.http.delete(url);
            if let Some(body) = body {
                request = request.body(body);
            }
            request.send().await.map_err(transport_error)
        })
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}
