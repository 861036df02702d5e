//! Canned doubles shared by the crate's tests
//!
//! `ScriptedTransport` stands in for the platform API: it answers the token
//! endpoint for both grant types plus a handful of resource routes, keyed on
//! the request URL the way the real endpoints would be. No test in this
//! crate touches the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::Client;
use crate::error::Result;
use crate::refresher::{OAuthTokenRefresher, TokenRefresher};
use crate::transport::{BoxFuture, Transport};

pub(crate) const VALID_CODE: &str = "valid code with refresh token";
pub(crate) const BAD_CODE: &str = "bad code";

/// Build a canned `reqwest::Response` from a status and body.
pub(crate) fn response(status: u16, body: &str) -> reqwest::Response {
    http::Response::builder()
        .status(status)
        .body(body.to_owned())
        .expect("valid canned response")
        .into()
}

/// Scripted stand-in for the platform API.
///
/// Resource routes only accept `access_token=valid token`; the public
/// `/sites` route instead rejects any token at all, so tests can observe
/// that the anonymous client attaches none.
pub(crate) struct ScriptedTransport;

impl Transport for ScriptedTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            if url.contains("/sites") {
                if url.contains("access_token") {
                    return Ok(response(400, "public route got a token"));
                }
                return Ok(response(
                    200,
                    r#"[{"id":"AR","name":"Argentina"},{"id":"BR","name":"Brazil"},{"id":"MX","name":"Mexico"}]"#,
                ));
            }
            if url.contains("/users/me") {
                if url.contains("access_token=valid%20token") {
                    return Ok(response(200, r#"{"id":123456,"nickname":"TESTUSER"}"#));
                }
                return Ok(response(403, ""));
            }
            Ok(response(404, ""))
        })
    }

    fn post<'a>(
        &'a self,
        url: &'a str,
        _content_type: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            if url.contains("/oauth/token") {
                return Ok(token_endpoint(url));
            }
            if url.contains("/items") {
                if !url.contains("access_token=valid%20token") {
                    return Ok(response(403, ""));
                }
                if body.contains("bar") {
                    return Ok(response(201, r#"{"id":"ITEM123"}"#));
                }
                return Ok(response(404, ""));
            }
            Ok(response(404, ""))
        })
    }

    fn put<'a>(&'a self, url: &'a str, body: String) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            if url.contains("/items/123") {
                if !url.contains("access_token=valid%20token") {
                    return Ok(response(403, ""));
                }
                if body.contains("bar") {
                    return Ok(response(200, r#"{"id":"ITEM123"}"#));
                }
                return Ok(response(404, ""));
            }
            Ok(response(404, ""))
        })
    }

    fn delete<'a>(
        &'a self,
        url: &'a str,
        _body: Option<String>,
    ) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            if url.contains("/items/123") {
                if url.contains("access_token=valid%20token") {
                    return Ok(response(200, ""));
                }
                return Ok(response(403, ""));
            }
            Ok(response(404, ""))
        })
    }
}

/// Scripted token endpoint for both grant types.
fn token_endpoint(url: &str) -> reqwest::Response {
    if url.contains("grant_type=authorization_code") {
        if url.contains("code=bad%20code") {
            return response(
                404,
                r#"{"message":"the code parameter failed validation","error":"invalid_grant"}"#,
            );
        }
        if url.contains("code=valid%20code%20without%20refresh%20token") {
            return response(
                200,
                r#"{"access_token":"valid token","token_type":"bearer","expires_in":10800,"scope":"write read"}"#,
            );
        }
        if url.contains("code=valid%20code%20with%20refresh%20token") {
            return response(
                200,
                r#"{"access_token":"valid token","token_type":"bearer","expires_in":10800,"refresh_token":"valid refresh token","scope":"write read"}"#,
            );
        }
        return response(400, r#"{"error":"invalid_grant"}"#);
    }
    if url.contains("grant_type=refresh_token") {
        if url.contains("refresh_token=valid%20refresh%20token") {
            // Refresh responses omit the refresh token; the previous one
            // stays valid
            return response(
                200,
                r#"{"access_token":"valid token","token_type":"bearer","expires_in":10800,"scope":"write read"}"#,
            );
        }
        return response(403, r#"{"error":"invalid_grant"}"#);
    }
    response(400, r#"{"error":"unsupported_grant_type"}"#)
}

/// Wraps the default refresher and counts how many refresh exchanges
/// actually run.
pub(crate) struct CountingRefresher {
    inner: OAuthTokenRefresher,
    pub(crate) calls: Arc<AtomicUsize>,
}

impl CountingRefresher {
    pub(crate) fn new() -> Self {
        Self {
            inner: OAuthTokenRefresher,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl TokenRefresher for CountingRefresher {
    fn refresh<'a>(&'a self, client: &'a Client) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.refresh(client).await
        })
    }
}
