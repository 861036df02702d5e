//! Authorized client for the Mercadia marketplace API
//!
//! Public endpoints work without credentials; private endpoints need an
//! OAuth2-style bearer token obtained by exchanging a per-user authorization
//! code. This crate owns the client cache and the token lifecycle around
//! that exchange:
//!
//! 1. A caller asks the [`ClientRegistry`] for a client for
//!    (application id, user code)
//! 2. On first sight the registry runs the authorization-code exchange and
//!    caches the client; later lookups return the same instance
//! 3. Requests go through [`Client::get`] / [`Client::post`] /
//!    [`Client::put`] / [`Client::delete`], which attach a non-expired
//!    access token to the URL
//! 4. An expired token is refreshed in-line, single-flight per client:
//!    concurrent requests racing an expiry produce one refresh exchange
//!
//! The [`Transport`] and [`TokenRefresher`] capabilities are injectable, so
//! embedders can swap the HTTP layer or the renewal policy, and tests run
//! against canned responses without any network.

pub mod client;
pub mod error;
pub mod refresher;
pub mod registry;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::Client;
pub use error::{Error, Result};
pub use refresher::{OAuthTokenRefresher, TokenRefresher};
pub use registry::ClientRegistry;
pub use transport::{BoxFuture, HttpTransport, Transport};
