//! Token model and expiry rule
//!
//! `TokenResponse` is the wire schema the token endpoint returns for both the
//! code exchange and the refresh grant. `Token` is the stored credential: the
//! response fields plus `received_at`, stamped from the local clock at the
//! moment the exchange completed. Expiry decisions never trust the server
//! clock; the skew constant covers in-flight requests and modest clock drift.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

/// Safety skew applied to every expiry check, in seconds. A token is treated
/// as expired this long before it actually is, so a request that is already
/// in flight when the lifetime runs out still carries a valid token.
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// Response from the token endpoint for both exchange and refresh.
///
/// `expires_in` is a delta in seconds from the response time. `refresh_token`
/// may be omitted on a refresh grant, in which case the previously issued
/// refresh token stays valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
}

/// A stored access/refresh token pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds, relative to `received_at`
    pub expires_in: u64,
    /// Unix timestamp stamped from the local clock when the token arrived
    pub received_at: i64,
    pub refresh_token: Option<String>,
    pub scope: String,
}

impl Token {
    /// The anonymous token: no authorization at all.
    ///
    /// Marks a client that can only reach public endpoints. It is never
    /// expiry-checked; there is no refresh path without a user code.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether this is the anonymous token.
    pub fn is_anonymous(&self) -> bool {
        *self == Self::anonymous()
    }

    /// Build a stored token from a token-endpoint response.
    pub fn from_response(resp: TokenResponse, received_at: i64) -> Self {
        Self {
            access_token: resp.access_token,
            token_type: resp.token_type,
            expires_in: resp.expires_in,
            received_at,
            refresh_token: resp.refresh_token,
            scope: resp.scope,
        }
    }

    /// Replace this token with a refresh-grant response.
    ///
    /// Full replacement, with one exception: a refresh response may omit the
    /// refresh token, and the previous one is retained in that case rather
    /// than overwritten with nothing.
    pub fn apply_refresh(&mut self, resp: TokenResponse, received_at: i64) {
        let previous_refresh = self.refresh_token.take();
        *self = Token::from_response(resp, received_at);
        if self.refresh_token.is_none() {
            self.refresh_token = previous_refresh;
        }
    }

    /// Whether the token needs a refresh before it can authorize a request.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }

    fn is_expired_at(&self, now: i64) -> bool {
        self.received_at + self.expires_in as i64 <= now + EXPIRY_SKEW_SECS
    }
}

/// Current unix time in seconds, from the local clock.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
