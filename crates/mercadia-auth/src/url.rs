//! Authorized-URL builder
//!
//! Assembles a request URL by appending query parameters to a base: `?`
//! before the first parameter, `&` before every one after it. Values are
//! percent-encoded, with two exceptions: the client id is plain decimal and
//! grant types are fixed ASCII tokens.

/// Query-string builder for token-endpoint and resource URLs.
pub struct AuthorizedUrl {
    url: String,
}

impl AuthorizedUrl {
    pub fn new(base: &str) -> Self {
        Self {
            url: base.to_owned(),
        }
    }

    pub fn add_grant_type(&mut self, value: &str) {
        self.push_raw("grant_type", value);
    }

    pub fn add_client_id(&mut self, id: u64) {
        self.push_raw("client_id", &id.to_string());
    }

    pub fn add_client_secret(&mut self, secret: &str) {
        self.push("client_secret", secret);
    }

    pub fn add_code(&mut self, code: &str) {
        self.push("code", code);
    }

    pub fn add_redirect_uri(&mut self, uri: &str) {
        self.push("redirect_uri", uri);
    }

    pub fn add_refresh_token(&mut self, token: &str) {
        self.push("refresh_token", token);
    }

    pub fn add_response_type(&mut self, value: &str) {
        self.push("response_type", value);
    }

    pub fn add_access_token(&mut self, token: &str) {
        self.push("access_token", token);
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn into_string(self) -> String {
        self.url
    }

    /// Append `key=value`, percent-encoding the value.
    fn push(&mut self, key: &str, value: &str) {
        self.push_raw(key, &urlencoding::encode(value));
    }

    /// Append `key=value` for values that never need encoding.
    fn push_raw(&mut self, key: &str, value: &str) {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url.push(separator);
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(value);
    }
}

/// Build the URL a user visits to authorize the application.
///
/// `auth_host` is one of the regional authorization hosts (see
/// [`crate::constants`]). The library only constructs this URL; the caller
/// sends the user to it and collects the code from the callback.
pub fn auth_url(client_id: u64, auth_host: &str, callback: &str) -> String {
    let mut url = AuthorizedUrl::new(&format!("{auth_host}/authorization"));
    url.add_response_type("code");
    url.add_client_id(client_id);
    url.add_redirect_uri(callback);
    url.into_string()
}
