//! Mercadia platform constants
//!
//! The API base, the regional authorization hosts users are sent to for the
//! login redirect, and the grant types understood by the token endpoint.
//! None of these are secrets; the application secret and the tokens live
//! with the client.

/// Default API base URL
pub const API_URL: &str = "https://api.mercadia.com";

/// Path of the token endpoint, relative to the API base
pub const OAUTH_TOKEN_PATH: &str = "/oauth/token";

pub const AUTH_URL_AR: &str = "https://auth.mercadia.com.ar"; // Argentina
pub const AUTH_URL_BR: &str = "https://auth.mercadia.com.br"; // Brazil
pub const AUTH_URL_CL: &str = "https://auth.mercadia.cl"; // Chile
pub const AUTH_URL_CO: &str = "https://auth.mercadia.com.co"; // Colombia
pub const AUTH_URL_MX: &str = "https://auth.mercadia.com.mx"; // Mexico
pub const AUTH_URL_UY: &str = "https://auth.mercadia.com.uy"; // Uruguay

/// Grant type for the initial authorization-code exchange
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";

/// Grant type for refreshing an access token
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";
