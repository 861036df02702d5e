//! Auth primitives for the Mercadia marketplace API
//!
//! Everything in this crate is pure: the token value object and its expiry
//! rule, the query-string builder for authorized URLs, and the platform
//! constants. No I/O happens here; the network side (code exchange, token
//! refresh, verb dispatch) lives in `mercadia-client` and is built on these
//! types.
//!
//! Token lifecycle:
//! 1. The client exchanges an authorization code at the token endpoint
//! 2. The response is stored as a `Token`, stamped with the local clock
//! 3. Before each request the client checks `Token::is_expired()`
//! 4. A refresh grant replaces the token in place; an omitted refresh token
//!    in the response keeps the previous one

pub mod constants;
pub mod token;
pub mod url;

pub use constants::*;
pub use token::{EXPIRY_SKEW_SECS, Token, TokenResponse, unix_now};
pub use url::{AuthorizedUrl, auth_url};
