//! Error types for client operations

/// Errors surfaced by the client and registry.
///
/// Every failure is scoped to the request or authorization attempt that
/// triggered it; nothing here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or connection failure, propagated verbatim and never retried.
    #[error("transport error: {0}")]
    Transport(String),

    /// The token endpoint answered with a non-success status. The body is
    /// carried as diagnostic text; invalid credentials surface here rather
    /// than as a distinct kind.
    #[error("token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    /// The token endpoint answered with a success status but the body was
    /// not the expected JSON schema.
    #[error("invalid token response: {0}")]
    Decode(String),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
