//! Port for the session store that owns the bearer token.

/// Source of the bearer token attached to every backend request.
///
/// The token is opaque to the board; refreshing and revoking it is the
/// session collaborator's concern.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current bearer token, or `None` when signed out.
    fn bearer_token(&self) -> Option<String>;
}
