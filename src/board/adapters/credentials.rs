//! Fixed bearer token credential provider.

use crate::board::ports::CredentialProvider;

/// Credential provider handing out one token supplied at start-up.
#[derive(Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    /// Creates a provider for `token`. A blank token counts as signed out.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let raw = token.into();
        let token = (!raw.trim().is_empty()).then(|| raw.trim().to_owned());
        Self { token }
    }

    /// Creates a provider that is always signed out.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { token: None }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}
