use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("user {user} lacks capability {capability}")]
    Forbidden { user: String, capability: String },
}

impl AuthError {
    /// True when the caller was identified but lacks permission, as opposed
    /// to not being identified at all.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::Forbidden { .. })
    }
}
