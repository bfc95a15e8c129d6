//! Static bearer-token authorizer backed by configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::{AuthError, Authorizer, Caller, Capability};

/// One configured token and what it grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    pub user: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

/// Maps bearer tokens to callers. Tokens are compared exactly.
#[derive(Clone, Debug, Default)]
pub struct TokenAuthorizer {
    callers: HashMap<String, Caller>,
}

impl TokenAuthorizer {
    pub fn new(grants: impl IntoIterator<Item = TokenGrant>) -> Self {
        let callers = grants
            .into_iter()
            .map(|g| (g.token, Caller::new(g.user, g.capabilities)))
            .collect();
        Self { callers }
    }

    pub fn len(&self) -> usize {
        self.callers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }
}

impl Authorizer for TokenAuthorizer {
    fn authenticate(&self, bearer: Option<&str>) -> Result<Caller, AuthError> {
        let token = bearer.ok_or(AuthError::MissingCredentials)?;
        let caller = self.callers.get(token).cloned().ok_or(AuthError::InvalidToken)?;
        debug!(user = %caller.user, "authenticated caller");
        Ok(caller)
    }
}
