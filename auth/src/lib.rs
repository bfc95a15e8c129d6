//! Caller authentication and capability checks.
//!
//! A request carries a bearer token; an [`Authorizer`] turns it into a
//! [`Caller`] whose capabilities gate each route.

pub mod caller;
pub mod error;
pub mod token;

pub use caller::{Caller, Capability};
pub use error::AuthError;
pub use token::{TokenAuthorizer, TokenGrant};

/// Resolves request credentials to a caller.
pub trait Authorizer: Send + Sync {
    /// `bearer` is the token from the `Authorization` header, if any.
    fn authenticate(&self, bearer: Option<&str>) -> Result<Caller, AuthError>;

    /// Authenticate and require `capability`.
    fn authorize(
        &self,
        bearer: Option<&str>,
        capability: &Capability,
    ) -> Result<Caller, AuthError> {
        let caller = self.authenticate(bearer)?;
        if !caller.can(capability) {
            return Err(AuthError::Forbidden {
                user: caller.user,
                capability: capability.to_string(),
            });
        }
        Ok(caller)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
