//! RPC error types.
//!
//! Failures are reported with the host platform's REST error envelope:
//! `{"code": ..., "message": ..., "data": {"status": ...}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use swatchmeta_auth::AuthError;
use swatchmeta_store::StoreError;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Missing term_id or hex")]
    MissingParameter,

    #[error("Invalid JSON body passed.")]
    InvalidJson(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("Sorry, you are not allowed to do that.")]
    Unauthorized(#[from] AuthError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RpcError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RpcError::MissingParameter => "missing_data",
            RpcError::InvalidJson(_) => "rest_invalid_json",
            RpcError::InvalidRequest(_) => "rest_invalid_request",
            RpcError::Unauthorized(_) => "rest_forbidden",
            RpcError::Store(_) => "store_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::MissingParameter | RpcError::InvalidJson(_) | RpcError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            RpcError::Unauthorized(e) if e.is_forbidden() => StatusCode::FORBIDDEN,
            RpcError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RpcError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            code: self.code().to_string(),
            message: self.to_string(),
            data: ErrorData {
                status: self.status().as_u16(),
            },
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        match &self {
            RpcError::Store(e) => warn!(error = %e, "term meta store failure"),
            RpcError::Unauthorized(e) => warn!(reason = %e, "request not authorized"),
            other => warn!(code = other.code(), "request rejected"),
        }
        (self.status(), Json(self.envelope())).into_response()
    }
}

/// Error body returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub status: u16,
}

/// Errors seen by [`crate::ColorMetaClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("endpoint rejected request ({}): {}", .0.code, .0.message)]
    Rejected(ErrorEnvelope),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_envelope() {
        let env = RpcError::MissingParameter.envelope();
        assert_eq!(env.code, "missing_data");
        assert_eq!(env.message, "Missing term_id or hex");
        assert_eq!(env.data.status, 400);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            RpcError::from(AuthError::MissingCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        let forbidden = RpcError::from(AuthError::Forbidden {
            user: "reader".into(),
            capability: "edit_products".into(),
        });
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(forbidden.code(), "rest_forbidden");
    }

    #[test]
    fn store_errors_are_internal() {
        let err = RpcError::from(StoreError::Backend("disk full".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.envelope().code, "store_error");
    }
}
