//! HTTP client for the color meta endpoint.
//!
//! Used by catalog importers: after creating a color attribute term they
//! resolve its name to a hex code and push it here.

use std::time::Duration;

use serde_json::json;

use swatchmeta_types::{ColorValue, TermId};

use crate::error::{ClientError, ErrorEnvelope};
use crate::handlers::SetColorMetaResponse;
use crate::routes::SET_COLOR_META_PATH;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for `POST /custom/v1/set-color-meta/`.
#[derive(Clone)]
pub struct ColorMetaClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ColorMetaClient {
    /// `base_url` is the REST root the routes are mounted under, for example
    /// `http://127.0.0.1:8080` or `https://shop.example/wp-json`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SET_COLOR_META_PATH)
    }

    /// Set the swatch color of `term_id`.
    pub async fn set_color(
        &self,
        term_id: TermId,
        hex: &ColorValue,
    ) -> Result<SetColorMetaResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint_url())
            .bearer_auth(&self.token)
            .json(&json!({ "term_id": term_id.get(), "hex": hex.as_str() }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Unreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    ClientError::Unreachable(format!("connection failed: {e}"))
                } else {
                    ClientError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) => ClientError::Rejected(envelope),
                Err(_) => ClientError::RequestFailed(format!("HTTP status {status}")),
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("failed to parse response: {e}")))
    }
}
