//! Request parameter extraction.
//!
//! Parameters may arrive as a JSON body, a form body or the query string.
//! They are merged into a [`ParamBag`] (JSON body first, then form body, then
//! query) and then parsed into a typed request.

use std::collections::HashMap;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{Form, FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::{Map, Value};

use swatchmeta_types::{ColorValue, TermId};

use crate::error::RpcError;

/// Loosely typed request parameters, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBag(Map<String, Value>);

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Add a parameter unless a higher-precedence source already set it.
    /// `null` counts as not set on either side.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: Value) {
        if value.is_null() {
            return;
        }
        let slot = self.0.entry(name.into()).or_insert(Value::Null);
        if slot.is_null() {
            *slot = value;
        }
    }

    fn merge_strings(&mut self, pairs: HashMap<String, String>) {
        for (name, value) in pairs {
            self.insert_if_absent(name, Value::String(value));
        }
    }
}

impl From<Map<String, Value>> for ParamBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().filter(|(_, v)| !v.is_null()).collect())
    }
}

#[async_trait]
impl<S> FromRequest<S> for ParamBag
where
    S: Send + Sync,
{
    type Rejection = RpcError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map(|Query(q)| q)
            .unwrap_or_default();
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let mut bag = ParamBag::new();
        if content_type.starts_with("application/json") {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
            if !body.is_empty() {
                let parsed: Value = serde_json::from_slice(&body)
                    .map_err(|e| RpcError::InvalidJson(e.to_string()))?;
                // Only objects carry named parameters.
                if let Value::Object(map) = parsed {
                    bag = ParamBag::from(map);
                }
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
            bag.merge_strings(form);
        }
        bag.merge_strings(query);
        Ok(bag)
    }
}

/// Loose truthiness as applied by the host platform: `null`, `false`, zero,
/// `""`, `"0"` and empty collections are all falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn whole_number(f: f64) -> Option<u64> {
    (f.fract() == 0.0 && f >= 1.0 && f < u64::MAX as f64).then_some(f as u64)
}

/// A validated `set-color-meta` request.
///
/// The raw parameter values are kept so the response can echo exactly what
/// the caller sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SetColorMetaRequest {
    pub term_id: TermId,
    pub hex: ColorValue,
    pub raw_term_id: Value,
}

impl SetColorMetaRequest {
    /// Both parameters must be present and truthy; `term_id` must be a
    /// positive integer (number, whole-valued float or decimal string) and
    /// `hex` a string.
    /// Anything else is reported as a missing parameter.
    pub fn from_params(params: &ParamBag) -> Result<Self, RpcError> {
        let raw_term_id = params
            .get("term_id")
            .filter(|v| is_truthy(v))
            .ok_or(RpcError::MissingParameter)?;
        let raw_hex = params
            .get("hex")
            .filter(|v| is_truthy(v))
            .ok_or(RpcError::MissingParameter)?;

        let term_id = match raw_term_id {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(whole_number))
                .and_then(|id| TermId::new(id).ok()),
            Value::String(s) => s.parse::<TermId>().ok(),
            _ => None,
        }
        .ok_or(RpcError::MissingParameter)?;

        let hex = match raw_hex {
            Value::String(s) => ColorValue::new(s.as_str()),
            _ => return Err(RpcError::MissingParameter),
        };

        Ok(Self {
            term_id,
            hex,
            raw_term_id: raw_term_id.clone(),
        })
    }
}
