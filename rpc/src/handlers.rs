//! RPC request handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use swatchmeta_store::{StoreError, TermMeta, TermMetaStore};
use swatchmeta_types::{SWATCHES_COLOR, SWATCH_COLOR_KEYS, WCBOOST_SWATCHES_COLOR};

use crate::error::RpcError;
use crate::params::{ParamBag, SetColorMetaRequest};
use crate::routes::AppState;

// ── Set color meta ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetColorMetaResponse {
    /// The `term_id` parameter exactly as received.
    pub term_id: Value,
    pub requested_hex: String,
    /// Fresh read of `_wcboost_variation_swatches_color` after the write.
    pub read_back_wcboost: Option<String>,
    /// Fresh read of `swatches_color` after the write.
    pub read_back_main: Option<String>,
    pub all_meta: TermMeta,
}

/// Write the color under both swatch keys, then read the term back.
///
/// The read-back goes to the store rather than echoing the input, so a
/// store that drops or rewrites values is visible to the caller.
pub fn apply_color_meta(
    store: &dyn TermMetaStore,
    request: &SetColorMetaRequest,
) -> Result<SetColorMetaResponse, StoreError> {
    let term = request.term_id;
    let hex = request.hex.as_str();

    let entries = SWATCH_COLOR_KEYS.map(|key| (key, hex));
    store.update_meta_many(term, &entries)?;

    Ok(SetColorMetaResponse {
        term_id: request.raw_term_id.clone(),
        requested_hex: hex.to_string(),
        read_back_wcboost: store.get_meta(term, WCBOOST_SWATCHES_COLOR)?,
        read_back_main: store.get_meta(term, SWATCHES_COLOR)?,
        all_meta: store.get_all_meta(term)?,
    })
}

/// `POST /custom/v1/set-color-meta/`
///
/// Runs behind the `edit_products` permission gate, see [`crate::routes`].
pub async fn set_color_meta(
    State(state): State<AppState>,
    params: ParamBag,
) -> Result<Json<SetColorMetaResponse>, RpcError> {
    let request = SetColorMetaRequest::from_params(&params)?;
    // Store calls are synchronous and short; they run inline on the request task.
    let response = apply_color_meta(state.store.as_ref(), &request)?;
    debug!(
        term_id = %request.term_id,
        hex = %request.hex,
        keys = response.all_meta.len(),
        "set swatch color meta"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swatchmeta_nullables::NullTermMetaStore;
    use swatchmeta_types::{ColorValue, TermId};

    fn request(id: u64, hex: &str) -> SetColorMetaRequest {
        SetColorMetaRequest {
            term_id: TermId::new(id).unwrap(),
            hex: ColorValue::from(hex),
            raw_term_id: json!(id),
        }
    }

    #[test]
    fn writes_both_keys_and_reads_them_back() {
        let store = NullTermMetaStore::new();
        let resp = apply_color_meta(&store, &request(42, "#abcdef")).unwrap();

        assert_eq!(resp.term_id, json!(42));
        assert_eq!(resp.requested_hex, "#abcdef");
        assert_eq!(resp.read_back_wcboost.as_deref(), Some("#abcdef"));
        assert_eq!(resp.read_back_main.as_deref(), Some("#abcdef"));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn repeated_request_leaves_same_state() {
        let store = NullTermMetaStore::new();
        let term = TermId::new(11).unwrap();
        apply_color_meta(&store, &request(11, "#123456")).unwrap();
        let once = store.get_all_meta(term).unwrap();
        apply_color_meta(&store, &request(11, "#123456")).unwrap();
        assert_eq!(store.get_all_meta(term).unwrap(), once);
    }

    #[test]
    fn overwrites_previous_color() {
        let store = NullTermMetaStore::new();
        let term = TermId::new(7).unwrap();
        store.seed(term, WCBOOST_SWATCHES_COLOR, "#000000");

        let resp = apply_color_meta(&store, &request(7, "#ffffff")).unwrap();
        assert_eq!(resp.read_back_wcboost.as_deref(), Some("#ffffff"));
        assert_eq!(resp.all_meta[WCBOOST_SWATCHES_COLOR], vec!["#ffffff".to_string()]);
    }

    #[test]
    fn store_failure_propagates() {
        let store = NullTermMetaStore::new();
        store.fail_writes(true);
        assert!(apply_color_meta(&store, &request(1, "#fff")).is_err());
    }
}
