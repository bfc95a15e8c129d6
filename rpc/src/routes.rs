//! Route registration and the permission gate.
//!
//! Each route carries a permission predicate applied as a route layer, so an
//! unauthorized request is turned away before its parameters are parsed or
//! its handler runs.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::post;
use axum::Router;

use swatchmeta_auth::{bearer_token, Authorizer, Capability};
use swatchmeta_store::TermMetaStore;

use crate::error::RpcError;
use crate::handlers;

/// Path of the color meta endpoint.
pub const SET_COLOR_META_PATH: &str = "/custom/v1/set-color-meta/";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TermMetaStore>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(store: Arc<dyn TermMetaStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }
}

/// Add the color meta routes to `router`.
///
/// The endpoint answers on the canonical path and on the same path without
/// the trailing slash.
pub fn register_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    [SET_COLOR_META_PATH, SET_COLOR_META_PATH.trim_end_matches('/')]
        .into_iter()
        .fold(router, |router, path| {
            router.route(
                path,
                post(handlers::set_color_meta).route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_edit_products,
                )),
            )
        })
}

/// Permission predicate for product editing routes.
async fn require_edit_products(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RpcError> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);
    state
        .authorizer
        .authorize(bearer, &Capability::edit_products())?;
    Ok(next.run(request).await)
}
