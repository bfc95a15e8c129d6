//! HTTP endpoint for swatch colors on taxonomy terms.
//!
//! Provides:
//! - `POST /custom/v1/set-color-meta/`: write a hex color under both swatch
//!   meta keys of a term and read the term's metadata back
//! - a typed client for that endpoint
//!
//! Routes are added to an axum router by [`register_routes`], called once
//! from the service bootstrap.

pub mod client;
pub mod error;
pub mod handlers;
pub mod params;
pub mod routes;
pub mod server;

pub use client::ColorMetaClient;
pub use error::{ClientError, ErrorEnvelope, RpcError};
pub use handlers::{apply_color_meta, SetColorMetaResponse};
pub use params::{ParamBag, SetColorMetaRequest};
pub use routes::{register_routes, AppState, SET_COLOR_META_PATH};
pub use server::{build_router, RpcServer};
