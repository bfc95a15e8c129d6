//! Abstract storage traits for swatchmeta.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod term_meta;

pub use error::StoreError;
pub use term_meta::{upsert_values, TermMeta, TermMetaStore};
