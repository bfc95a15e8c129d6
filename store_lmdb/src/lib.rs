//! LMDB storage backend for swatchmeta.
//!
//! Implements the `swatchmeta-store` traits using the `heed` LMDB bindings.
//! All term metadata lives in one database inside a single environment.

pub mod environment;
pub mod error;
pub mod meta;
pub mod term_meta;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use term_meta::LmdbTermMetaStore;
