//! Shared utilities for swatchmeta.

pub mod logging;

pub use logging::{init_logging, LogFormat};
