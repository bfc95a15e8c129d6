//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Never touch the filesystem or network
//! - Record what was done to them so tests can assert on it
//! - Can be told to fail on demand
//!
//! Usage: swap real implementations for nullables in tests.

pub mod store;

pub use store::NullTermMetaStore;
