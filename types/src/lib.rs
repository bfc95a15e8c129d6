//! Fundamental types for swatchmeta.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! taxonomy term identifiers, the swatch meta keys, and color values.

pub mod color;
pub mod error;
pub mod meta_key;
pub mod term;

pub use color::{resolve_color, ColorValue};
pub use error::TypesError;
pub use meta_key::{SWATCHES_COLOR, SWATCH_COLOR_KEYS, WCBOOST_SWATCHES_COLOR};
pub use term::TermId;
