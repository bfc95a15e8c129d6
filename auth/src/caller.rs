//! Authenticated callers and their capabilities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A named permission such as `edit_products`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Required to change product attribute terms.
    pub const EDIT_PRODUCTS: &'static str = "edit_products";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn edit_products() -> Self {
        Self::new(Self::EDIT_PRODUCTS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity behind a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub user: String,
    pub capabilities: BTreeSet<Capability>,
}

impl Caller {
    pub fn new(
        user: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self {
            user: user.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    pub fn can(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }
}
