//! Taxonomy term identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Identifier of a taxonomy term (e.g. the "Red" value of a `pa_color`
/// product attribute).
///
/// Always non-zero: the host platform never allocates term id 0, and a zero
/// id is treated as "missing" by request validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TermId(u64);

impl TermId {
    /// Create a term id, rejecting zero.
    pub fn new(id: u64) -> Result<Self, TypesError> {
        if id == 0 {
            return Err(TypesError::ZeroTermId);
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Big-endian bytes, so that keys sort by numeric id.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TermId {
    type Err = TypesError;

    /// Parse a decimal id. Surrounding whitespace is ignored, signs are not
    /// accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidTermId(s.to_string()));
        }
        let id = trimmed
            .parse::<u64>()
            .map_err(|_| TypesError::InvalidTermId(s.to_string()))?;
        Self::new(id)
    }
}

impl TryFrom<u64> for TermId {
    type Error = TypesError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<TermId> for u64 {
    fn from(id: TermId) -> Self {
        id.0
    }
}
