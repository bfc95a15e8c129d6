//! Term metadata storage trait.

use std::collections::BTreeMap;

use swatchmeta_types::TermId;

use crate::StoreError;

/// Every meta key on a term mapped to its stored values, in key order.
pub type TermMeta = BTreeMap<String, Vec<String>>;

/// Key-value metadata scoped to a taxonomy term.
///
/// A key may hold several values. Single-value reads return the first one.
/// Terms are never checked for existence: reading an unknown term yields no
/// metadata, and writing to one creates its metadata.
pub trait TermMetaStore: Send + Sync {
    /// First value stored under `key`, or `None` when the key is absent.
    fn get_meta(&self, term: TermId, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_meta_values(term, key)?.into_iter().next())
    }

    /// All values stored under `key`, in insertion order.
    fn get_meta_values(&self, term: TermId, key: &str) -> Result<Vec<String>, StoreError>;

    /// Every key on the term with its values.
    fn get_all_meta(&self, term: TermId) -> Result<TermMeta, StoreError>;

    /// Upsert: every value currently stored under `key` is replaced with
    /// `value`; an absent key gets a single value.
    fn update_meta(&self, term: TermId, key: &str, value: &str) -> Result<(), StoreError>;

    /// Apply several upserts to one term.
    ///
    /// Backends with transactions override this so that either all entries
    /// are written or none are. The default applies them in order and stops
    /// at the first failure.
    fn update_meta_many(&self, term: TermId, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.update_meta(term, key, value)?;
        }
        Ok(())
    }

    /// Append a value under `key`, keeping existing ones.
    fn add_meta(&self, term: TermId, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove every value under `key`. Returns whether anything was removed.
    fn delete_meta(&self, term: TermId, key: &str) -> Result<bool, StoreError>;
}

/// Upsert applied to an in-memory value list.
pub fn upsert_values(values: &mut Vec<String>, value: &str) {
    if values.is_empty() {
        values.push(value.to_string());
    } else {
        for v in values.iter_mut() {
            value.clone_into(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_inserts_into_empty_list() {
        let mut values = Vec::new();
        upsert_values(&mut values, "#abcdef");
        assert_eq!(values, vec!["#abcdef".to_string()]);
    }

    #[test]
    fn upsert_overwrites_every_value_without_accumulating() {
        let mut values = vec!["#000000".to_string(), "#111111".to_string()];
        upsert_values(&mut values, "#ffffff");
        assert_eq!(values, vec!["#ffffff".to_string(), "#ffffff".to_string()]);
    }
}
