//! Nullable store — thread-safe in-memory term metadata for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use swatchmeta_store::term_meta::upsert_values;
use swatchmeta_store::{StoreError, TermMeta, TermMetaStore};
use swatchmeta_types::TermId;

/// An in-memory term metadata store.
///
/// Thread-safe for use with tokio's multi-threaded runtime. Counts every
/// write so tests can assert that a rejected request touched nothing, and can
/// be switched into a failing mode to exercise store-error paths.
pub struct NullTermMetaStore {
    terms: Mutex<HashMap<TermId, TermMeta>>,
    writes: AtomicU64,
    fail_writes: AtomicBool,
}

impl NullTermMetaStore {
    pub fn new() -> Self {
        Self {
            terms: Mutex::new(HashMap::new()),
            writes: AtomicU64::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Seed a value without counting it as a write.
    pub fn seed(&self, term: TermId, key: &str, value: &str) {
        self.terms
            .lock()
            .unwrap()
            .entry(term)
            .or_default()
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// Number of write operations performed since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store: writes disabled".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Default for NullTermMetaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TermMetaStore for NullTermMetaStore {
    fn get_meta_values(&self, term: TermId, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .terms
            .lock()
            .unwrap()
            .get(&term)
            .and_then(|meta| meta.get(key))
            .cloned()
            .unwrap_or_default())
    }

    fn get_all_meta(&self, term: TermId) -> Result<TermMeta, StoreError> {
        Ok(self
            .terms
            .lock()
            .unwrap()
            .get(&term)
            .cloned()
            .unwrap_or_default())
    }

    fn update_meta(&self, term: TermId, key: &str, value: &str) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut terms = self.terms.lock().unwrap();
        let values = terms
            .entry(term)
            .or_default()
            .entry(key.to_string())
            .or_default();
        upsert_values(values, value);
        Ok(())
    }

    fn add_meta(&self, term: TermId, key: &str, value: &str) -> Result<(), StoreError> {
        self.begin_write()?;
        self.terms
            .lock()
            .unwrap()
            .entry(term)
            .or_default()
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    fn delete_meta(&self, term: TermId, key: &str) -> Result<bool, StoreError> {
        self.begin_write()?;
        let mut terms = self.terms.lock().unwrap();
        let removed = terms
            .get_mut(&term)
            .map(|meta| meta.remove(key).is_some())
            .unwrap_or(false);
        if terms.get(&term).is_some_and(|meta| meta.is_empty()) {
            terms.remove(&term);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(id: u64) -> TermId {
        TermId::new(id).unwrap()
    }

    #[test]
    fn seeding_is_not_a_write() {
        let store = NullTermMetaStore::new();
        store.seed(term(1), "order", "0");
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get_meta(term(1), "order").unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn default_update_many_counts_each_upsert() {
        let store = NullTermMetaStore::new();
        store
            .update_meta_many(term(2), &[("a", "1"), ("b", "2")])
            .unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get_all_meta(term(2)).unwrap().len(), 2);
    }

    #[test]
    fn failing_mode_rejects_writes() {
        let store = NullTermMetaStore::new();
        store.fail_writes(true);
        assert!(matches!(
            store.update_meta(term(3), "a", "1"),
            Err(StoreError::Backend(_))
        ));
        assert_eq!(store.write_count(), 0);
        assert!(store.get_all_meta(term(3)).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_key() {
        let store = NullTermMetaStore::new();
        store.seed(term(4), "a", "1");
        assert!(store.delete_meta(term(4), "a").unwrap());
        assert!(!store.delete_meta(term(4), "a").unwrap());
    }
}
