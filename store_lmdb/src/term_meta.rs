//! LMDB implementation of TermMetaStore.
//!
//! Keys are `term_id (u64 BE) ‖ meta_key`, so all entries of one term are
//! contiguous and can be read with a prefix scan. Values are the bincode
//! encoding of the `Vec<String>` held under the key.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RwTxn};
use tracing::debug;

use swatchmeta_store::term_meta::upsert_values;
use swatchmeta_store::{StoreError, TermMeta, TermMetaStore};
use swatchmeta_types::TermId;

use crate::LmdbError;

pub struct LmdbTermMetaStore {
    pub(crate) env: Arc<Env>,
    pub(crate) term_meta_db: Database<Bytes, Bytes>,
}

fn entry_key(term: TermId, key: &str) -> Vec<u8> {
    let mut k = term.to_be_bytes().to_vec();
    k.extend_from_slice(key.as_bytes());
    k
}

fn decode_values(bytes: &[u8]) -> Result<Vec<String>, LmdbError> {
    Ok(bincode::deserialize(bytes)?)
}

impl LmdbTermMetaStore {
    fn read_values(&self, term: TermId, key: &str) -> Result<Vec<String>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match self.term_meta_db.get(&rtxn, &entry_key(term, key))? {
            Some(bytes) => decode_values(bytes),
            None => Ok(Vec::new()),
        }
    }

    /// Upsert inside an open write transaction.
    fn upsert_in(
        &self,
        wtxn: &mut RwTxn,
        term: TermId,
        key: &str,
        value: &str,
    ) -> Result<(), LmdbError> {
        let k = entry_key(term, key);
        let mut values = match self.term_meta_db.get(&*wtxn, &k)? {
            Some(bytes) => decode_values(bytes)?,
            None => Vec::new(),
        };
        upsert_values(&mut values, value);
        let encoded = bincode::serialize(&values)?;
        self.term_meta_db.put(wtxn, &k, &encoded)?;
        Ok(())
    }
}

impl TermMetaStore for LmdbTermMetaStore {
    fn get_meta_values(&self, term: TermId, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.read_values(term, key)?)
    }

    fn get_all_meta(&self, term: TermId) -> Result<TermMeta, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = term.to_be_bytes();
        let mut all = TermMeta::new();
        let iter = self
            .term_meta_db
            .prefix_iter(&rtxn, &prefix[..])
            .map_err(LmdbError::from)?;
        for item in iter {
            let (k, v) = item.map_err(LmdbError::from)?;
            let key = std::str::from_utf8(&k[prefix.len()..])
                .map_err(|e| StoreError::Corruption(format!("meta key for term {term}: {e}")))?;
            all.insert(key.to_string(), decode_values(v)?);
        }
        Ok(all)
    }

    fn update_meta(&self, term: TermId, key: &str, value: &str) -> Result<(), StoreError> {
        self.update_meta_many(term, &[(key, value)])
    }

    /// All entries are written in a single write transaction: a failure on
    /// any of them aborts the whole batch.
    fn update_meta_many(&self, term: TermId, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        for (key, value) in entries {
            self.upsert_in(&mut wtxn, term, key, value)?;
        }
        wtxn.commit().map_err(LmdbError::from)?;
        debug!(%term, count = entries.len(), "committed term meta upserts");
        Ok(())
    }

    fn add_meta(&self, term: TermId, key: &str, value: &str) -> Result<(), StoreError> {
        let k = entry_key(term, key);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut values = match self.term_meta_db.get(&wtxn, &k).map_err(LmdbError::from)? {
            Some(bytes) => decode_values(bytes)?,
            None => Vec::new(),
        };
        values.push(value.to_string());
        let encoded = bincode::serialize(&values).map_err(LmdbError::from)?;
        self.term_meta_db
            .put(&mut wtxn, &k, &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete_meta(&self, term: TermId, key: &str) -> Result<bool, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let removed = self
            .term_meta_db
            .delete(&mut wtxn, &entry_key(term, key))
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(removed)
    }
}
