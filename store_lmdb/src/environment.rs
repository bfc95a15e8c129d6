//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::info;

use crate::meta::{LmdbMetaStore, CURRENT_SCHEMA_VERSION};
use crate::term_meta::LmdbTermMetaStore;
use crate::LmdbError;

const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    term_meta_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in `path`, creating the directory
    /// if needed. `map_size` is the maximum size of the memory map in bytes.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per directory by this
        // process and never concurrently by another `Env` for the same path.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let term_meta_db = env.create_database(&mut wtxn, Some("term_meta"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        let environment = Self {
            env: Arc::new(env),
            term_meta_db,
            meta_db,
        };
        environment.ensure_schema()?;
        info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(environment)
    }

    /// Store handle for term metadata.
    pub fn term_meta_store(&self) -> LmdbTermMetaStore {
        LmdbTermMetaStore {
            env: self.env.clone(),
            term_meta_db: self.term_meta_db,
        }
    }

    /// Store handle for database bookkeeping.
    pub fn meta_store(&self) -> LmdbMetaStore {
        LmdbMetaStore {
            env: self.env.clone(),
            meta_db: self.meta_db,
        }
    }

    fn ensure_schema(&self) -> Result<(), LmdbError> {
        let meta = self.meta_store();
        match meta.schema_version()? {
            0 => meta.set_schema_version(CURRENT_SCHEMA_VERSION),
            v if v == CURRENT_SCHEMA_VERSION => Ok(()),
            v => Err(LmdbError::Serialization(format!(
                "unsupported schema version {v} (expected {CURRENT_SCHEMA_VERSION})"
            ))),
        }
    }
}
