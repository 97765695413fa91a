use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use redb::{Database, TableDefinition};
use thiserror::Error;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("preferences");

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable key-value storage for local user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), PrefsError>;
}

/// Preferences backed by an embedded redb file; survives restarts.
pub struct RedbPreferences {
    db: Arc<Database>,
}

impl RedbPreferences {
    pub fn open(path: &Path) -> Result<Self, PrefsError> {
        let db = Database::create(path).map_err(|e| PrefsError::Storage(e.to_string()))?;

        // Create the table up front so reads on a fresh file do not fail.
        let write_txn = db
            .begin_write()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| PrefsError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl PreferenceStore for RedbPreferences {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| PrefsError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(PrefsError::Storage(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), PrefsError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| PrefsError::Storage(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| PrefsError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// In-process preferences, lost when dropped.
#[derive(Default)]
pub struct MemoryPreferences {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), PrefsError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PrefsError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
