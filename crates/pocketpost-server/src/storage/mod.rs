//! Storage layer: one redb database opened once at startup and shared.

pub mod entries;

use anyhow::Result;
use redb::Database;
use std::path::Path;
use std::sync::Arc;

use entries::EntryStore;

#[derive(Debug, Clone)]
pub struct Storage {
    pub entries: EntryStore,
}

impl Storage {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Arc::new(Database::create(db_path)?);
        Ok(Self {
            entries: EntryStore::new(db)?,
        })
    }
}
