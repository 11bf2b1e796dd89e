//! The entries table: JSON-encoded entry documents keyed by id.

use anyhow::Result;
use pocketpost_models::Entry;
use pocketpost_models::entry::fields;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde_json::{Map, Value};
use std::sync::Arc;

const ENTRIES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("entries");

#[derive(Debug, Clone)]
pub struct EntryStore {
    db: Arc<Database>,
}

impl EntryStore {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(ENTRIES_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert the document. An existing id is overwritten, matching the
    /// historical put semantics the profile save path relies on.
    pub fn create(&self, entry: &Entry) -> Result<String> {
        let data = serde_json::to_vec(entry)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut entries = write_txn.open_table(ENTRIES_TABLE)?;
            entries.insert(entry.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(entry.id.clone())
    }

    pub fn get(&self, id: &str) -> Result<Option<Entry>> {
        let read_txn = self.db.begin_read()?;
        let entries = read_txn.open_table(ENTRIES_TABLE)?;
        entries
            .get(id)?
            .map(|value| Ok(serde_json::from_slice(value.value())?))
            .transpose()
    }

    /// Full unfiltered scan, order unspecified, no pagination.
    pub fn list(&self) -> Result<Vec<Entry>> {
        let read_txn = self.db.begin_read()?;
        let entries = read_txn.open_table(ENTRIES_TABLE)?;

        let mut items = Vec::new();
        for row in entries.iter()? {
            let (_, value) = row?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Overwrite the named fields inside one write transaction; all of them
    /// commit or none do. Returns the applied field map, or `None` when the
    /// id does not exist. `id` is silently dropped from the update map.
    pub fn update_fields(
        &self,
        id: &str,
        updates: &Map<String, Value>,
    ) -> Result<Option<Map<String, Value>>> {
        let write_txn = self.db.begin_write()?;
        let applied = {
            let mut entries = write_txn.open_table(ENTRIES_TABLE)?;
            let Some(existing) = entries.get(id)?.map(|value| value.value().to_vec()) else {
                // Dropping the uncommitted transaction leaves the table
                // untouched; no silent upsert.
                return Ok(None);
            };
            let mut entry: Entry = serde_json::from_slice(&existing)?;

            let mut applied = Map::new();
            for (name, value) in updates {
                if name == fields::ID {
                    continue;
                }
                entry.set(name.clone(), value.clone());
                applied.insert(name.clone(), value.clone());
            }

            let data = serde_json::to_vec(&entry)?;
            entries.insert(id, data.as_slice())?;
            applied
        };
        write_txn.commit()?;
        Ok(Some(applied))
    }

    /// True iff the id existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut entries = write_txn.open_table(ENTRIES_TABLE)?;
            entries.remove(id)?.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
