use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::CoreError;
use crate::model::EchoEntry;

use super::{read_json_locked, update_json_locked, write_json_locked};

/// Load/save boundary for journal entries.
pub trait EntryStore {
    /// All entries in stored order.
    fn load(&self) -> Result<Vec<EchoEntry>, CoreError>;

    /// Replace the stored entries.
    fn save(&self, entries: &[EchoEntry]) -> Result<(), CoreError>;

    fn append(&self, entry: EchoEntry) -> Result<(), CoreError> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)
    }

    /// Remove an entry by id (full id or unique prefix), returning it.
    fn remove(&self, id: &str) -> Result<EchoEntry, CoreError> {
        let mut entries = self.load()?;
        let removed = take_entry(&mut entries, id)?;
        self.save(&entries)?;
        Ok(removed)
    }
}

/// Remove the single entry matching `id` exactly or by a prefix of four or more characters.
fn take_entry(entries: &mut Vec<EchoEntry>, id: &str) -> Result<EchoEntry, CoreError> {
    let matches: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.id == id || (id.len() >= 4 && e.id.starts_with(id)))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [i] => Ok(entries.remove(*i)),
        _ => Err(CoreError::EntryNotFound { id: id.to_string() }),
    }
}

/// Entries kept as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonEntryStore {
    path: PathBuf,
}

impl JsonEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for JsonEntryStore {
    fn load(&self) -> Result<Vec<EchoEntry>, CoreError> {
        read_json_locked(&self.path)
    }

    fn save(&self, entries: &[EchoEntry]) -> Result<(), CoreError> {
        write_json_locked(&self.path, entries)
    }

    fn append(&self, entry: EchoEntry) -> Result<(), CoreError> {
        update_json_locked(&self.path, |entries: &mut Vec<EchoEntry>| {
            entries.push(entry);
            Ok(())
        })
    }

    fn remove(&self, id: &str) -> Result<EchoEntry, CoreError> {
        update_json_locked(&self.path, |entries: &mut Vec<EchoEntry>| {
            take_entry(entries, id)
        })
    }
}

/// In-process store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Mutex<Vec<EchoEntry>>,
}

impl MemoryEntryStore {
    pub fn new(entries: Vec<EchoEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl MemoryEntryStore {
    fn guard(&self) -> MutexGuard<'_, Vec<EchoEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EntryStore for MemoryEntryStore {
    fn load(&self) -> Result<Vec<EchoEntry>, CoreError> {
        Ok(self.guard().clone())
    }

    fn save(&self, entries: &[EchoEntry]) -> Result<(), CoreError> {
        *self.guard() = entries.to_vec();
        Ok(())
    }

    fn append(&self, entry: EchoEntry) -> Result<(), CoreError> {
        self.guard().push(entry);
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<EchoEntry, CoreError> {
        take_entry(&mut self.guard(), id)
    }
}
