//! File-backed stores for the caller side of the persistence boundary.
//!
//! The analysis engines never read or write these; callers load a snapshot
//! and pass it in.

pub mod journal;
pub mod people;

use std::fs;
use std::io::{Read as _, Seek as _, SeekFrom, Write as _};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::HelixConfig;
use crate::error::CoreError;

pub use journal::{EntryStore, JsonEntryStore, MemoryEntryStore};
pub use people::PeopleStore;

/// Default data directory name, relative to the working directory.
pub const DATA_DIR: &str = ".helix";

const CONFIG_FILE: &str = "config.toml";
const ENTRIES_FILE: &str = "entries.json";
const PEOPLE_FILE: &str = "people.json";

/// A Helix data directory holding config, journal and people.
#[derive(Debug, Clone)]
pub struct HelixStore {
    root: PathBuf,
}

impl HelixStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.config_path().exists()
    }

    /// Create the directory and default files. Existing files are kept.
    pub fn init(&self) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root)?;
        if !self.config_path().exists() {
            HelixConfig::default().save(&self.config_path())?;
        }
        tracing::info!("Initialized data directory at {}", self.root.display());
        Ok(())
    }

    pub fn config(&self) -> Result<HelixConfig, CoreError> {
        self.ensure_initialized()?;
        HelixConfig::load(&self.config_path())
    }

    pub fn journal(&self) -> JsonEntryStore {
        JsonEntryStore::new(self.root.join(ENTRIES_FILE))
    }

    pub fn people(&self) -> PeopleStore {
        PeopleStore::new(self.root.join(PEOPLE_FILE))
    }

    fn ensure_initialized(&self) -> Result<(), CoreError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(CoreError::NotInitialized)
        }
    }
}

/// Read a JSON document under a shared lock. Missing or empty files read as default.
pub(crate) fn read_json_locked<T: DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, CoreError> {
    let file = match fs::OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    fs2::FileExt::lock_shared(&file)?;
    let mut data = String::new();
    let read = (&file).read_to_string(&mut data);
    fs2::FileExt::unlock(&file)?;
    read?;
    parse_or_default(&data)
}

/// Replace a JSON document under an exclusive lock.
pub(crate) fn write_json_locked<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let file = open_for_update(path)?;
    fs2::FileExt::lock_exclusive(&file)?;
    let written = overwrite(&file, &json);
    fs2::FileExt::unlock(&file)?;
    written
}

/// Read, modify and write back a JSON document while holding one exclusive lock.
///
/// Nothing is written when `update` fails.
pub(crate) fn update_json_locked<T, R, F>(path: &Path, update: F) -> Result<R, CoreError>
where
    T: Serialize + DeserializeOwned + Default,
    F: FnOnce(&mut T) -> Result<R, CoreError>,
{
    let file = open_for_update(path)?;
    fs2::FileExt::lock_exclusive(&file)?;
    let result: Result<R, CoreError> = (|| {
        // Re-read under lock to get latest state
        let mut data = String::new();
        (&file).read_to_string(&mut data)?;
        let mut current: T = parse_or_default(&data)?;
        let out = update(&mut current)?;
        overwrite(&file, &serde_json::to_string_pretty(&current)?)?;
        Ok(out)
    })();
    fs2::FileExt::unlock(&file)?;
    result
}

fn open_for_update(path: &Path) -> Result<fs::File, CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // cleared only once the exclusive lock is held
    Ok(fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?)
}

fn overwrite(file: &fs::File, json: &str) -> Result<(), CoreError> {
    file.set_len(0)?;
    (&*file).seek(SeekFrom::Start(0))?;
    (&*file).write_all(json.as_bytes())?;
    Ok(())
}

fn parse_or_default<T: DeserializeOwned + Default>(data: &str) -> Result<T, CoreError> {
    if data.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(data)?)
}
