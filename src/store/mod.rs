//! Persisted registry store.
//!
//! A generic mapping from binary name to an arbitrary serializable record,
//! backed by one pretty-printed JSON file. Every mutation rewrites the whole
//! file through a `.tmp` sibling followed by a rename, so readers never
//! observe a partially written registry.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Schema tag written to every registry file.
pub const FORMAT_VERSION: &str = "v1";

/// On-disk envelope of the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegistryFile<T> {
    pub version: String,
    pub updated_at: DateTime<Utc>,
    pub binaries: BTreeMap<String, T>,
}

impl<T> RegistryFile<T> {
    fn new() -> Self {
        RegistryFile {
            version: FORMAT_VERSION.to_string(),
            updated_at: Utc::now(),
            binaries: BTreeMap::new(),
        }
    }
}

/// Registry store bound to one file path.
///
/// A handle lives for a single command invocation: it is opened (or
/// bootstrapped empty) at the start of the command and every mutating
/// operation persists the whole registry before returning.
#[derive(Debug)]
pub struct Store<'a, R: Runtime, T> {
    runtime: &'a R,
    file_path: PathBuf,
    file: RegistryFile<T>,
}

impl<'a, R: Runtime, T: Serialize + DeserializeOwned> Store<'a, R, T> {
    /// Create a handle with an empty in-memory registry, without touching disk.
    pub fn new(runtime: &'a R, file_path: PathBuf) -> Self {
        Store {
            runtime,
            file_path,
            file: RegistryFile::new(),
        }
    }

    /// Open the registry for a mutating workflow: create the backing file if
    /// it does not exist yet, then load it.
    #[tracing::instrument(skip(runtime, file_path))]
    pub fn open(runtime: &'a R, file_path: PathBuf) -> Result<Self> {
        let mut store = Store::new(runtime, file_path);
        store.ensure_file()?;
        let path = store.file_path.clone();
        store.load_file(&path)?;
        Ok(store)
    }

    /// Open the registry for a read-only workflow. A missing backing file
    /// surfaces as a `StorageIo` error.
    #[tracing::instrument(skip(runtime, file_path))]
    pub fn load(runtime: &'a R, file_path: PathBuf) -> Result<Self> {
        let mut store = Store::new(runtime, file_path);
        let path = store.file_path.clone();
        store.load_file(&path)?;
        Ok(store)
    }

    fn ensure_file(&self) -> Result<()> {
        if self.runtime.exists(&self.file_path) {
            return Ok(());
        }

        log::info!("bootstrapping empty registry at {:?}", self.file_path);
        self.save_file(&self.file_path)
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = self
            .runtime
            .read_to_string(path)
            .map_err(|source| storage_io("read", path, source))?;

        let file: RegistryFile<T> =
            serde_json::from_str(&content).map_err(|e| Error::StorageFormat {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        if file.version != FORMAT_VERSION {
            return Err(Error::StorageFormat {
                path: path.to_path_buf(),
                detail: format!(
                    "unsupported format version '{}' (expected '{}')",
                    file.version, FORMAT_VERSION
                ),
            });
        }

        self.file = file;
        Ok(())
    }

    fn save_file(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.file).map_err(|e| Error::StorageFormat {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        let tmp_path = tmp_sibling(path);
        self.runtime
            .write(&tmp_path, json.as_bytes())
            .map_err(|source| storage_io("write", &tmp_path, source))?;
        self.runtime
            .rename(&tmp_path, path)
            .map_err(|source| storage_io("rename", path, source))?;

        Ok(())
    }

    /// Upsert one entry and persist the whole registry.
    #[tracing::instrument(skip(self, item))]
    pub fn put(&mut self, key: &str, item: T) -> Result<()> {
        self.file.binaries.insert(key.to_string(), item);
        self.file.updated_at = Utc::now();
        self.save_file(&self.file_path)
    }

    /// Remove one entry if present and persist. Removing an absent key is a
    /// no-op at the data level; callers check existence first when absence is
    /// an error.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.file.binaries.remove(key);
        self.file.updated_at = Utc::now();
        self.save_file(&self.file_path)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.file.binaries.get(key)
    }

    pub fn all(&self) -> &BTreeMap<String, T> {
        &self.file.binaries
    }

    /// Replace the registry with the contents of `path` and persist to the
    /// bound file. An import fully replaces, never merges.
    #[tracing::instrument(skip(self))]
    pub fn import(&mut self, path: &Path) -> Result<()> {
        self.load_file(path)?;
        self.save_file(&self.file_path)
    }

    /// Save the registry to `path`, overwriting if present.
    #[tracing::instrument(skip(self))]
    pub fn export(&self, path: &Path) -> Result<()> {
        self.save_file(path)
    }
}

fn storage_io(action: &'static str, path: &Path, source: io::Error) -> Error {
    Error::StorageIo {
        action,
        path: path.to_path_buf(),
        source,
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
