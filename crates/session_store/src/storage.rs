use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SessionStoreError;
use crate::paths::{sanitize_tab_key, tab_file_name, tab_root};
use crate::schema::TabRecord;

/// String key/value storage scoped to one tab.
pub trait TabStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;
}

/// Process-lifetime storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(lock_unpoisoned(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        lock_unpoisoned(&self.values).insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One JSON record per tab under `<state root>/tabs/<tab key>.json`.
#[derive(Debug, Clone)]
pub struct FileTabStorage {
    path: PathBuf,
    owner: Option<String>,
}

impl FileTabStorage {
    pub fn new(state_root: &Path, tab_key: &str) -> Result<Self, SessionStoreError> {
        if sanitize_tab_key(tab_key).is_empty() {
            return Err(SessionStoreError::EmptyTabKey);
        }
        Ok(Self {
            path: tab_root(state_root).join(tab_file_name(tab_key)),
            owner: None,
        })
    }

    /// Binds the storage to the process that owns the tab key. A record written
    /// under a different owner belongs to an earlier tab that reused the key and
    /// reads as absent; the next write replaces it.
    #[must_use]
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Removes tab records under `state_root` not modified within `max_age`,
    /// except `keep`. Returns how many were removed.
    pub fn prune_stale(
        state_root: &Path,
        max_age: Duration,
        keep: &Path,
    ) -> Result<usize, SessionStoreError> {
        let root = tab_root(state_root);
        let entries = match fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(SessionStoreError::io("listing tab records", &root, source)),
        };

        let now = SystemTime::now();
        let mut removed = 0;
        for entry in entries {
            let entry =
                entry.map_err(|source| SessionStoreError::io("listing tab records", &root, source))?;
            let path = entry.path();
            if path == keep || path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|metadata| metadata.modified())
                .map_err(|source| SessionStoreError::io("reading tab record metadata", &path, source))?;
            let age = now.duration_since(modified).unwrap_or_default();
            if age >= max_age {
                fs::remove_file(&path)
                    .map_err(|source| SessionStoreError::io("removing stale tab record", &path, source))?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<TabRecord>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionStoreError::io("reading tab record", &self.path, source))
            }
        };

        let record = serde_json::from_str::<TabRecord>(&raw)
            .map_err(|source| SessionStoreError::json_parse(&self.path, source))?;
        if record.version != 1 {
            return Err(SessionStoreError::UnsupportedVersion {
                path: self.path.clone(),
                found: record.version,
            });
        }
        if self.owner.is_some() && record.owner != self.owner {
            tracing::info!(
                path = %self.path.display(),
                "tab record belongs to an earlier owner of this tab key; ignoring it"
            );
            return Ok(None);
        }
        Ok(Some(record))
    }

    fn store(&self, record: &TabRecord) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                SessionStoreError::io("creating tab storage directory", parent, source)
            })?;
        }

        let serialized = serde_json::to_string_pretty(record)
            .map_err(|source| SessionStoreError::json_serialize(&self.path, source))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)
            .map_err(|source| SessionStoreError::io("writing tab record", &tmp_path, source))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|source| SessionStoreError::io("replacing tab record", &self.path, source))
    }
}

impl TabStorage for FileTabStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self
            .load()?
            .and_then(|mut record| record.values.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut record = match self.load()? {
            Some(record) => record,
            None => TabRecord {
                owner: self.owner.clone(),
                ..TabRecord::v1(now_rfc3339())
            },
        };
        record.values.insert(key.to_owned(), value.to_owned());
        self.store(&record)
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
