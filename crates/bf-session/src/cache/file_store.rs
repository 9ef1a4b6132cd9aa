use crate::cache::{CacheError, CacheResult, KeyValueStore};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Key/value store persisted as one JSON object file.
///
/// The whole map is rewritten on every mutation using the atomic write
/// pattern (temp file, fsync, rename), so a crash mid-write never leaves a
/// half-written cache behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A corrupted file is backed up as
    /// `<name>.corrupted.<timestamp>` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        let path = path.into();
        let entries = Self::read_entries(&path)?;

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> CacheResult<BTreeMap<String, String>> {
        if !path.exists() {
            info!("No session cache at {path:?}");
            return Ok(BTreeMap::new());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| CacheError::file_read(path.to_path_buf(), e))?;

        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Session cache corrupted at {path:?}: {e}");
                Self::backup_corrupted(path)?;
                Ok(BTreeMap::new())
            }
        }
    }

    fn backup_corrupted(path: &Path) -> CacheResult<PathBuf> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("cache"));
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = path.with_file_name(format!("{file_name}.corrupted.{timestamp}"));

        fs::rename(path, &backup_path).map_err(CacheError::backup_failed)?;

        warn!("Backed up corrupted session cache to {backup_path:?}");
        Ok(backup_path)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> CacheResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| CacheError::dir_creation(dir.to_path_buf(), e))?;
        }

        let temp_path = self
            .path
            .with_extension(format!("tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(entries)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| CacheError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| CacheError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| CacheError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CacheError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        entries.clear();

        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| CacheError::file_write(self.path.clone(), e))?;
        }

        Ok(())
    }
}
