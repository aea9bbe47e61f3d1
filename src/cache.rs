//! Sidecar persistence of a [`ShortIndex`], keyed by dictionary title + version.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::SdictError;
use crate::short_index::ShortIndex;

#[derive(Serialize, Deserialize)]
struct CacheRecord {
    title: String,
    version: String,
    short_index: ShortIndex,
}

/// Resolves and reads/writes the sidecar file for one dictionary.
pub struct IndexCache {
    cache_dir: PathBuf,
    sidecar_path: PathBuf,
}

impl IndexCache {
    /// `<cache_dir>/<basename(dict_path)>-<version>.index`.
    pub fn new(cache_dir: PathBuf, dict_path: &Path, version: &str) -> Self {
        let basename = dict_path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sidecar_path = cache_dir.join(format!("{}-{}.index", basename, version));
        IndexCache { cache_dir, sidecar_path }
    }

    /// The default cache directory, `~/.sdictviewer/index_cache`.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sdictviewer")
            .join("index_cache")
    }

    /// Load the cached short index, if the sidecar exists and its (title, version)
    /// match the freshly-opened dictionary. Any I/O or decode failure, or a
    /// title/version mismatch, is non-fatal: it is logged and `None` is returned
    /// so the caller falls back to an on-disk short index load.
    pub fn load(&self, title: &str, version: &str) -> Option<ShortIndex> {
        match self.try_load(title, version) {
            Ok(short_index) => short_index,
            Err(e) => {
                log::warn!("could not read index cache {:?}: {}", self.sidecar_path, e);
                None
            }
        }
    }

    fn try_load(&self, title: &str, version: &str) -> Result<Option<ShortIndex>, SdictError> {
        let mut file = match fs::File::open(&self.sidecar_path) {
            Ok(f) => f,
            Err(_) => return Ok(None),
        };
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        let (record, _): (CacheRecord, usize) =
            bincode::serde::decode_from_slice(&buf, bincode::config::standard())
                .map_err(|e| SdictError::CorruptionError(format!("corrupt index cache: {}", e)))?;

        if record.title != title || record.version != version {
            log::debug!(
                "title or version mismatch in cached file {:?}",
                self.sidecar_path
            );
            return Ok(None);
        }

        Ok(Some(record.short_index))
    }

    /// Create `cache_dir` if needed and atomically overwrite the sidecar with
    /// `(title, version, short_index)`.
    pub fn save(&self, title: &str, version: &str, short_index: &ShortIndex) -> Result<(), SdictError> {
        fs::create_dir_all(&self.cache_dir)?;

        let record = CacheRecord {
            title: title.to_string(),
            version: version.to_string(),
            short_index: short_index.clone(),
        };
        let bytes = bincode::serde::encode_to_vec(&record, bincode::config::standard())
            .map_err(|e| SdictError::CorruptionError(format!("failed to encode index cache: {}", e)))?;

        let mut tmp = NamedTempFile::new_in(&self.cache_dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(&self.sidecar_path)
            .map_err(|e| SdictError::IoError(e.error))?;

        log::info!("wrote index cache to {:?}", self.sidecar_path);
        Ok(())
    }

    /// Delete the sidecar file. Should only be called after the dictionary that
    /// owns it has been closed, to avoid platform file-lock issues.
    pub fn remove(&self) -> Result<(), SdictError> {
        match fs::remove_file(&self.sidecar_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
