//! [`TokenCache`] (C9): exclusive-writer / multi-reader persistence for
//! [`CachedTokenSequence`] entries, keyed by absolute file path.

use std::collections::HashMap;
use std::path::Path;

use bincode::config::standard;
use serde::{Deserialize, Serialize};

use crate::entry::CachedTokenSequence;
use crate::error::CacheError;

const MAGIC: &[u8; 6] = b"TOKC\0\0";
const FORMAT_VERSION: u32 = 1;
/// Namespaces every on-disk entry key so a future sibling subsystem
/// sharing this store can't collide with clone-detector entries.
const KEY_NAMESPACE: &[u8] = b"token\0";

fn namespaced_key(file: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(KEY_NAMESPACE.len() + file.len());
    key.extend_from_slice(KEY_NAMESPACE);
    key.extend_from_slice(file.as_bytes());
    key
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OnDiskCache {
    entries: HashMap<Vec<u8>, CachedTokenSequence>,
}

/// All tokenized files for a run, keyed by absolute path. The struct is not
/// internally synchronized: the pipeline runs it behind a single owner task
/// ("actor"), with readers consulting a snapshot taken before the run's
/// write phase begins.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: HashMap<Vec<u8>, CachedTokenSequence>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `has(file)`.
    pub fn has(&self, file: &str) -> bool {
        self.entries.contains_key(&namespaced_key(file))
    }

    /// `isValid(file, hash)`.
    pub fn is_valid(&self, file: &str, hash: u64) -> bool {
        self.entries
            .get(&namespaced_key(file))
            .is_some_and(|entry| entry.content_hash == hash)
    }

    /// `get(file, currentHash)`: `None` on miss or stale entry.
    pub fn get(&self, file: &str, current_hash: u64) -> Option<&CachedTokenSequence> {
        self.entries.get(&namespaced_key(file)).filter(|entry| entry.content_hash == current_hash)
    }

    /// `put(file, hash, tokens)`.
    pub fn put(&mut self, file: &str, hash: u64, tokens: token::TokenSequence) {
        self.entries.insert(
            namespaced_key(file),
            CachedTokenSequence {
                content_hash: hash,
                tokens,
            },
        );
    }

    /// `clear()`.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Atomically writes the cache to `path` via temp-file + rename.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let on_disk = OnDiskCache {
            entries: self.entries.clone(),
        };
        let body = bincode::serde::encode_to_vec(&on_disk, standard())?;

        let mut bytes = Vec::with_capacity(MAGIC.len() + 4 + body.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&body);

        let temp_path = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&temp_path, &bytes)?;
        std::fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Best-effort load: an absent, truncated, or corrupt file yields an
    /// empty cache rather than an error (per the cache-load failure model).
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_default()
    }

    fn try_load(path: &Path) -> Result<Self, CacheError> {
        let bytes = std::fs::read(path)?;
        if bytes.len() < MAGIC.len() + 4 || &bytes[..MAGIC.len()] != MAGIC {
            return Err(CacheError::BadMagic);
        }
        let version = u32::from_le_bytes(bytes[MAGIC.len()..MAGIC.len() + 4].try_into().unwrap());
        if version != FORMAT_VERSION {
            return Err(CacheError::VersionMismatch {
                found: version,
                expected: FORMAT_VERSION,
            });
        }
        let (on_disk, _): (OnDiskCache, usize) =
            bincode::serde::decode_from_slice(&bytes[MAGIC.len() + 4..], standard())?;
        Ok(Self {
            entries: on_disk.entries,
        })
    }
}
