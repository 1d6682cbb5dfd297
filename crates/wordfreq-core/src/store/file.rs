//! Persistent `WordStore`: checkpoint file + write-ahead log.
//!
//! The checkpoint (`WFDB` magic, version byte, bincode body) holds the full
//! word map and an epoch. Inserts go to the WAL first and only then to the
//! in-memory map. `clear` atomically replaces the checkpoint with an empty
//! one under the next epoch, which makes every older WAL frame stale even
//! if truncating the log fails afterwards.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info, warn};

use super::wal::StoreWal;
use super::{ranked_matches, sibling_path, validate_word, StoreError, WordRecord, WordStore};
use crate::settings::settings;

const MAGIC: &[u8; 4] = b"WFDB";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 5;

/// Flat serialization format for bincode.
#[derive(Serialize, Deserialize)]
struct StoreData {
    epoch: u64,
    records: Vec<WordRecord>,
}

struct Inner {
    words: HashMap<String, u32>,
    epoch: u64,
    wal: StoreWal,
}

pub struct FileStore {
    path: PathBuf,
    compact_threshold: usize,
    inner: RwLock<Inner>,
}

impl FileStore {
    /// Open the store at `path`, returning an empty store if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::open_with(path, settings().store.compact_threshold)
    }

    pub fn open_with(path: &Path, compact_threshold: usize) -> Result<Self, StoreError> {
        let _span = debug_span!("store_open", path = %path.display()).entered();
        let (epoch, mut words): (u64, HashMap<String, u32>) = match fs::read(path) {
            Ok(bytes) => {
                let data = decode_checkpoint(&bytes)?;
                let words = data
                    .records
                    .into_iter()
                    .map(|r| (r.word, r.frequency))
                    .collect();
                (data.epoch, words)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => (0, HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut wal = StoreWal::new(path);
        let replayed = wal.replay(epoch, &mut words)?;
        debug!(epoch, words = words.len(), replayed);

        Ok(Self {
            path: path.to_path_buf(),
            compact_threshold: compact_threshold.max(1),
            inner: RwLock::new(Inner { words, epoch, wal }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn wal_path(&self) -> PathBuf {
        self.read().wal.path().to_path_buf()
    }

    /// Number of WAL entries not yet folded into the checkpoint.
    pub fn pending_entries(&self) -> usize {
        self.read().wal.entry_count()
    }

    /// Write the full word map to the checkpoint and truncate the WAL.
    pub fn checkpoint(&self) -> Result<(), StoreError> {
        let mut inner = self.write();
        self.checkpoint_locked(&mut inner)
    }

    fn checkpoint_locked(&self, inner: &mut Inner) -> Result<(), StoreError> {
        let _span = debug_span!("store_checkpoint", words = inner.words.len()).entered();
        let mut records: Vec<WordRecord> = inner
            .words
            .iter()
            .map(|(word, &frequency)| WordRecord {
                word: word.clone(),
                frequency,
            })
            .collect();
        records.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        write_checkpoint(&self.path, inner.epoch, records)?;
        inner.wal.truncate()?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl WordStore for FileStore {
    fn contains(&self, word: &str) -> Result<bool, StoreError> {
        Ok(self.read().words.contains_key(word))
    }

    fn insert(&self, word: &str, frequency: u32) -> Result<(), StoreError> {
        validate_word(word)?;
        let mut inner = self.write();
        if inner.words.contains_key(word) {
            return Err(StoreError::Conflict(word.to_string()));
        }
        let epoch = inner.epoch;
        inner.wal.append(epoch, word, frequency)?;
        inner.words.insert(word.to_string(), frequency);

        if inner.wal.needs_compact(self.compact_threshold) {
            // The insert is already durable in the WAL; a failed compaction
            // only means a longer replay next time.
            if let Err(e) = self.checkpoint_locked(&mut inner) {
                warn!("checkpoint after {} WAL entries failed: {e}", self.compact_threshold);
            }
        }
        Ok(())
    }

    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError> {
        Ok(ranked_matches(self.read().words.iter(), prefix, limit))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.write();
        let _span = debug_span!("store_clear", words = inner.words.len()).entered();
        let next_epoch = inner.epoch + 1;
        write_checkpoint(&self.path, next_epoch, Vec::new())?;
        inner.words.clear();
        inner.epoch = next_epoch;
        if let Err(e) = inner.wal.truncate() {
            warn!("stale WAL left in place after clear: {e}");
        }
        info!(epoch = next_epoch, "store cleared");
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read().words.len())
    }
}

fn encode_checkpoint(data: &StoreData) -> Result<Vec<u8>, StoreError> {
    let body = bincode::serialize(data).map_err(StoreError::Serialize)?;
    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(&body);
    Ok(buf)
}

fn decode_checkpoint(bytes: &[u8]) -> Result<StoreData, StoreError> {
    if bytes.len() < HEADER_LEN {
        return Err(StoreError::Corrupt("too short".to_string()));
    }
    if &bytes[0..4] != MAGIC {
        return Err(StoreError::Corrupt("bad magic".to_string()));
    }
    if bytes[4] != VERSION {
        return Err(StoreError::Corrupt(format!(
            "unsupported version: {}",
            bytes[4]
        )));
    }
    bincode::deserialize(&bytes[HEADER_LEN..]).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// Atomic write: write to .tmp then rename.
fn write_checkpoint(path: &Path, epoch: u64, records: Vec<WordRecord>) -> Result<(), StoreError> {
    let bytes = encode_checkpoint(&StoreData { epoch, records })?;
    let tmp = sibling_path(path, ".tmp");
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
