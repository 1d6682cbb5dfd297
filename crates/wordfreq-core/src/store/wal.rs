//! Write-ahead log for `FileStore` inserts.
//!
//! Each insert appends a small frame instead of rewriting the whole
//! checkpoint. Frame layout: `u32 len LE | u32 crc32 LE | bincode payload`.
//! A periodic checkpoint writes the full state and truncates the log.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::sibling_path;

const FRAME_HEADER: usize = 8;

#[derive(Serialize, Deserialize)]
struct WalEntry {
    epoch: u64,
    word: String,
    frequency: u32,
}

pub(super) struct StoreWal {
    path: PathBuf,
    /// Kept open in append mode to avoid repeated open/close per entry.
    file: Option<File>,
    /// Bytes of well-formed frames; a failed append is rolled back to here.
    len: u64,
    /// Entries appended or replayed since the last truncation.
    entry_count: usize,
}

impl StoreWal {
    pub(super) fn new(checkpoint_path: &Path) -> Self {
        Self {
            path: sibling_path(checkpoint_path, ".wal"),
            file: None,
            len: 0,
            entry_count: 0,
        }
    }

    /// Replay frames written under `epoch` into `words`.
    ///
    /// Frames from another epoch predate a clear and are skipped. A truncated
    /// or corrupt frame ends the replay; everything before it is kept.
    pub(super) fn replay(
        &mut self,
        epoch: u64,
        words: &mut HashMap<String, u32>,
    ) -> io::Result<usize> {
        let data = match fs::read(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.len = 0;
                self.entry_count = 0;
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let mut applied = 0;
        let mut frames = 0;
        let mut pos = 0;
        while pos + FRAME_HEADER <= data.len() {
            let length = read_u32(&data[pos..pos + 4]) as usize;
            let expected_crc = read_u32(&data[pos + 4..pos + 8]);

            if length == 0 || pos + FRAME_HEADER + length > data.len() {
                break; // truncated frame
            }

            let payload = &data[pos + FRAME_HEADER..pos + FRAME_HEADER + length];
            if crc32fast::hash(payload) != expected_crc {
                break; // corrupt frame
            }

            match bincode::deserialize::<WalEntry>(payload) {
                Ok(entry) => {
                    if entry.epoch == epoch {
                        words.entry(entry.word).or_insert(entry.frequency);
                        applied += 1;
                    }
                    frames += 1;
                }
                Err(_) => break, // corrupt payload
            }

            pos += FRAME_HEADER + length;
        }

        if pos < data.len() {
            warn!(
                path = %self.path.display(),
                ignored_bytes = data.len() - pos,
                "discarding damaged WAL tail"
            );
            // New frames must not land behind the garbage.
            OpenOptions::new()
                .write(true)
                .open(&self.path)?
                .set_len(pos as u64)?;
        }
        self.len = pos as u64;
        self.entry_count = frames;
        Ok(applied)
    }

    pub(super) fn append(&mut self, epoch: u64, word: &str, frequency: u32) -> io::Result<()> {
        let entry = WalEntry {
            epoch,
            word: word.to_string(),
            frequency,
        };
        let payload = bincode::serialize(&entry).map_err(io::Error::other)?;
        let length = u32::try_from(payload.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "WAL entry too large"))?;

        let mut frame = Vec::with_capacity(FRAME_HEADER + payload.len());
        frame.extend_from_slice(&length.to_le_bytes());
        frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        frame.extend_from_slice(&payload);

        let start = self.len;
        let written = self.open_file().and_then(|file| {
            file.write_all(&frame)?;
            file.flush()
        });
        if let Err(e) = written {
            self.rollback(start);
            return Err(e);
        }

        self.len += frame.len() as u64;
        self.entry_count += 1;
        Ok(())
    }

    /// Drop a partially written frame so later appends stay replayable.
    fn rollback(&mut self, len: u64) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.set_len(len) {
                warn!(path = %self.path.display(), "failed to roll back WAL: {e}");
            }
        }
    }

    /// Get or lazily open the WAL file handle.
    fn open_file(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.len = f.metadata()?.len();
            self.file = Some(f);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("WAL file handle unavailable"))
    }

    pub(super) fn needs_compact(&self, threshold: usize) -> bool {
        self.entry_count >= threshold
    }

    /// Truncate the WAL file and reset entry count.
    /// Call after a checkpoint has been written.
    pub(super) fn truncate(&mut self) -> io::Result<()> {
        self.file = None;
        match fs::metadata(&self.path) {
            Ok(_) => {
                File::create(&self.path)?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        self.len = 0;
        self.entry_count = 0;
        Ok(())
    }

    pub(super) fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}
