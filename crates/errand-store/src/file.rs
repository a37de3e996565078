//! # JSON Snapshot File Store
//!
//! Persists the entire errand collection as one JSON document, read and
//! rewritten wholesale on every operation. A mutex serializes
//! read-modify-write cycles within the process; writes land in a sibling
//! temp file first and are renamed into place, so readers only ever see a
//! complete snapshot.
//!
//! This deliberately mirrors the scale it serves — a neighborhood
//! marketplace, not a high-throughput ledger. The repository trait is the
//! place a real database slots in.

use std::fs;
use std::path::{Path, PathBuf};

use errand_core::ErrandId;
use errand_state::Errand;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::repository::ErrandRepository;

/// On-disk shape of the snapshot file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    errands: Vec<Errand>,
}

/// A file-backed errand repository.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles. Single process, single writer.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created on first save; a missing
    /// file reads as an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<Snapshot, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = snapshot.errands.len(), "snapshot written");
        Ok(())
    }
}

impl ErrandRepository for JsonFileStore {
    fn load(&self, id: ErrandId) -> Result<Option<Errand>, StoreError> {
        let _guard = self.lock.lock();
        let snapshot = self.read_snapshot()?;
        Ok(snapshot.errands.into_iter().find(|e| e.id == id))
    }

    fn save(&self, errand: &Errand) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut snapshot = self.read_snapshot()?;
        match snapshot.errands.iter_mut().find(|e| e.id == errand.id) {
            Some(existing) => *existing = errand.clone(),
            None => snapshot.errands.push(errand.clone()),
        }
        self.write_snapshot(&snapshot)
    }

    fn list(&self) -> Result<Vec<Errand>, StoreError> {
        let _guard = self.lock.lock();
        let mut all = self.read_snapshot()?.errands;
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }
}
