use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::list::{List, Theme};
use crate::task::Task;
use crate::view::ViewId;

/// Key of the single persisted record.
pub const STORAGE_KEY: &str = "zen-todo-storage";

/// The durable part of a store snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub lists: Vec<List>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub active_list_id: ViewId,
}

/// Accepted on-disk shapes. Browser exports wrap the record as
/// `{ "state": {...}, "version": n }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Envelope { state: PersistedState },
    Bare(PersistedState),
}

impl PersistedState {
    pub fn decode(raw: &str) -> anyhow::Result<Self> {
        let record: StoredRecord =
            serde_json::from_str(raw).context("failed parsing persisted state")?;
        Ok(match record {
            StoredRecord::Envelope { state } => state,
            StoredRecord::Bare(state) => state,
        })
    }

    pub fn encode(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("failed serializing persisted state")
    }
}

/// Load/save capability handed to the store.
pub trait SnapshotStorage {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> anyhow::Result<Option<PersistedState>>;

    /// Overwrites the whole record.
    fn save(&self, state: &PersistedState) -> anyhow::Result<()>;
}

/// One JSON file per storage key, replaced atomically on every save.
#[derive(Debug)]
pub struct JsonFileStorage {
    pub data_dir: PathBuf,
    pub path: PathBuf,
}

impl JsonFileStorage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path, key: &str) -> anyhow::Result<Self> {
        if key.trim().is_empty() || key.contains(['/', '\\']) {
            return Err(anyhow!("invalid storage key: {key:?}"));
        }

        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        let path = data_dir.join(format!("{key}.json"));

        info!(
            data_dir = %data_dir.display(),
            path = %path.display(),
            "opened snapshot storage"
        );

        Ok(Self { data_dir, path })
    }
}

impl SnapshotStorage for JsonFileStorage {
    #[tracing::instrument(skip(self))]
    fn load(&self) -> anyhow::Result<Option<PersistedState>> {
        if !self.path.exists() {
            debug!(file = %self.path.display(), "no persisted state yet");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let state = PersistedState::decode(&raw)
            .with_context(|| format!("failed loading {}", self.path.display()))?;
        debug!(
            lists = state.lists.len(),
            tasks = state.tasks.len(),
            "loaded persisted state"
        );
        Ok(Some(state))
    }

    #[tracing::instrument(skip(self, state))]
    fn save(&self, state: &PersistedState) -> anyhow::Result<()> {
        debug!(
            file = %self.path.display(),
            lists = state.lists.len(),
            tasks = state.tasks.len(),
            "saving state atomically"
        );

        let serialized = state.encode()?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(serialized.as_bytes())?;
        temp.flush()?;

        temp.persist(&self.path)
            .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;

        Ok(())
    }
}

/// In-memory key-value slot holding the serialized record.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a raw record, as if written by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> anyhow::Result<Option<PersistedState>> {
        self.slot
            .lock()
            .as_deref()
            .map(PersistedState::decode)
            .transpose()
    }

    fn save(&self, state: &PersistedState) -> anyhow::Result<()> {
        let serialized = state.encode()?;
        *self.slot.lock() = Some(serialized);
        Ok(())
    }
}
