pub mod config;
pub mod datastore;
pub mod filter;
pub mod hooks;
pub mod list;
pub mod logging;
pub mod reorder;
pub mod store;
pub mod task;
pub mod view;

use std::path::Path;

use anyhow::Context;
use tracing::info;

pub use datastore::{JsonFileStorage, MemoryStorage, PersistedState, SnapshotStorage};
pub use filter::{BoardColumn, BoardView, ListView};
pub use hooks::StoreHooks;
pub use list::{List, ListId, Theme};
pub use store::{Snapshot, Store};
pub use task::{Subtask, Task, TaskId, TaskPatch, TaskStatus};
pub use view::{Bucket, ViewId};

/// Opens the session store: rc config, data directory, JSON storage, then
/// the persisted record (or the configured defaults).
///
/// `overrides` are `key=value` pairs applied on top of the rc file; an
/// `rc.` prefix on the key is accepted.
#[tracing::instrument(skip_all)]
pub fn open_store(
    rc_override: Option<&Path>,
    data_override: Option<&Path>,
    overrides: &[(String, String)],
) -> anyhow::Result<Store<JsonFileStorage>> {
    let mut cfg = config::Config::load(rc_override)?;
    cfg.apply_overrides(overrides.iter().cloned());
    let data_dir = config::resolve_data_dir(&cfg, data_override)
        .context("failed to resolve data directory")?;

    let key = cfg.storage_key();
    let storage = JsonFileStorage::open(&data_dir, &key)
        .with_context(|| format!("failed to open storage at {}", data_dir.display()))?;

    let store = Store::load_or(storage, cfg.initial_state());
    info!(
        data_dir = %data_dir.display(),
        key = %key,
        tasks = store.tasks().len(),
        "store ready"
    );
    Ok(store)
}
