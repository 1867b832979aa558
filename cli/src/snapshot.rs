//! World-state snapshot file.
//!
//! The snapshot is a JSON object mapping each key to its value as a UTF-8
//! string. Keys are written in sorted order so the file diffs cleanly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use assetchain_hostapi::MemStore;
use tracing::debug;

/// Load a snapshot. A missing file is an empty world state.
pub fn load(path: &Path) -> Result<MemStore> {
    if !path.exists() {
        debug!(path = %path.display(), "no snapshot, starting empty");
        return Ok(MemStore::new());
    }
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let entries: BTreeMap<String, String> = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;

    let mut store = MemStore::new();
    for (key, value) in entries {
        store.insert(key.into_bytes(), value.into_bytes());
    }
    debug!(path = %path.display(), entries = store.len(), "snapshot loaded");
    Ok(store)
}

/// Write a snapshot, replacing the file only once the new contents are on disk.
pub fn save(store: &MemStore, path: &Path) -> Result<()> {
    let mut entries = BTreeMap::new();
    for (key, value) in store.iter() {
        let key = String::from_utf8(key.clone()).context("world-state key is not UTF-8")?;
        let value = match String::from_utf8(value.clone()) {
            Ok(v) => v,
            Err(_) => bail!("value for key {key:?} is not UTF-8"),
        };
        entries.insert(key, value);
    }

    let json = serde_json::to_vec_pretty(&entries)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    debug!(path = %path.display(), entries = store.len(), "snapshot saved");
    Ok(())
}
