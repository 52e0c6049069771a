//! Ledger snapshot persistence.
//!
//! The full ordered ledger is kept as one JSON document and rewritten in
//! whole after every mutation; there are no partial writes. Writes stage to
//! a temporary file and rename over the target.

use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::StorageError;
use crate::ledger::Entry;

const SNAPSHOT_FILE: &str = "ledger.json";
const TMP_SUFFIX: &str = "tmp";

/// Environment override for the data directory, used by tests and scripted
/// runs to avoid touching the real user profile.
pub const DATA_DIR_ENV: &str = "UPLINK_CORE_DATA_DIR";

pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self, StorageError> {
        let root = resolve_base(root);
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self, StorageError> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }

    /// Replaces the persisted snapshot with the given entries.
    pub fn save_entries(&self, entries: &[Entry]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        let path = self.snapshot_path();
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Loads the persisted snapshot. An absent file is an empty ledger.
    pub fn load_entries(&self) -> Result<Vec<Entry>, StorageError> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = root {
        return root;
    }
    if let Some(raw) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(raw);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("uplink_core")
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (SnapshotStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = SnapshotStore::new(Some(temp.path().to_path_buf())).expect("snapshot store");
        (store, temp)
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                100.0,
                EntryKind::Income,
                "Salary",
            ),
            Entry::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                12.5,
                EntryKind::Expense,
                "Lunch",
            ),
        ]
    }

    #[test]
    fn round_trip_preserves_ids_fields_and_order() {
        let (store, _guard) = store_with_temp_dir();
        let entries = sample_entries();
        store.save_entries(&entries).expect("save snapshot");
        let loaded = store.load_entries().expect("load snapshot");
        assert_eq!(loaded, entries);
    }

    #[test]
    fn absent_snapshot_is_an_empty_ledger() {
        let (store, _guard) = store_with_temp_dir();
        let loaded = store.load_entries().expect("load snapshot");
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_overwrites_whole_collection() {
        let (store, _guard) = store_with_temp_dir();
        store.save_entries(&sample_entries()).expect("first save");
        let remaining = vec![sample_entries().remove(0)];
        store.save_entries(&remaining).expect("second save");
        let loaded = store.load_entries().expect("load snapshot");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, "Salary");
    }

    #[test]
    fn wire_format_uses_iso_date_and_lowercase_kind() {
        let (store, _guard) = store_with_temp_dir();
        store.save_entries(&sample_entries()).expect("save");
        let raw = std::fs::read_to_string(store.snapshot_path()).unwrap();
        assert!(raw.contains("\"2024-01-01\""));
        assert!(raw.contains("\"income\""));
        assert!(raw.contains("\"expense\""));
    }
}
