// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;

use crate::{Error, Record, RecordCollection};

/// A durable key-value slot holding the snapshot of a collection.
#[async_trait]
pub trait Slot: Send + Sync {
    /// Read the stored snapshot, `None` if nothing has been written yet.
    async fn read(&self) -> Result<Option<String>, Error>;

    /// Overwrite the stored snapshot.
    async fn write(&self, content: &str) -> Result<(), Error>;
}

/// A slot backed by a file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Slot for FileSlot {
    async fn read(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, content: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// A slot kept in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySlot {
    content: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds the given snapshot.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
        }
    }

    /// The stored snapshot.
    pub fn content(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // the guarded value is a plain string, a poisoned lock still holds a usable snapshot
        self.content.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Slot for MemorySlot {
    async fn read(&self) -> Result<Option<String>, Error> {
        Ok(self.content())
    }

    async fn write(&self, content: &str) -> Result<(), Error> {
        *self.lock() = Some(content.to_string());
        Ok(())
    }
}

/// Keeps a [`RecordCollection`] in sync with a durable slot.
///
/// Every mutation returns the new collection and rewrites the whole snapshot; there are no
/// incremental writes.
#[derive(Debug, Clone)]
pub struct RecordStore<S: Slot = FileSlot> {
    slot: S,
}

impl<S: Slot> RecordStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Read the persisted collection.
    ///
    /// An absent or unparsable snapshot yields an empty collection, an entry that is not a record
    /// is left out.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> RecordCollection {
        let content = match self.slot.read().await {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!("no snapshot stored, starting empty");
                return RecordCollection::new();
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read snapshot, starting empty");
                return RecordCollection::new();
            }
        };

        let values = match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(%err, "malformed snapshot, starting empty");
                return RecordCollection::new();
            }
        };

        // a bad entry is skipped on its own, the rest of the snapshot survives
        let records: Vec<Record> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(index, %err, "skipping malformed record");
                    None
                }
            })
            .collect();

        tracing::debug!(count = records.len(), "loaded records");
        RecordCollection::from_records(records)
    }

    /// Overwrite the snapshot with the full collection.
    #[tracing::instrument(skip_all, fields(count = collection.len()))]
    pub async fn persist(&self, collection: &RecordCollection) -> Result<(), Error> {
        let content = serde_json::to_string(collection)?;
        self.slot.write(&content).await
    }

    /// Append a record and persist.
    pub async fn add(
        &self,
        collection: &RecordCollection,
        record: Record,
    ) -> Result<RecordCollection, Error> {
        let next = collection.appended(record);
        self.persist(&next).await?;
        Ok(next)
    }

    /// Replace the record at `index` and persist.
    pub async fn update(
        &self,
        collection: &RecordCollection,
        index: usize,
        record: Record,
    ) -> Result<RecordCollection, Error> {
        let next = collection.replaced(index, record)?;
        self.persist(&next).await?;
        Ok(next)
    }

    /// Remove the record at `index` and persist.
    pub async fn remove(
        &self,
        collection: &RecordCollection,
        index: usize,
    ) -> Result<RecordCollection, Error> {
        let (next, _) = collection.removed(index)?;
        self.persist(&next).await?;
        Ok(next)
    }

    /// Pretty-printed JSON of the full collection, see [`export_json`].
    pub fn export_json(&self, collection: &RecordCollection) -> Result<String, Error> {
        export_json(collection)
    }
}

/// Encode the collection as a JSON array indented by two spaces.
pub fn export_json(collection: &RecordCollection) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Record {
        Record {
            full_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn load_empty_slot_yields_empty_collection() {
        let store = RecordStore::new(MemorySlot::new());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_malformed_snapshot_yields_empty_collection() {
        for content in ["", "null", "{", r#"{"fullName":"a"}"#, r#"[{"dependents":"x"}]"#] {
            let store = RecordStore::new(MemorySlot::with_content(content));
            assert!(store.load().await.is_empty(), "content: {content}");
        }
    }

    #[tokio::test]
    async fn load_skips_only_malformed_records() {
        let content = r#"[{"fullName":"a"},{"fullName":"b","dependents":"x"},7,{"fullName":"c"}]"#;
        let store = RecordStore::new(MemorySlot::with_content(content));
        let loaded = store.load().await;
        let names: Vec<&str> = loaded.records().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn mutations_rewrite_the_snapshot() {
        let store = RecordStore::new(MemorySlot::new());
        let c = store.load().await;

        let c = store.add(&c, named("a")).await.unwrap();
        let c = store.add(&c, named("b")).await.unwrap();
        assert_eq!(store.load().await, c);

        let c = store.update(&c, 0, named("x")).await.unwrap();
        assert_eq!(store.load().await, c);

        store.remove(&c, 1).await.unwrap();
        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().full_name, "x");
    }

    #[tokio::test]
    async fn failed_mutation_does_not_write() {
        let store = RecordStore::new(MemorySlot::new());
        let c = store.add(&RecordCollection::new(), named("a")).await.unwrap();
        let before = store.slot().content();

        assert!(store.update(&c, 3, named("x")).await.is_err());
        assert!(store.remove(&c, 1).await.is_err());
        assert_eq!(store.slot().content(), before);
    }

    #[tokio::test]
    async fn persist_writes_compact_array() {
        let store = RecordStore::new(MemorySlot::new());
        store.persist(&RecordCollection::new()).await.unwrap();
        assert_eq!(store.slot().content().as_deref(), Some("[]"));
    }

    #[test]
    fn export_is_indented_by_two_spaces() {
        let c = RecordCollection::from_records([named("a")]);
        let json = export_json(&c).unwrap();
        assert!(json.starts_with("[\n  {\n    \"fullName\": \"a\","));
        assert!(json.ends_with("}\n]"));
    }

    #[test]
    fn export_round_trips() {
        let mut r = named("a");
        r.loan_required = true;
        r.loan_amount = "1000".into();
        r.dependents = 2;
        let c = RecordCollection::from_records([r, named("b")]);

        let json = export_json(&c).unwrap();
        let back: Vec<Record> = serde_json::from_str(&json).unwrap();
        assert_eq!(RecordCollection::from_records(back), c);
    }

    #[tokio::test]
    async fn file_slot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("financeData.json"));
        assert_eq!(slot.read().await.unwrap(), None);

        slot.write("[]").await.unwrap();
        assert_eq!(slot.read().await.unwrap().as_deref(), Some("[]"));
    }
}
