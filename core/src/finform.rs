// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use tokio::fs;

use crate::store::{FileSlot, RecordStore, Slot};
use crate::{Config, Error, Field, FieldValue, FormState, Record, RecordCollection, RecordId};

/// Outcome of submitting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// The draft was appended as a new record.
    Added(RecordId),
    /// The record under the cursor was replaced.
    Updated(RecordId),
}

impl Submitted {
    pub fn id(&self) -> RecordId {
        match self {
            Submitted::Added(id) | Submitted::Updated(id) => *id,
        }
    }
}

/// Finform application state: the live collection, the form, and the store behind them.
#[derive(Debug)]
pub struct Finform<S: Slot = FileSlot> {
    config: Config,
    store: RecordStore<S>,
    records: RecordCollection,
    form: FormState,
}

impl Finform<FileSlot> {
    /// Creates a new instance with the given configuration, hydrating the collection from the
    /// snapshot in the state directory.
    pub async fn new(mut config: Config) -> Result<Self, Error> {
        config.normalize()?;
        let path = config.data_path()?;
        tracing::debug!(path = %path.display(), "opening record store");

        let store = RecordStore::new(FileSlot::new(path));
        Ok(Self::with_store(config, store).await)
    }
}

impl<S: Slot> Finform<S> {
    /// Creates a new instance on top of an existing store.
    pub async fn with_store(config: Config, store: RecordStore<S>) -> Self {
        let records = store.load().await;
        Self {
            config,
            store,
            records,
            form: FormState::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// The live collection.
    pub fn records(&self) -> &RecordCollection {
        &self.records
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The record at `index`.
    pub fn get(&self, index: usize) -> Result<&Record, Error> {
        self.records.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Set one field of the draft; the form is unchanged on error.
    pub fn set_field(&mut self, field: Field, value: impl Into<FieldValue>) -> Result<(), Error> {
        self.form = self.form.set_field(field, value)?;
        Ok(())
    }

    /// Replace the whole draft, keeping the cursor.
    pub fn set_draft(&mut self, draft: Record) -> Result<(), Error> {
        for field in Field::ALL {
            self.form = self.form.set_field(field, draft.get(field))?;
        }
        Ok(())
    }

    /// Start editing the record at `index`.
    pub fn edit(&mut self, index: usize) -> Result<(), Error> {
        self.form = self.form.load_for_edit(&self.records, index)?;
        Ok(())
    }

    /// Discard the draft and stop editing.
    pub fn reset(&mut self) {
        self.form = self.form.reset();
    }

    /// Submit the draft, persisting the collection.
    pub async fn submit(&mut self) -> Result<Submitted, Error> {
        let submitted = match self.form.cursor() {
            Some(id) => Submitted::Updated(id),
            None => Submitted::Added(self.records.next_id()),
        };

        let (form, records) = self.form.submit(&self.store, &self.records).await?;
        self.form = form;
        self.records = records;
        tracing::info!(?submitted, "record submitted");
        Ok(submitted)
    }

    /// Delete the record at `index`, persisting the collection.
    ///
    /// If the deleted record was being edited, the form is reset.
    pub async fn delete(&mut self, index: usize) -> Result<Record, Error> {
        let (records, removed) = self.records.removed(index)?;
        self.store.persist(&records).await?;

        let id = self.records.id_at(index);
        if id.is_some() && id == self.form.cursor() {
            tracing::debug!(index, "deleted the record being edited, resetting form");
            self.form = self.form.reset();
        }

        self.records = records;
        tracing::info!(index, "record deleted");
        Ok(removed)
    }

    /// Pretty-printed JSON of the whole collection.
    pub fn export_json(&self) -> Result<String, Error> {
        self.store.export_json(&self.records)
    }

    /// Write the export to the given path.
    #[tracing::instrument(skip(self))]
    pub async fn export_to(&self, path: &Path) -> Result<(), Error> {
        let content = self.export_json()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await?;
        tracing::info!(count = self.records.len(), "records exported");
        Ok(())
    }
}
