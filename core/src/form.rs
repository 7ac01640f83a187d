// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::store::{RecordStore, Slot};
use crate::{Error, Field, FieldValue, Record, RecordCollection, RecordId};

/// The in-progress draft bound to the form inputs, plus the editing cursor.
///
/// Transitions take `&self` and return the next form, so the caller decides when to replace its
/// state and keeps it on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: Record,
    cursor: Option<RecordId>,
}

impl FormState {
    /// An empty form: the default record and no cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form prefilled with the given draft and no cursor.
    pub fn with_draft(draft: Record) -> Self {
        Self {
            draft,
            cursor: None,
        }
    }

    pub fn draft(&self) -> &Record {
        &self.draft
    }

    /// The record a submit will overwrite, if any.
    pub fn cursor(&self) -> Option<RecordId> {
        self.cursor
    }

    pub fn is_editing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Current position of the record under the cursor.
    pub fn editing_index(&self, collection: &RecordCollection) -> Option<usize> {
        self.cursor.and_then(|id| collection.position(id))
    }

    /// Set one field of the draft.
    pub fn set_field(&self, field: Field, value: impl Into<FieldValue>) -> Result<Self, Error> {
        let mut next = self.clone();
        next.draft.set(field, value.into())?;
        Ok(next)
    }

    /// Set one field of the draft, addressed by its JSON name.
    pub fn set_field_by_name(&self, name: &str, value: &str) -> Result<Self, Error> {
        self.set_field(name.parse()?, value)
    }

    /// Copy the record at `index` into the draft and point the cursor at it.
    pub fn load_for_edit(
        &self,
        collection: &RecordCollection,
        index: usize,
    ) -> Result<Self, Error> {
        let (id, record) = collection
            .id_at(index)
            .zip(collection.get(index))
            .ok_or(Error::OutOfRange {
                index,
                len: collection.len(),
            })?;

        tracing::debug!(index, %id, "loading record for edit");
        Ok(Self {
            draft: record.clone(),
            cursor: Some(id),
        })
    }

    /// The initial form.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Write the draft into the collection and persist it.
    ///
    /// Replaces the record under the cursor, or appends the draft when no record is being
    /// edited. Returns the reset form together with the updated collection.
    pub async fn submit<S: Slot>(
        &self,
        store: &RecordStore<S>,
        collection: &RecordCollection,
    ) -> Result<(Self, RecordCollection), Error> {
        let next = match self.cursor {
            Some(id) => {
                let index = collection.position(id).ok_or(Error::NotFound(id))?;
                tracing::debug!(index, %id, "updating record");
                store.update(collection, index, self.draft.clone()).await?
            }
            None => {
                tracing::debug!("adding record");
                store.add(collection, self.draft.clone()).await?
            }
        };
        Ok((self.reset(), next))
    }
}
