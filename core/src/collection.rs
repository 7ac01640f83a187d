// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::num::NonZeroU32;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Record};

/// Stable identifier of a record within a collection.
///
/// Identifiers are allocated from a counter (1, 2, 3, ...) when a collection is hydrated and when
/// a record is appended. They are never reused by the same collection lineage and are not part of
/// the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(NonZeroU32);

impl RecordId {
    /// The raw number.
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: RecordId,
    record: Record,
}

/// An ordered list of records, addressed by position or by [`RecordId`].
///
/// Mutations never touch `self`; they return the new collection, so a failed mutation leaves the
/// caller's state as it was.
#[derive(Debug, Clone)]
pub struct RecordCollection {
    entries: Vec<Entry>,
    index: HashMap<RecordId, usize>,
    next: NonZeroU32,
}

impl Default for RecordCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next: NonZeroU32::MIN,
        }
    }

    /// Hydrate a collection, assigning identifiers in order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut that = Self::new();
        for record in records {
            that.push(record);
        }
        that
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.entries.get(index).map(|e| &e.record)
    }

    /// The record with the given identifier.
    pub fn get_by_id(&self, id: RecordId) -> Option<&Record> {
        self.position(id).and_then(|i| self.get(i))
    }

    /// Current position of the record with the given identifier.
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Identifier of the record at `index`.
    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        self.entries.get(index).map(|e| e.id)
    }

    /// Identifier of the most recently appended record still present.
    pub fn last_id(&self) -> Option<RecordId> {
        self.entries.last().map(|e| e.id)
    }

    /// Identifier the next appended record will receive.
    pub fn next_id(&self) -> RecordId {
        RecordId(self.next)
    }

    /// Iterate over identifiers and records, in order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.entries.iter().map(|e| (e.id, &e.record))
    }

    /// Iterate over records, in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|e| &e.record)
    }

    /// A new collection with `record` appended.
    pub fn appended(&self, record: Record) -> Self {
        let mut that = self.clone();
        that.push(record);
        that
    }

    /// A new collection with the record at `index` replaced, keeping its identifier.
    pub fn replaced(&self, index: usize, record: Record) -> Result<Self, Error> {
        self.check(index)?;
        let mut that = self.clone();
        that.entries[index].record = record;
        Ok(that)
    }

    /// A new collection without the record at `index`, along with the removed record.
    ///
    /// Every later record moves down by one position; identifiers are unaffected.
    pub fn removed(&self, index: usize) -> Result<(Self, Record), Error> {
        self.check(index)?;
        let mut that = self.clone();
        let entry = that.entries.remove(index);
        that.reindex();
        Ok((that, entry.record))
    }

    fn push(&mut self, record: Record) {
        let id = RecordId(self.next);
        self.next = self.next.saturating_add(1);
        self.index.insert(id, self.entries.len());
        self.entries.push(Entry { id, record });
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();
    }

    fn check(&self, index: usize) -> Result<(), Error> {
        match index < self.len() {
            true => Ok(()),
            false => Err(Error::OutOfRange {
                index,
                len: self.len(),
            }),
        }
    }
}

/// Collections are equal when they hold equal records in the same order.
impl PartialEq for RecordCollection {
    fn eq(&self, other: &Self) -> bool {
        self.records().eq(other.records())
    }
}

impl Eq for RecordCollection {}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

impl Serialize for RecordCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records())
    }
}

impl<'de> Deserialize<'de> for RecordCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Record>::deserialize(deserializer).map(Self::from_records)
    }
}
