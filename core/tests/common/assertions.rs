// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::path::Path;

use finform_core::{Record, RecordCollection};

/// Asserts that the collection holds records with exactly these full names, in order.
pub fn assert_names(collection: &RecordCollection, expected: &[&str]) {
    let names: Vec<&str> = collection.records().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, expected, "Record names mismatch");
}

/// Asserts that the snapshot file decodes to the same records as the collection.
///
/// # Panics
///
/// Panics if the file is missing, malformed, or holds different records.
pub fn assert_snapshot_matches(path: &Path, collection: &RecordCollection) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Snapshot missing at {}: {e}", path.display()));
    let records: Vec<Record> =
        serde_json::from_str(&content).expect("Snapshot is not a record array");
    assert_eq!(
        &RecordCollection::from_records(records),
        collection,
        "Snapshot does not match the live collection"
    );
}
