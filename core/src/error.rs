// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;

use crate::collection::RecordId;

/// Errors produced by the finform core.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The index does not address a record in the collection.
    #[error("Index {index} is out of range, the collection holds {len} record(s)")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },

    /// The record is no longer part of the collection.
    #[error("Record {0} not found")]
    NotFound(RecordId),

    /// The field name is not part of a record.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The value cannot be coerced to the type of the field.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// JSON name of the field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
