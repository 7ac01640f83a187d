// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core library of finform: the client-profile record model, the persisted record store, and
//! the form state that feeds it.

mod collection;
mod config;
mod error;
mod finform;
mod form;
mod record;
mod store;

pub use crate::collection::{RecordCollection, RecordId};
pub use crate::config::{
    APP_NAME, Config, DEFAULT_DATA_FILE, DEFAULT_EXPORT_FILE, expand_path, get_config_dir,
};
pub use crate::error::Error;
pub use crate::finform::{Finform, Submitted};
pub use crate::form::FormState;
pub use crate::record::{Field, FieldKind, FieldValue, Record, RiskTolerance, Slider};
pub use crate::store::{FileSlot, MemorySlot, RecordStore, Slot, export_json};
