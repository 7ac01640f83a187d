// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the finform-core crate.
//!
//! These tests drive the application state against a real file-backed store, covering
//! record lifecycles, persistence across restarts, and export.

mod export;
mod persistence;
mod record_lifecycle;
