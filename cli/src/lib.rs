// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of finform.

mod cli;
mod cmd_generate_completion;
mod cmd_record;
mod config;
mod prompt;
mod record_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
