// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use finform_core::RecordCollection;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// The 1-based record number shown in listings.
pub fn arg_no() -> Arg {
    arg!(no: <NO> "The record number, as shown by `finform list`")
        .value_parser(value_parser!(u32).range(1..))
}

pub fn get_no(matches: &ArgMatches) -> u32 {
    match matches.get_one::<u32>("no") {
        Some(no) => *no,
        None => unreachable!("record number is required"),
    }
}

/// Convert a record number to the index into the collection.
pub fn index_of(no: u32, records: &RecordCollection) -> Result<usize, Box<dyn Error>> {
    let index = usize::try_from(no.saturating_sub(1))?;
    if index >= records.len() {
        return Err(match records.len() {
            0 => format!("No record #{no}, the list is empty").into(),
            len => format!("No record #{no}, expected a number from 1 to {len}").into(),
        });
    }
    Ok(index)
}
