// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use finform_core::{Field, Record, RecordCollection, RiskTolerance};
use unicode_width::UnicodeWidthStr;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::ArgOutputFormat;

/// A record together with its 1-based number in the listing.
#[derive(Debug, Clone, Copy)]
pub struct NumberedRecord<'a> {
    pub no: usize,
    pub record: &'a Record,
}

impl<'a> NumberedRecord<'a> {
    pub fn all(records: &'a RecordCollection) -> Vec<Self> {
        records
            .records()
            .enumerate()
            .map(|(i, record)| Self { no: i + 1, record })
            .collect()
    }
}

#[derive(Debug)]
pub struct RecordFormatter {
    columns: Vec<RecordColumn>,
    format: ArgOutputFormat,
}

impl RecordFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                RecordColumn::No,
                RecordColumn::Name,
                RecordColumn::Email,
                RecordColumn::Country,
                RecordColumn::Income,
                RecordColumn::Expenses,
                RecordColumn::Loan,
                RecordColumn::Risk,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, records: &'a [NumberedRecord<'a>]) -> Display<'a> {
        Display {
            records,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    records: &'a [NumberedRecord<'a>],
    formatter: &'a RecordFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let records: Vec<&Record> = self.records.iter().map(|a| a.record).collect();
                let json = serde_json::to_string_pretty(&records).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            ArgOutputFormat::Table if self.records.is_empty() => {
                write!(f, "{}", "No records found".italic())
            }
            ArgOutputFormat::Table => {
                let table = Table::new(&self.formatter.columns, self.records).to_string();
                write!(f, "{}", table.trim_end_matches('\n'))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RecordColumn {
    No,
    Name,
    Email,
    Country,
    Income,
    Expenses,
    Loan,
    Risk,
}

impl Column<NumberedRecord<'_>> for RecordColumn {
    fn name(&self) -> &'static str {
        match self {
            RecordColumn::No => "#",
            RecordColumn::Name => "Name",
            RecordColumn::Email => "Email",
            RecordColumn::Country => "Country",
            RecordColumn::Income => "Income",
            RecordColumn::Expenses => "Expenses",
            RecordColumn::Loan => "Loan",
            RecordColumn::Risk => "Risk",
        }
    }

    fn format(&self, data: &NumberedRecord<'_>) -> String {
        let r = data.record;
        match self {
            RecordColumn::No => data.no.to_string(),
            RecordColumn::Name => r.full_name.clone(),
            RecordColumn::Email => r.email.clone(),
            RecordColumn::Country => r.country.clone(),
            RecordColumn::Income => r.income.to_string(),
            RecordColumn::Expenses => r.expenses.to_string(),
            RecordColumn::Loan => yes_no(r.loan_required).to_string(),
            RecordColumn::Risk => r.risk_tolerance.to_string(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            RecordColumn::No | RecordColumn::Income | RecordColumn::Expenses => {
                PaddingDirection::Right
            }
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &NumberedRecord<'_>) -> Option<Color> {
        match self {
            RecordColumn::Risk => match data.record.risk_tolerance {
                RiskTolerance::Low => Some(Color::Green),
                RiskTolerance::Medium => None,
                RiskTolerance::High => Some(Color::Red),
            },
            RecordColumn::Loan if data.record.loan_required => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Every field of one record, one per line.
#[derive(Debug)]
pub struct RecordDetail<'a> {
    pub record: &'a Record,
    pub format: ArgOutputFormat,
}

impl fmt::Display for RecordDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.format == ArgOutputFormat::Json {
            let json = serde_json::to_string_pretty(self.record).map_err(|_| fmt::Error)?;
            return write!(f, "{json}");
        }

        let width = Field::ALL.iter().map(|a| a.label().width()).max().unwrap_or(0);
        for (i, field) in Field::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let label = field.label();
            let fill = " ".repeat(width - label.width());
            let value = self.record.get(field).to_string();
            // multi-line text such as the address is indented under its label
            let value = value.replace('\n', &format!("\n{}", " ".repeat(width + 2)));
            write!(f, "{}{fill}  {value}", label.bold())?;
        }
        Ok(())
    }
}

fn yes_no(b: bool) -> &'static str {
    match b {
        true => "Yes",
        false => "No",
    }
}
