// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use cliclack::{confirm, input, intro, outro, outro_cancel, select};
use finform_core::{Field, FieldKind, FieldValue, Record, RiskTolerance, Slider};

/// Fill a record interactively, starting from `initial`.
///
/// Returns `None` when the user cancels.
pub fn prompt_record(title: &str, initial: &Record) -> Result<Option<Record>, Box<dyn Error>> {
    intro(title)?;

    let mut record = initial.clone();
    for field in Field::ALL {
        if matches!(field, Field::LoanAmount | Field::LoanPurpose) && !record.loan_required {
            continue;
        }

        let value = match prompt_field(field, &record) {
            Ok(value) => value,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                outro_cancel("Canceled, nothing was saved")?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        record.set(field, value)?;
    }

    outro("Record complete")?;
    Ok(Some(record))
}

fn prompt_field(field: Field, record: &Record) -> io::Result<FieldValue> {
    let current = record.get(field);
    match field.kind() {
        FieldKind::Text => prompt_text(field, &current.to_string()).map(FieldValue::Text),
        FieldKind::Flag => {
            let checked = matches!(current, FieldValue::Checked(true));
            confirm(field.label())
                .initial_value(checked)
                .interact()
                .map(FieldValue::Checked)
        }
        FieldKind::Slider(slider) => prompt_slider(field, slider, &current.to_string()),
        FieldKind::Count => input(field.label())
            .default_input(&current.to_string())
            .validate(|v: &String| match v.trim().parse::<u32>() {
                Ok(_) => Ok(()),
                Err(_) => Err("Please enter a whole number"),
            })
            .interact::<String>()
            .map(|v| FieldValue::Text(v.trim().to_string())),
        FieldKind::Choice => {
            let initial = match current {
                FieldValue::Risk(risk) => risk,
                _ => RiskTolerance::default(),
            };
            let mut prompt = select(field.label());
            for risk in RiskTolerance::ALL {
                prompt = prompt.item(risk, capitalize(risk.as_str()), "");
            }
            prompt.initial_value(initial).interact().map(FieldValue::Risk)
        }
    }
}

fn prompt_text(field: Field, current: &str) -> io::Result<String> {
    let required = Record::REQUIRED.contains(&field);
    let mut prompt = input(field.label()).required(required);
    if !current.is_empty() {
        prompt = prompt.default_input(current);
    }

    match field {
        Field::Dob => prompt
            .placeholder("YYYY-MM-DD")
            .validate(|v: &String| match v.trim().parse::<jiff::civil::Date>() {
                Ok(_) => Ok(()),
                Err(_) => Err("Please enter a date as YYYY-MM-DD"),
            })
            .interact(),
        Field::Email => prompt
            .placeholder("name@example.com")
            .validate(|v: &String| match v.contains('@') {
                true => Ok(()),
                false => Err("Please enter an email address"),
            })
            .interact(),
        Field::LoanAmount | Field::Assets | Field::Liabilities => {
            prompt.placeholder("0").interact()
        }
        _ => prompt.interact(),
    }
}

fn prompt_slider(field: Field, slider: Slider, current: &str) -> io::Result<FieldValue> {
    let label = format!(
        "{} ({} to {}, step {})",
        field.label(),
        slider.min,
        slider.max,
        slider.step
    );
    input(label)
        .default_input(current)
        .validate(move |v: &String| match v.trim().parse::<u32>() {
            Ok(n) if (slider.min..=slider.max).contains(&n) => Ok(()),
            Ok(_) => Err("Value is outside the slider range"),
            Err(_) => Err("Please enter a whole number"),
        })
        .interact::<String>()
        .map(|v| FieldValue::Text(v.trim().to_string()))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
