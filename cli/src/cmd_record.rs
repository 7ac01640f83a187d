// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint, arg, builder::BoolishValueParser};
use clap_num::number_range;
use colored::Colorize;
use finform_core::{
    Field, FieldKind, FieldValue, Finform, Record, RiskTolerance, Slider, Slot, Submitted,
};

use crate::prompt::prompt_record;
use crate::record_formatter::{NumberedRecord, RecordDetail, RecordFormatter};
use crate::util::{ArgOutputFormat, arg_no, get_no, index_of};

#[derive(Debug, Clone)]
pub struct CmdRecordNew {
    pub fields: FieldArgs,
    pub output_format: ArgOutputFormat,
}

impl CmdRecordNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new client record, prompting for every field when no field is given")
            .args(FieldArgs::args())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: FieldArgs::from(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run<S: Slot>(self, app: &mut Finform<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new record...");

        let draft = if self.fields.is_empty() {
            match prompt_record("New client record", &Record::default())? {
                Some(record) => record,
                None => {
                    tracing::info!("user canceled the new record");
                    return Ok(());
                }
            }
        } else {
            let mut draft = Record::default();
            self.fields.apply_to(&mut draft)?;
            draft
        };

        submit(app, draft, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdRecordEdit {
    pub no: u32,
    pub fields: FieldArgs,
    pub output_format: ArgOutputFormat,
}

impl CmdRecordEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a client record, prompting with its current values when no field is given")
            .arg(arg_no())
            .args(FieldArgs::args())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            no: get_no(matches),
            fields: FieldArgs::from(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run<S: Slot>(self, app: &mut Finform<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing record...");
        let index = index_of(self.no, app.records())?;
        app.edit(index)?;

        let mut draft = app.form().draft().clone();
        if self.fields.is_empty() {
            let title = format!("Edit client record #{}", self.no);
            match prompt_record(&title, &draft)? {
                Some(record) => draft = record,
                None => {
                    tracing::info!("user canceled the record edit");
                    return Ok(());
                }
            }
        } else {
            self.fields.apply_to(&mut draft)?;
        }

        submit(app, draft, self.output_format).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRecordDelete {
    pub no: u32,
}

impl CmdRecordDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a client record")
            .arg(arg_no())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            no: get_no(matches),
        }
    }

    pub async fn run<S: Slot>(self, app: &mut Finform<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting record...");
        let index = index_of(self.no, app.records())?;
        let removed = app.delete(index).await?;
        println!("{} record #{}: {}", "Deleted".red(), self.no, removed.full_name);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRecordList {
    pub output_format: ArgOutputFormat,
}

impl CmdRecordList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List client records")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn new() -> Self {
        Self {
            output_format: ArgOutputFormat::Table,
        }
    }

    pub async fn run<S: Slot>(self, app: &mut Finform<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing records...");
        let rows = NumberedRecord::all(app.records());
        let formatter = RecordFormatter::new().with_output_format(self.output_format);
        println!("{}", formatter.format(&rows));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRecordShow {
    pub no: u32,
    pub output_format: ArgOutputFormat,
}

impl CmdRecordShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show every field of a client record")
            .arg(arg_no())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            no: get_no(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run<S: Slot>(self, app: &mut Finform<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing record...");
        let index = index_of(self.no, app.records())?;
        let record = app.get(index)?;
        let detail = RecordDetail {
            record,
            format: self.output_format,
        };
        println!("{detail}");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRecordExport {
    pub output: Option<PathBuf>,
}

impl CmdRecordExport {
    pub const NAME: &str = "export";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Export every client record as pretty-printed JSON")
            .arg(
                arg!(-o --output <PATH> "Path of the export file, `-` for stdout")
                    .long_help(
                        "\
Path of the export file, `-` writes to stdout. Defaults to the `export_file` configuration, or \
finance_data.json in the current directory.",
                    )
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output: matches.get_one("output").cloned(),
        }
    }

    pub async fn run<S: Slot>(self, app: &mut Finform<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "exporting records...");
        match self.output {
            Some(path) if path.as_os_str() == "-" => println!("{}", app.export_json()?),
            output => {
                let path = output.unwrap_or_else(|| app.config().export_path());
                app.export_to(&path).await?;
                println!(
                    "{} {} record(s) to {}",
                    "Exported".green(),
                    app.records().len(),
                    path.display()
                );
            }
        }
        Ok(())
    }
}

/// Field values given on the command line, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs(Vec<(Field, FieldValue)>);

impl FieldArgs {
    pub fn args() -> Vec<Arg> {
        Field::ALL.into_iter().map(arg_field).collect()
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let values = Field::ALL
            .into_iter()
            .filter_map(|field| get_field(matches, field).map(|v| (field, v)))
            .collect();
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn apply_to(&self, record: &mut Record) -> Result<(), Box<dyn Error>> {
        for (field, value) in &self.0 {
            record.set(*field, value.clone())?;
        }
        Ok(())
    }
}

fn arg_field(field: Field) -> Arg {
    let arg = Arg::new(field.name())
        .long(long_name(field))
        .help(field.label())
        .action(ArgAction::Set);

    match field.kind() {
        FieldKind::Text if field == Field::Dob => arg.value_name("YYYY-MM-DD"),
        FieldKind::Text => arg.value_name("TEXT"),
        FieldKind::Flag => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .default_missing_value("true")
            .value_parser(BoolishValueParser::new()),
        FieldKind::Slider(slider) => arg
            .value_name("USD")
            .value_parser(slider_parser(slider)),
        FieldKind::Count => arg
            .value_name("N")
            .value_parser(clap::value_parser!(u32)),
        FieldKind::Choice => arg
            .value_name("LEVEL")
            .value_parser(clap::value_parser!(RiskTolerance)),
    }
}

fn get_field(matches: &ArgMatches, field: Field) -> Option<FieldValue> {
    let id = field.name();
    match field.kind() {
        FieldKind::Text => matches.get_one::<String>(id).cloned().map(FieldValue::from),
        FieldKind::Flag => matches.get_one::<bool>(id).copied().map(FieldValue::from),
        FieldKind::Slider(_) | FieldKind::Count => {
            matches.get_one::<u32>(id).copied().map(FieldValue::from)
        }
        FieldKind::Choice => matches
            .get_one::<RiskTolerance>(id)
            .copied()
            .map(FieldValue::from),
    }
}

/// Accept only values the slider can hold, off-step input is rejected instead of snapped.
fn slider_parser(
    slider: Slider,
) -> impl Fn(&str) -> Result<u32, String> + Clone + Send + Sync + 'static {
    move |s| {
        let value = number_range(s, slider.min, slider.max)?;
        if slider.contains(value) {
            Ok(value)
        } else {
            Err(format!(
                "{value} is not on the slider, use a multiple of {} (e.g. {})",
                slider.step,
                slider.fit(i64::from(value)),
            ))
        }
    }
}

fn long_name(field: Field) -> &'static str {
    match field {
        Field::FullName => "full-name",
        Field::Dob => "dob",
        Field::Email => "email",
        Field::Phone => "phone",
        Field::Address => "address",
        Field::Country => "country",
        Field::Income => "income",
        Field::Expenses => "expenses",
        Field::LoanRequired => "loan-required",
        Field::LoanAmount => "loan-amount",
        Field::LoanPurpose => "loan-purpose",
        Field::Assets => "assets",
        Field::Liabilities => "liabilities",
        Field::EmploymentType => "employment-type",
        Field::EmployerName => "employer-name",
        Field::Dependents => "dependents",
        Field::MaritalStatus => "marital-status",
        Field::RiskTolerance => "risk-tolerance",
        Field::Feedback => "feedback",
    }
}

/// Reject drafts the form would not accept.
fn validate(record: &Record) -> Result<(), Box<dyn Error>> {
    let missing = record.missing_required();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
        return Err(format!("Missing required field(s): {}", labels.join(", ")).into());
    }

    if record.dob_date().is_none() {
        return Err(format!("Invalid date of birth '{}', expected YYYY-MM-DD", record.dob).into());
    }
    Ok(())
}

async fn submit<S: Slot>(
    app: &mut Finform<S>,
    draft: Record,
    output_format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    validate(&draft)?;
    app.set_draft(draft)?;
    let submitted = app.submit().await?;

    let index = app
        .records()
        .position(submitted.id())
        .ok_or("Submitted record is missing from the collection")?;

    if output_format == ArgOutputFormat::Table {
        let verb = match submitted {
            Submitted::Added(_) => "Added".green(),
            Submitted::Updated(_) => "Updated".yellow(),
        };
        println!("{verb} record #{}", index + 1);
    }

    let rows = [NumberedRecord {
        no: index + 1,
        record: app.get(index)?,
    }];
    let formatter = RecordFormatter::new().with_output_format(output_format);
    println!("{}", formatter.format(&rows));
    Ok(())
}
