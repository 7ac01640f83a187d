// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use finform_core::{APP_NAME, Finform};
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_record::{
    CmdRecordDelete, CmdRecordEdit, CmdRecordExport, CmdRecordList, CmdRecordNew, CmdRecordShow,
};
use crate::config::parse_config;

/// Run the finform command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Finform - Capture, review and export finance client profiles.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to list
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/finform/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/finform/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdRecordNew::command())
            .subcommand(CmdRecordEdit::command())
            .subcommand(CmdRecordDelete::command())
            .subcommand(CmdRecordList::command())
            .subcommand(CmdRecordShow::command())
            .subcommand(CmdRecordExport::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdRecordNew::NAME, matches)) => New(CmdRecordNew::from(matches)),
            Some((CmdRecordEdit::NAME, matches)) => Edit(CmdRecordEdit::from(matches)),
            Some((CmdRecordDelete::NAME, matches)) => Delete(CmdRecordDelete::from(matches)),
            Some((CmdRecordList::NAME, matches)) => List(CmdRecordList::from(matches)),
            Some((CmdRecordShow::NAME, matches)) => Show(CmdRecordShow::from(matches)),
            Some((CmdRecordExport::NAME, matches)) => Export(CmdRecordExport::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => List(CmdRecordList::new()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Add a client record
    New(CmdRecordNew),

    /// Edit a client record
    Edit(CmdRecordEdit),

    /// Delete a client record
    Delete(CmdRecordDelete),

    /// List client records
    List(CmdRecordList),

    /// Show one client record
    Show(CmdRecordShow),

    /// Export client records
    Export(CmdRecordExport),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            New(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            Edit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            Delete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            List(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            Show(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            Export(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Finform) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let mut app = Finform::new(core_config).await?;
        f(&mut app).await
    }
}
