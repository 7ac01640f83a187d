// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::PathBuf};

use clap::{Arg, ArgMatches, Command, ValueEnum, ValueHint, value_parser};
use clap_complete::Generator;
use colored::Colorize;

use crate::Cli;

/// Print a completion script for `finform`, or install it into a directory.
#[derive(Debug, Clone)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
    pub dir: Option<PathBuf>,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Generate shell completion for finform")
            .hide(true)
            .arg(
                Arg::new("shell")
                    .value_name("SHELL")
                    .help("Shell to generate the script for")
                    .required(true)
                    .value_parser(value_parser!(Shell)),
            )
            .arg(
                Arg::new("dir")
                    .short('d')
                    .long("dir")
                    .value_name("DIR")
                    .help("Write the script into this directory instead of stdout")
                    .value_hint(ValueHint::DirPath)
                    .value_parser(value_parser!(PathBuf)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            shell: matches.get_one::<Shell>("shell").copied().unwrap_or_default(),
            dir: matches.get_one::<PathBuf>("dir").cloned(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(shell = ?self.shell, dir = ?self.dir, "generating shell completion...");
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        match self.dir {
            Some(dir) => {
                let path = clap_complete::generate_to(self.shell, &mut cmd, bin_name, dir)?;
                println!("{} {}", "Completion written to".green(), path.display());
            }
            None => clap_complete::generate(self.shell, &mut cmd, bin_name, &mut io::stdout()),
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    #[default]
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    fn builtin(self) -> Option<clap_complete::Shell> {
        use clap_complete::Shell as Builtin;
        match self {
            Shell::Bash => Some(Builtin::Bash),
            Shell::Elvish => Some(Builtin::Elvish),
            Shell::Fish => Some(Builtin::Fish),
            Shell::PowerShell => Some(Builtin::PowerShell),
            Shell::Zsh => Some(Builtin::Zsh),
            Shell::Nushell => None,
        }
    }
}

impl Generator for Shell {
    fn file_name(&self, name: &str) -> String {
        match self.builtin() {
            Some(shell) => shell.file_name(name),
            None => clap_complete_nushell::Nushell.file_name(name),
        }
    }

    fn generate(&self, cmd: &Command, buf: &mut dyn io::Write) {
        match self.builtin() {
            Some(shell) => shell.generate(cmd, buf),
            None => clap_complete_nushell::Nushell.generate(cmd, buf),
        }
    }
}
