// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{ExpectedError, Result, current_dir},
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use suite_runner::{
    command::RunCommand,
    config::{SuiteRunnerConfig, config_file_path},
    descriptor::TestDescriptor,
    exit_codes::SuiteRunnerExitCode,
    options::{OptionValue, RunOptions},
    runner::TestSuiteRunner,
};
use tracing::{debug, info};

/// Environment variable holding the default device serial, as used by `adb`.
const ANDROID_SERIAL_ENV: &str = "ANDROID_SERIAL";

/// Generates the commands that run tradefed test suites.
///
/// Each suite is run through its own harness, e.g. `cts-tradefed run commandAndExit cts`.
/// Commands are printed, not executed.
#[derive(Debug, Parser)]
#[command(
    version,
    bin_name = "tradefed-suite",
    max_term_width = 100,
)]
pub struct SuiteRunnerApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    #[clap(subcommand)]
    command: Command,
}

impl SuiteRunnerApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Generate(opts) => opts.exec(&self.config_opts, output, output_writer),
        }
    }
}

#[derive(Debug, Args)]
struct ConfigOpts {
    /// Config file [default: <current-dir>/.config/tradefed-suite.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    fn make_config(&self, root: &Utf8Path) -> Result<SuiteRunnerConfig> {
        debug!(
            "reading config from {}",
            config_file_path(root, self.config_file.as_deref())
        );
        Ok(SuiteRunnerConfig::from_sources(
            root,
            self.config_file.as_deref(),
        )?)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the commands that run the given suites
    ///
    /// One command is printed per distinct suite, in sorted order.
    Generate(GenerateOpts),
}

#[derive(Debug, Args)]
struct GenerateOpts {
    /// Suites to run, e.g. cts
    #[arg(required = true, value_name = "SUITE")]
    suites: Vec<String>,

    /// Serial of the device to run on [fallback: $ANDROID_SERIAL]
    #[arg(long, short = 's', value_name = "SERIAL")]
    serial: Option<String>,

    /// Additional run option, as KEY=VALUE (e.g. CUSTOM_ARGS="--module Foo")
    #[arg(
        long = "option",
        short = 'o',
        value_name = "KEY=VALUE",
        value_parser = RunOptions::parse_option,
    )]
    options: Vec<(String, OptionValue)>,

    /// Output format
    #[arg(
        short = 'T',
        long,
        value_enum,
        default_value_t,
        help_heading = "Output options",
        value_name = "FMT"
    )]
    message_format: MessageFormat,
}

impl GenerateOpts {
    fn exec(
        self,
        config_opts: &ConfigOpts,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let root = current_dir()?;
        let config = config_opts.make_config(&root)?;
        let provider = config.result_server_provider();
        if output.verbose {
            info!("result-server args: {provider}");
        }

        let env_serial = std::env::var(ANDROID_SERIAL_ENV).ok();
        let run_options = self.run_options(env_serial.as_deref());
        let descriptors: Vec<_> = self
            .suites
            .iter()
            .map(|suite| TestDescriptor::for_suite(suite.as_str()))
            .collect();

        let runner = TestSuiteRunner::new(provider);
        let commands = runner.generate_run_commands(&descriptors, &run_options)?;

        let mut writer = output_writer.stdout_writer();
        self.message_format.write(&commands, &mut writer)?;
        writer.flush().map_err(ExpectedError::write_output_error)?;

        Ok(SuiteRunnerExitCode::OK)
    }

    /// Builds the run options. The serial is taken from, in order of precedence: `--serial`, a
    /// `SERIAL` passed through `--option`, then a non-empty `env_serial`.
    fn run_options(&self, env_serial: Option<&str>) -> RunOptions {
        let mut run_options: RunOptions = self.options.iter().cloned().collect();
        if let Some(serial) = &self.serial {
            run_options.insert(RunOptions::SERIAL, serial.as_str());
        } else if run_options.get(RunOptions::SERIAL).is_none()
            && let Some(serial) = env_serial.filter(|serial| !serial.is_empty())
        {
            debug!("using device serial from {ANDROID_SERIAL_ENV}");
            run_options.insert(RunOptions::SERIAL, serial);
        }
        run_options
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum MessageFormat {
    /// One command per line, tokens joined by spaces
    #[default]
    Human,
    /// One command per line, tokens quoted for a POSIX shell
    Shell,
    /// A JSON array of commands
    Json,
}

#[derive(Debug, Serialize)]
struct SerializableCommand<'a> {
    suite: &'a str,
    program: &'a str,
    args: &'a [String],
    command: String,
}

impl<'a> From<&'a RunCommand> for SerializableCommand<'a> {
    fn from(command: &'a RunCommand) -> Self {
        Self {
            suite: command.suite(),
            program: command.program(),
            args: command.args(),
            command: command.to_string(),
        }
    }
}

impl MessageFormat {
    fn write(self, commands: &[RunCommand], mut writer: impl Write) -> Result<()> {
        match self {
            Self::Human => {
                for command in commands {
                    writeln!(writer, "{command}").map_err(ExpectedError::write_output_error)?;
                }
            }
            Self::Shell => {
                for command in commands {
                    writeln!(writer, "{}", command.to_shell_string())
                        .map_err(ExpectedError::write_output_error)?;
                }
            }
            Self::Json => {
                let serializable: Vec<_> =
                    commands.iter().map(SerializableCommand::from).collect();
                serde_json::to_writer_pretty(&mut writer, &serializable)
                    .map_err(|err| ExpectedError::SerializeJsonError { err })?;
                writeln!(writer).map_err(ExpectedError::write_output_error)?;
            }
        }
        Ok(())
    }
}
