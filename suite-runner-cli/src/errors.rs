// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::OutputContext;
use camino::{FromPathBufError, Utf8PathBuf};
use owo_colors::OwoColorize;
use std::error::Error;
use suite_runner::{
    errors::{CommandBuildError, ConfigParseError, ErrorKind},
    exit_codes::SuiteRunnerExitCode,
};
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected error: a problem with the user's input or environment, not a bug.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed {
        #[source]
        err: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 {
        #[source]
        err: FromPathBufError,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("command build error")]
    CommandBuildError {
        #[from]
        err: CommandBuildError,
    },
    #[error("error writing output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
    #[error("error serializing commands to JSON")]
    SerializeJsonError {
        #[source]
        err: serde_json::Error,
    },
}

impl ExpectedError {
    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::ConfigParseError { .. } => SuiteRunnerExitCode::SETUP_ERROR,
            Self::CommandBuildError { err } => match err.kind() {
                ErrorKind::InvalidArgument => SuiteRunnerExitCode::INVALID_ARGUMENT,
            },
            Self::WriteOutputError { .. } | Self::SerializeJsonError { .. } => {
                SuiteRunnerExitCode::WRITE_OUTPUT_ERROR
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, output: &OutputContext) {
        let mut next_error = match self {
            Self::CurrentDirFailed { err } => {
                tracing::error!("could not determine current directory");
                Some(err as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { err } => {
                tracing::error!(
                    "current directory `{}` is not valid UTF-8",
                    err.as_path().display()
                );
                None
            }
            Self::ConfigParseError { err } => {
                tracing::error!(
                    "failed to parse config at `{}`",
                    err.config_file().style(output.emphasis())
                );
                Some(err.kind() as &dyn Error)
            }
            Self::CommandBuildError { err } => {
                tracing::error!("{}: {err}", err.kind());
                None
            }
            Self::WriteOutputError { err } => {
                tracing::error!("error writing output");
                Some(err as &dyn Error)
            }
            Self::SerializeJsonError { err } => {
                tracing::error!("error serializing commands to JSON");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!("  caused by: {err}");
            next_error = err.source();
        }
    }
}

impl From<FromPathBufError> for ExpectedError {
    fn from(err: FromPathBufError) -> Self {
        Self::CurrentDirInvalidUtf8 { err }
    }
}

/// Returns the current directory as a UTF-8 path.
pub(crate) fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().map_err(|err| ExpectedError::CurrentDirFailed { err })?;
    Ok(Utf8PathBuf::try_from(dir)?)
}
