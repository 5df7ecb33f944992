// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by tradefed-suite.

use camino::Utf8PathBuf;
use config::ConfigError;
use std::fmt;
use thiserror::Error;

/// The broad category an error falls into.
///
/// Callers use this to decide how to react to an error without matching on every variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed in input that violates a documented precondition.
    InvalidArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

/// An error that occurred while generating run commands.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandBuildError {
    /// A descriptor did not name any targets.
    #[error("test descriptor `{test_name}` has no targets")]
    EmptyTargets {
        /// The suite name of the offending descriptor.
        test_name: String,
    },

    /// A descriptor, or one of its targets, had an empty suite name.
    #[error("test descriptor has an empty suite name (runner: {runner_name})")]
    EmptySuiteName {
        /// The runner name recorded on the offending descriptor.
        runner_name: String,
    },

    /// A descriptor belongs to a different runner.
    #[error(
        "test descriptor `{test_name}` belongs to runner `{runner_name}`, \
         not `{expected}`"
    )]
    ForeignRunner {
        /// The suite name of the offending descriptor.
        test_name: String,
        /// The runner name recorded on the descriptor.
        runner_name: String,
        /// The name of the runner that was asked to generate commands.
        expected: &'static str,
    },
}

impl CommandBuildError {
    /// Returns the kind of error this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTargets { .. }
            | Self::EmptySuiteName { .. }
            | Self::ForeignRunner { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// An error that occurred while parsing a `KEY=VALUE` run option.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunOptionParseError {
    /// The option had no key, e.g. `=foo`.
    #[error("run option `{input}` has an empty key")]
    EmptyKey {
        /// The input that failed to parse.
        input: String,
    },

    /// The value of `CUSTOM_ARGS` could not be split into words.
    #[error("failed to split custom args `{value}` into words")]
    CustomArgs {
        /// The unparseable value.
        value: String,
        /// The underlying error message.
        #[source]
        err: ShellWordsError,
    },

    /// A flag option was given a value other than `true` or `false`.
    #[error("option `{key}` expects `true` or `false`, found `{value}`")]
    InvalidFlag {
        /// The option key.
        key: String,
        /// The value that was passed in.
        value: String,
    },
}

/// A shell-words parse failure, stored by message so that [`RunOptionParseError`] stays `Clone`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ShellWordsError {
    message: String,
}

impl From<shell_words::ParseError> for ShellWordsError {
    fn from(err: shell_words::ParseError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// An error that occurred while reading tradefed-suite configuration.
#[derive(Debug, Error)]
#[error("failed to parse tradefed-suite config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file that failed to parse.
    ///
    /// This is `<default config>` if the built-in defaults failed to parse.
    pub fn config_file(&self) -> &camino::Utf8Path {
        &self.config_file
    }

    /// Returns the kind of parse error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of [`ConfigParseError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// The config sources could not be read or merged.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// The merged config could not be deserialized.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}
