// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-invocation run options, and their translation into harness arguments.

use crate::errors::{RunOptionParseError, ShellWordsError};
use std::collections::BTreeMap;

/// The value of a single run option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// A single string, e.g. a device serial.
    String(String),

    /// An ordered list of tokens.
    List(Vec<String>),

    /// An on/off switch.
    Flag(bool),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Options for a single invocation, keyed by option name.
///
/// Recognized keys are [`SERIAL`](Self::SERIAL), [`CUSTOM_ARGS`](Self::CUSTOM_ARGS) and
/// [`DRY_RUN`](Self::DRY_RUN). Any other key is carried along but not understood by
/// [`TestSuiteRunner`](crate::runner::TestSuiteRunner); see [`HarnessArgs::unsupported`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    options: BTreeMap<String, OptionValue>,
}

impl RunOptions {
    /// The device serial to pass to the harness as `--serial <value>`.
    pub const SERIAL: &'static str = "SERIAL";

    /// Extra tokens passed through verbatim to the harness.
    pub const CUSTOM_ARGS: &'static str = "CUSTOM_ARGS";

    /// Dry-run mode. Accepted, but handled by whoever launches the commands.
    pub const DRY_RUN: &'static str = "DRY_RUN";

    /// Creates an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the device serial.
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.insert(Self::SERIAL, OptionValue::String(serial.into()));
        self
    }

    /// Sets the custom args passed through to the harness.
    pub fn with_custom_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.insert(
            Self::CUSTOM_ARGS,
            OptionValue::List(args.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Inserts an option, returning the previous value for the key if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.options.insert(key.into(), value.into())
    }

    /// Returns the value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Returns true if no options are set.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns the device serial, if one is set and non-empty.
    pub fn serial(&self) -> Option<&str> {
        match self.options.get(Self::SERIAL) {
            Some(OptionValue::String(serial)) if !serial.is_empty() => Some(serial),
            _ => None,
        }
    }

    /// Returns true if dry-run mode was requested.
    pub fn is_dry_run(&self) -> bool {
        matches!(self.options.get(Self::DRY_RUN), Some(OptionValue::Flag(true)))
    }

    /// Parses a `KEY=VALUE` option as accepted on the command line.
    ///
    /// * `SERIAL=<serial>` sets the device serial.
    /// * `CUSTOM_ARGS=<words>` is split into tokens using POSIX shell quoting rules.
    /// * `DRY_RUN`, `DRY_RUN=true` and `DRY_RUN=false` set the dry-run flag.
    /// * Any other `KEY=VALUE` is stored as a string, and a bare `KEY` as a set flag.
    pub fn parse_option(input: &str) -> Result<(String, OptionValue), RunOptionParseError> {
        let (key, value) = match input.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (input, None),
        };
        if key.is_empty() {
            return Err(RunOptionParseError::EmptyKey {
                input: input.to_owned(),
            });
        }

        let value = match (key, value) {
            (_, None) => OptionValue::Flag(true),
            (Self::CUSTOM_ARGS, Some(value)) => {
                let words =
                    shell_words::split(value).map_err(|err| RunOptionParseError::CustomArgs {
                        value: value.to_owned(),
                        err: ShellWordsError::from(err),
                    })?;
                OptionValue::List(words)
            }
            (Self::DRY_RUN, Some(value)) => match value {
                "true" => OptionValue::Flag(true),
                "false" => OptionValue::Flag(false),
                _ => {
                    return Err(RunOptionParseError::InvalidFlag {
                        key: key.to_owned(),
                        value: value.to_owned(),
                    });
                }
            },
            (_, Some(value)) => OptionValue::String(value.to_owned()),
        };

        Ok((key.to_owned(), value))
    }

    /// Translates these options into the arguments the harness understands.
    pub fn to_harness_args(&self) -> HarnessArgs {
        let mut args = HarnessArgs::default();

        for (key, value) in &self.options {
            match (key.as_str(), value) {
                (Self::SERIAL, OptionValue::String(serial)) => {
                    if !serial.is_empty() {
                        args.device_args = vec!["--serial".to_owned(), serial.clone()];
                    }
                }
                (Self::CUSTOM_ARGS, OptionValue::List(custom)) => {
                    args.custom_args.clone_from(custom);
                }
                (Self::DRY_RUN, OptionValue::Flag(_)) => {}
                _ => args.unsupported.push(key.clone()),
            }
        }

        args
    }
}

impl<K, V> FromIterator<(K, V)> for RunOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        options.extend(iter);
        options
    }
}

impl<K, V> Extend<(K, V)> for RunOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Harness arguments derived from [`RunOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HarnessArgs {
    /// Device selection tokens: either empty or exactly `["--serial", <serial>]`.
    pub device_args: Vec<String>,

    /// Tokens from `CUSTOM_ARGS`, verbatim and in order.
    pub custom_args: Vec<String>,

    /// Keys that were set but are not understood, in sorted order. A recognized key holding a value
    /// of the wrong type is also reported here.
    pub unsupported: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn empty_options_produce_no_args() {
        assert_eq!(RunOptions::new().to_harness_args(), HarnessArgs::default());
    }

    #[test_case(RunOptions::new(), None ; "no serial")]
    #[test_case(RunOptions::new().with_serial(""), None ; "empty serial")]
    #[test_case(RunOptions::new().with_serial("LG123456789"), Some("LG123456789") ; "serial")]
    #[test_case(
        [(RunOptions::SERIAL, OptionValue::Flag(true))].into_iter().collect(),
        None
        ; "serial with the wrong type"
    )]
    fn serial(options: RunOptions, expected: Option<&str>) {
        assert_eq!(options.serial(), expected);
        let device_args = options.to_harness_args().device_args;
        match expected {
            Some(serial) => assert_eq!(device_args, vec!["--serial", serial]),
            None => assert!(device_args.is_empty(), "no device args: {device_args:?}"),
        }
    }

    #[test]
    fn harness_args_sorts_unsupported_keys() {
        let options: RunOptions = [
            ("ZZZ_OPTION", OptionValue::from("1")),
            (RunOptions::DRY_RUN, OptionValue::Flag(true)),
            ("ALL_ABI", OptionValue::Flag(true)),
            (RunOptions::CUSTOM_ARGS, OptionValue::from("not a list")),
        ]
        .into_iter()
        .collect();

        let args = options.to_harness_args();
        assert!(args.device_args.is_empty());
        assert!(args.custom_args.is_empty());
        assert_eq!(args.unsupported, vec!["ALL_ABI", "CUSTOM_ARGS", "ZZZ_OPTION"]);
        assert!(options.is_dry_run());
    }

    #[test]
    fn custom_args_are_verbatim() {
        let options = RunOptions::new()
            .with_serial("emulator-5554")
            .with_custom_args(["--module", "CtsGestureTestCases", "--retry-strategy=NONE"]);
        assert_eq!(
            options.to_harness_args(),
            HarnessArgs {
                device_args: vec!["--serial".to_owned(), "emulator-5554".to_owned()],
                custom_args: vec![
                    "--module".to_owned(),
                    "CtsGestureTestCases".to_owned(),
                    "--retry-strategy=NONE".to_owned(),
                ],
                unsupported: vec![],
            }
        );
    }

    #[test_case("SERIAL=LG123456789", "SERIAL", OptionValue::from("LG123456789") ; "serial")]
    #[test_case("SERIAL=", "SERIAL", OptionValue::from("") ; "empty serial")]
    #[test_case(
        "CUSTOM_ARGS=--module 'Cts Foo' --x=1",
        "CUSTOM_ARGS",
        OptionValue::List(vec!["--module".to_owned(), "Cts Foo".to_owned(), "--x=1".to_owned()])
        ; "custom args"
    )]
    #[test_case("DRY_RUN", "DRY_RUN", OptionValue::Flag(true) ; "bare dry run")]
    #[test_case("DRY_RUN=false", "DRY_RUN", OptionValue::Flag(false) ; "dry run false")]
    #[test_case("WAIT_FOR_DEBUGGER", "WAIT_FOR_DEBUGGER", OptionValue::Flag(true) ; "bare flag")]
    #[test_case("ABI=arm64-v8a", "ABI", OptionValue::from("arm64-v8a") ; "other")]
    #[test_case("KEY=a=b", "KEY", OptionValue::from("a=b") ; "value containing equals")]
    fn parse_option_valid(input: &str, key: &str, value: OptionValue) {
        assert_eq!(
            RunOptions::parse_option(input).expect("option is valid"),
            (key.to_owned(), value)
        );
    }

    #[test_case("=value", "has an empty key" ; "empty key")]
    #[test_case("CUSTOM_ARGS=--foo 'bar", "failed to split custom args" ; "unterminated quote")]
    #[test_case("DRY_RUN=yes", "expects `true` or `false`, found `yes`" ; "bad flag")]
    fn parse_option_invalid(input: &str, message: &str) {
        let err = RunOptions::parse_option(input).expect_err("option is invalid");
        assert!(
            err.to_string().contains(message),
            "error `{err}` contains `{message}`"
        );
    }
}
