// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generated harness invocations.

use std::fmt;

/// Naming conventions for the per-suite tradefed harness.
///
/// These strings are part of the command-line contract with the harness and must not change.
pub enum SuiteExecutable {}

impl SuiteExecutable {
    /// The executable name template. `{suite}` is replaced with the suite name.
    pub const TEMPLATE: &'static str = "{suite}-tradefed";

    /// The subcommand tokens passed before the suite name.
    pub const RUN_VERB: [&'static str; 2] = ["run", "commandAndExit"];

    /// Returns the harness executable for a suite, e.g. `cts-tradefed` for `cts`.
    pub fn for_suite(suite: &str) -> String {
        Self::TEMPLATE.replace("{suite}", suite)
    }
}

/// A fully formed invocation of a suite harness.
///
/// The [`Display`](fmt::Display) implementation renders the command text handed to a launcher:
/// `<suite>-tradefed run commandAndExit <suite> <args>`, with tokens joined by single spaces and no
/// trailing whitespace. Tokens are not quoted; use [`to_shell_string`](Self::to_shell_string) for a
/// string that is safe to pass through a POSIX shell.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunCommand {
    suite: String,
    program: String,
    args: Vec<String>,
}

impl RunCommand {
    /// Builds the command for `suite`, followed by `extra_args` in order.
    pub fn new<'a>(suite: &str, extra_args: impl IntoIterator<Item = &'a str>) -> Self {
        let mut args: Vec<String> = SuiteExecutable::RUN_VERB
            .iter()
            .map(|&s| s.to_owned())
            .collect();
        args.push(suite.to_owned());
        args.extend(extra_args.into_iter().map(str::to_owned));

        Self {
            suite: suite.to_owned(),
            program: SuiteExecutable::for_suite(suite),
            args,
        }
    }

    /// Returns the suite this command runs.
    #[inline]
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Returns the harness executable, e.g. `cts-tradefed`.
    ///
    /// This is a bare name, expected to be found in `PATH`.
    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments passed to [`program`](Self::program).
    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the program followed by its arguments.
    pub fn argv(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// Returns the command with each token quoted for a POSIX shell where necessary.
    pub fn to_shell_string(&self) -> String {
        shell_words::join(self.argv())
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
