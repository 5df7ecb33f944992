// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Documented exit codes for the `tradefed-suite` binary.

/// Documented exit codes for `tradefed-suite` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum SuiteRunnerExitCode {}

impl SuiteRunnerExitCode {
    /// No errors occurred and `tradefed-suite` exited normally.
    pub const OK: i32 = 0;

    /// The requested suites or options were rejected while generating commands.
    pub const INVALID_ARGUMENT: i32 = 96;

    /// A user issue happened while setting up an invocation, e.g. a bad config file.
    pub const SETUP_ERROR: i32 = 97;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
