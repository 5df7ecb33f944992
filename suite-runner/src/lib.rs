// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `tradefed-suite`: turning a set of test descriptors into the command
//! lines that run whole test suites (such as `cts`) through their tradefed harness.
//!
//! The flow is:
//!
//! 1. A discovery step (outside this crate) produces [`TestDescriptor`](descriptor::TestDescriptor)s.
//! 2. The caller assembles [`RunOptions`](options::RunOptions) for the invocation.
//! 3. [`TestSuiteRunner::generate_run_commands`](runner::TestSuiteRunner::generate_run_commands)
//!    produces one [`RunCommand`](command::RunCommand) per distinct suite.
//!
//! Nothing here spawns processes: the generated commands are handed to whatever launches them.

pub mod command;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod exit_codes;
pub mod options;
pub mod result_server;
pub mod runner;
#[cfg(test)]
mod test_helpers;
