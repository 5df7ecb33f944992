// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end for `tradefed-suite`.
//!
//! `tradefed-suite generate cts --serial <SERIAL>` prints the command that runs the CTS suite on
//! the given device. Commands are never executed by this tool.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::ExpectedError;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
