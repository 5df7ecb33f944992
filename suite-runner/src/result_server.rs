// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Providers of result-server arguments.
//!
//! A tradefed harness can be told where and how to report results through extra command-line
//! tokens. Which tokens to pass is decided outside of this crate, so runners query a
//! [`ResultServerArgsProvider`] for them on each call.

use std::fmt;

/// Supplies the tokens that tell a harness where to report results.
///
/// The returned tokens are opaque: they are spliced verbatim, in order, into every generated
/// command.
pub trait ResultServerArgsProvider: Send + Sync {
    /// Returns the result-server tokens. An empty list means no result server is configured.
    fn result_server_args(&self) -> Vec<String>;
}

impl<F> ResultServerArgsProvider for F
where
    F: Fn() -> Vec<String> + Send + Sync,
{
    fn result_server_args(&self) -> Vec<String> {
        self()
    }
}

/// A provider that never reports any result-server arguments.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoResultServerArgs;

impl ResultServerArgsProvider for NoResultServerArgs {
    fn result_server_args(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A provider that returns a fixed list of tokens, typically read from configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticResultServerArgs {
    args: Vec<String>,
}

impl StaticResultServerArgs {
    /// Creates a new provider returning `args`.
    pub fn new(args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the configured tokens.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl ResultServerArgsProvider for StaticResultServerArgs {
    fn result_server_args(&self) -> Vec<String> {
        self.args.clone()
    }
}

impl fmt::Display for StaticResultServerArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", self.args.join(" "))
        }
    }
}
