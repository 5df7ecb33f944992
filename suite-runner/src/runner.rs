// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The suite runner: turns test descriptors into harness invocations.

use crate::{
    command::RunCommand,
    descriptor::TestDescriptor,
    errors::CommandBuildError,
    options::RunOptions,
    result_server::{NoResultServerArgs, ResultServerArgsProvider},
};
use std::{collections::BTreeSet, fmt};
use tracing::{debug, info};

/// Runs whole test suites (`cts`, `gts`, ...) through their tradefed harness.
///
/// The runner is stateless apart from its [`ResultServerArgsProvider`], so a single instance can
/// be shared across threads and reused for any number of calls.
pub struct TestSuiteRunner {
    result_server: Box<dyn ResultServerArgsProvider>,
}

impl TestSuiteRunner {
    /// The runner name recorded on the [`TestDescriptor`]s this runner owns.
    pub const NAME: &'static str = "TestSuiteTestRunner";

    /// Creates a runner that queries `result_server` for result-server arguments.
    pub fn new(result_server: impl ResultServerArgsProvider + 'static) -> Self {
        Self {
            result_server: Box::new(result_server),
        }
    }

    /// Generates one command per distinct suite named by `descriptors`.
    ///
    /// Each command has the form `<suite>-tradefed run commandAndExit <suite> <args>`, where
    /// `<args>` is, in order:
    ///
    /// 1. the result-server arguments, queried once per call;
    /// 2. `--serial <serial>`, if `options` carries a non-empty serial;
    /// 3. the custom args from `options`, verbatim.
    ///
    /// Commands are ordered by suite name. Suites named by several descriptors are run once.
    ///
    /// Returns an error if any descriptor is malformed (see [`CommandBuildError`]); in that case
    /// no commands are returned.
    pub fn generate_run_commands<'a>(
        &self,
        descriptors: impl IntoIterator<Item = &'a TestDescriptor>,
        options: &RunOptions,
    ) -> Result<Vec<RunCommand>, CommandBuildError> {
        let mut suites = BTreeSet::new();
        for descriptor in descriptors {
            descriptor.validate(Self::NAME)?;
            suites.extend(descriptor.targets());
        }
        if suites.is_empty() {
            return Ok(Vec::new());
        }

        let harness_args = options.to_harness_args();
        if !harness_args.unsupported.is_empty() {
            info!(
                "{} does not support the following options: {}",
                Self::NAME,
                harness_args.unsupported.join(", "),
            );
        }

        let result_server_args = self.result_server.result_server_args();
        let extra_args: Vec<&str> = result_server_args
            .iter()
            .chain(&harness_args.device_args)
            .chain(&harness_args.custom_args)
            .map(String::as_str)
            .collect();

        let commands: Vec<_> = suites
            .into_iter()
            .map(|suite| RunCommand::new(suite, extra_args.iter().copied()))
            .collect();
        for command in &commands {
            debug!("generated run command: {command}");
        }

        Ok(commands)
    }
}

impl Default for TestSuiteRunner {
    fn default() -> Self {
        Self::new(NoResultServerArgs)
    }
}

impl fmt::Debug for TestSuiteRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSuiteRunner").finish_non_exhaustive()
    }
}
