// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test descriptors: the logical tests handed to a runner by suite discovery.

use crate::{errors::CommandBuildError, runner::TestSuiteRunner};
use std::collections::BTreeSet;

/// Identifies a logical test to run.
///
/// For [`TestSuiteRunner`], a descriptor names a whole suite (for example `cts`), and its targets
/// are the suites the harness should execute, normally just `{suite_name}`.
///
/// Descriptors are ordered by all of their fields, so a `BTreeSet<TestDescriptor>` iterates in the
/// same order on every run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestDescriptor {
    suite_name: String,
    runner_name: String,
    targets: BTreeSet<String>,
}

impl TestDescriptor {
    /// Creates a new descriptor.
    ///
    /// No validation happens here; [`TestSuiteRunner`] validates descriptors when generating
    /// commands.
    pub fn new(
        suite_name: impl Into<String>,
        runner_name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            suite_name: suite_name.into(),
            runner_name: runner_name.into(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the canonical descriptor for a suite run by [`TestSuiteRunner`]: the runner name is
    /// [`TestSuiteRunner::NAME`] and the only target is the suite itself.
    pub fn for_suite(suite_name: impl Into<String>) -> Self {
        let suite_name = suite_name.into();
        Self {
            targets: BTreeSet::from([suite_name.clone()]),
            runner_name: TestSuiteRunner::NAME.to_owned(),
            suite_name,
        }
    }

    /// Returns the suite name.
    #[inline]
    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// Returns the name of the runner that owns this descriptor.
    #[inline]
    pub fn runner_name(&self) -> &str {
        &self.runner_name
    }

    /// Returns the suites to execute, in sorted order.
    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.targets.iter().map(String::as_str)
    }

    /// Checks the invariants [`TestSuiteRunner`] relies on.
    pub(crate) fn validate(&self, expected_runner: &'static str) -> Result<(), CommandBuildError> {
        if self.suite_name.is_empty() {
            return Err(CommandBuildError::EmptySuiteName {
                runner_name: self.runner_name.clone(),
            });
        }
        if self.runner_name != expected_runner {
            return Err(CommandBuildError::ForeignRunner {
                test_name: self.suite_name.clone(),
                runner_name: self.runner_name.clone(),
                expected: expected_runner,
            });
        }
        if self.targets.is_empty() {
            return Err(CommandBuildError::EmptyTargets {
                test_name: self.suite_name.clone(),
            });
        }
        if self.targets.iter().any(String::is_empty) {
            return Err(CommandBuildError::EmptySuiteName {
                runner_name: self.runner_name.clone(),
            });
        }
        Ok(())
    }
}
