// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino_tempfile::Utf8TempDir;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use suite_runner::{
    config::SuiteRunnerConfig,
    descriptor::TestDescriptor,
    errors::{CommandBuildError, ErrorKind},
    options::RunOptions,
    result_server::NoResultServerArgs,
    runner::TestSuiteRunner,
};

fn cts_descriptors() -> BTreeSet<TestDescriptor> {
    let mut descriptors = BTreeSet::new();
    descriptors.insert(TestDescriptor::new(
        "cts",
        TestSuiteRunner::NAME,
        BTreeSet::from(["cts"]),
    ));
    descriptors
}

#[test]
fn test_generate_run_commands() {
    let runner = TestSuiteRunner::new(NoResultServerArgs);
    let descriptors = cts_descriptors();

    // Basic run command.
    let commands: Vec<String> = runner
        .generate_run_commands(&descriptors, &RunOptions::new())
        .expect("valid descriptors")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(commands, vec!["cts-tradefed run commandAndExit cts"]);

    // Run command with --serial LG123456789.
    let options: RunOptions = [(RunOptions::SERIAL, "LG123456789")].into_iter().collect();
    let commands: Vec<String> = runner
        .generate_run_commands(&descriptors, &options)
        .expect("valid descriptors")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        commands,
        vec!["cts-tradefed run commandAndExit cts --serial LG123456789"]
    );
}

#[test]
fn test_generate_run_commands_from_config() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    let config_file = dir.path().join("suite.toml");
    std::fs::write(
        &config_file,
        "[result-server]\nargs = [\"--result-arg\", \"X\"]\n",
    )
    .expect("wrote config file");

    let config = SuiteRunnerConfig::from_sources(dir.path(), Some(config_file.as_path()))
        .expect("valid config");
    let runner = TestSuiteRunner::new(config.result_server_provider());

    let options = RunOptions::new().with_serial("LG123456789");
    let commands = runner
        .generate_run_commands(&cts_descriptors(), &options)
        .expect("valid descriptors");
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].to_string(),
        "cts-tradefed run commandAndExit cts --result-arg X --serial LG123456789"
    );
    assert_eq!(commands[0].program(), "cts-tradefed");
}

#[test]
fn test_generate_run_commands_rejects_empty_targets() {
    let runner = TestSuiteRunner::default();
    let descriptors = [TestDescriptor::new(
        "cts",
        TestSuiteRunner::NAME,
        Vec::<&str>::new(),
    )];

    let err = runner
        .generate_run_commands(&descriptors, &RunOptions::new())
        .expect_err("empty targets are a precondition violation");
    assert!(matches!(err, CommandBuildError::EmptyTargets { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
