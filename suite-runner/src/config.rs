// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for tradefed-suite.
//!
//! Configuration is layered: the built-in [default config](SuiteRunnerConfig::DEFAULT_CONFIG)
//! comes first, and a repository config file (by default
//! [`.config/tradefed-suite.toml`](SuiteRunnerConfig::CONFIG_PATH)) is merged on top of it.

use crate::{
    errors::{ConfigParseError, ConfigParseErrorKind},
    result_server::StaticResultServerArgs,
};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Overall configuration for tradefed-suite.
#[derive(Clone, Debug)]
pub struct SuiteRunnerConfig {
    inner: SuiteRunnerConfigImpl,
}

impl SuiteRunnerConfig {
    /// The default location of the config within a root directory.
    pub const CONFIG_PATH: &'static str = ".config/tradefed-suite.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the config from `config_file`, or if not specified from
    /// [`CONFIG_PATH`](Self::CONFIG_PATH) under `root`.
    ///
    /// An explicitly specified file must exist. If no file is specified and `root` has no config
    /// at the default location, the default config is used.
    pub fn from_sources(
        root: impl AsRef<Utf8Path>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let required = config_file.is_some();
        let config_file = config_file_path(root.as_ref(), config_file);
        let source = File::new(config_file.as_str(), FileFormat::Toml).required(required);

        let builder = Self::make_default_config().add_source(source);
        let (inner, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            let mut unknown_str = String::new();
            for ignored_key in &unknown {
                unknown_str.push_str("\n  - ");
                unknown_str.push_str(ignored_key);
            }
            warn!("ignoring unknown configuration keys in config file {config_file}:{unknown_str}");
        }

        Ok(Self { inner })
    }

    /// Returns the default configuration.
    pub fn default_config() -> Self {
        let (inner, unknown) = Self::build_and_deserialize_config(&Self::make_default_config())
            .expect("default config is always valid");
        debug_assert!(
            unknown.is_empty(),
            "default config has no unknown keys: {unknown:?}"
        );
        Self { inner }
    }

    /// Returns the configured result-server tokens.
    pub fn result_server_args(&self) -> &[String] {
        &self.inner.result_server.args
    }

    /// Returns a provider yielding the configured result-server tokens.
    pub fn result_server_provider(&self) -> StaticResultServerArgs {
        StaticResultServerArgs::new(self.inner.result_server.args.iter().cloned())
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(SuiteRunnerConfigImpl, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: SuiteRunnerConfigImpl = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| ConfigParseErrorKind::DeserializeError(Box::new(error)))?;

        Ok((config, ignored))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SuiteRunnerConfigImpl {
    #[serde(default)]
    result_server: ResultServerConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ResultServerConfig {
    #[serde(default)]
    args: Vec<String>,
}

/// Returns the path to the config file that [`SuiteRunnerConfig::from_sources`] would read.
pub fn config_file_path(root: &Utf8Path, config_file: Option<&Utf8Path>) -> Utf8PathBuf {
    match config_file {
        Some(file) => file.to_owned(),
        None => root.join(SuiteRunnerConfig::CONFIG_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{result_server::ResultServerArgsProvider, test_helpers::CapturedLogs};
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Utf8TempDir, contents: &str) -> Utf8PathBuf {
        let path = dir.path().join(SuiteRunnerConfig::CONFIG_PATH);
        std::fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("created .config dir");
        std::fs::write(&path, contents).expect("wrote config file");
        path
    }

    #[test]
    fn default_config_has_no_result_server_args() {
        let config = SuiteRunnerConfig::default_config();
        assert!(config.result_server_args().is_empty());
        assert!(config.result_server_provider().result_server_args().is_empty());
    }

    #[test]
    fn missing_default_file_uses_defaults() {
        let dir = Utf8TempDir::new().expect("created temp dir");
        let config = SuiteRunnerConfig::from_sources(dir.path(), None).expect("config is valid");
        assert!(config.result_server_args().is_empty());
    }

    #[test]
    fn repository_config_overrides_defaults() {
        let dir = Utf8TempDir::new().expect("created temp dir");
        write_config(
            &dir,
            indoc! {r#"
                [result-server]
                args = ["--result-server-url", "https://results.example", "--upload"]
            "#},
        );

        let config = SuiteRunnerConfig::from_sources(dir.path(), None).expect("config is valid");
        assert_eq!(
            config.result_server_provider().result_server_args(),
            vec!["--result-server-url", "https://results.example", "--upload"]
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = Utf8TempDir::new().expect("created temp dir");
        write_config(
            &dir,
            indoc! {r#"
                unknown-top-level = 1

                [result-server]
                args = ["--upload"]
                endpoint = "ignored"
            "#},
        );

        let (config, logs) =
            CapturedLogs::capture(|| SuiteRunnerConfig::from_sources(dir.path(), None));
        let config = config.expect("config is valid");
        assert_eq!(config.result_server_args(), ["--upload"]);

        assert!(logs.contains("WARN"), "logged at warn level: {logs}");
        assert!(
            logs.contains("ignoring unknown configuration keys in config file"),
            "unexpected logs: {logs}"
        );
        assert!(logs.contains("- unknown-top-level"), "unexpected logs: {logs}");
        assert!(logs.contains("endpoint"), "unexpected logs: {logs}");
    }

    #[test]
    fn explicit_config_file_is_required() {
        let dir = Utf8TempDir::new().expect("created temp dir");
        let missing = dir.path().join("missing.toml");

        let err = SuiteRunnerConfig::from_sources(dir.path(), Some(missing.as_path()))
            .expect_err("missing explicit config file is an error");
        assert_eq!(err.config_file(), missing.as_path());
        assert!(
            matches!(err.kind(), ConfigParseErrorKind::BuildError(_)),
            "unexpected error kind: {:?}",
            err.kind()
        );
    }

    #[test]
    fn invalid_types_are_rejected() {
        let dir = Utf8TempDir::new().expect("created temp dir");
        let path = write_config(
            &dir,
            indoc! {r#"
                [result-server]
                args = "--not-a-list"
            "#},
        );

        let err = SuiteRunnerConfig::from_sources(dir.path(), None)
            .expect_err("string args are rejected");
        assert_eq!(err.config_file(), path.as_path());
        assert!(
            matches!(err.kind(), ConfigParseErrorKind::DeserializeError(_)),
            "unexpected error kind: {:?}",
            err.kind()
        );
    }

    #[test]
    fn config_file_path_defaults_under_root() {
        let root = Utf8Path::new("/work/aosp");
        assert_eq!(
            config_file_path(root, None),
            "/work/aosp/.config/tradefed-suite.toml"
        );
        assert_eq!(
            config_file_path(root, Some(Utf8Path::new("/etc/suite.toml"))),
            "/etc/suite.toml"
        );
    }
}
