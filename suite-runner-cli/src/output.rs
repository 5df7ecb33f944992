// Copyright (c) The tradefed-suite Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Args, ValueEnum};
use owo_colors::{OwoColorize, Style, style};
use std::{
    fmt,
    io::{self, Write},
    sync::Once,
};
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    level_filters::LevelFilter,
    warn,
};
use tracing_subscriber::{
    Layer,
    filter::{ParseError, Targets},
    fmt::{FmtContext, FormatEvent, FormatFields, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// The environment variable holding log directives, e.g. `suite_runner=debug`.
pub(crate) const LOG_ENV: &str = "TRADEFED_SUITE_LOG";

#[derive(Copy, Clone, Debug, Args)]
#[must_use]
pub(crate) struct OutputOpts {
    /// Verbose output
    #[arg(long, short, global = true, env = "TRADEFED_SUITE_VERBOSE")]
    pub(crate) verbose: bool,

    /// Produce color output: auto, always, never
    #[arg(
        long,
        value_enum,
        default_value_t,
        hide_possible_values = true,
        global = true,
        value_name = "WHEN"
    )]
    pub(crate) color: Color,
}

impl OutputOpts {
    pub(crate) fn init(self) -> OutputContext {
        let OutputOpts { verbose, color } = self;
        let colorize = color.should_colorize(supports_color::Stream::Stderr);
        init_logger(verbose, colorize);
        OutputContext { verbose, colorize }
    }
}

/// Output settings for the current invocation.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct OutputContext {
    pub(crate) verbose: bool,
    /// Whether stderr is colorized.
    pub(crate) colorize: bool,
}

impl OutputContext {
    /// The style used to highlight paths and names in messages written to stderr.
    pub(crate) fn emphasis(&self) -> Style {
        if self.colorize { style().bold() } else { style() }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
#[must_use]
pub(crate) enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

impl Color {
    fn should_colorize(self, stream: supports_color::Stream) -> bool {
        match self {
            Color::Auto => supports_color::on_cached(stream).is_some(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

static INIT_LOGGER: Once = Once::new();

fn init_logger(verbose: bool, colorize: bool) {
    INIT_LOGGER.call_once(|| {
        let directives = std::env::var(LOG_ENV).unwrap_or_default();
        let (targets, parse_error) = log_targets(&directives, verbose);

        let layer = tracing_subscriber::fmt::layer()
            .event_format(LevelPrefixFormat { colorize })
            .with_writer(io::stderr)
            .with_filter(targets);
        tracing_subscriber::registry().with(layer).init();

        if let Some(err) = parse_error {
            warn!("ignoring invalid {LOG_ENV} `{directives}` ({err}), using the default level");
        }
    });
}

/// Parses log directives, falling back to the default level (DEBUG if verbose, INFO otherwise)
/// when they are empty or invalid.
fn log_targets(directives: &str, verbose: bool) -> (Targets, Option<ParseError>) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let default = Targets::new().with_default(default_level);
    if directives.is_empty() {
        return (default, None);
    }
    match directives.parse() {
        Ok(targets) => (targets, None),
        Err(err) => (default, Some(err)),
    }
}

/// Writes events as `<level>: <message>`.
struct LevelPrefixFormat {
    colorize: bool,
}

impl LevelPrefixFormat {
    fn prefix(&self, level: Level) -> (&'static str, Style) {
        let (name, colored) = match level {
            Level::ERROR => ("error", style().red().bold()),
            Level::WARN => ("warning", style().yellow().bold()),
            Level::INFO => ("info", style().bold()),
            Level::DEBUG => ("debug", style().bold()),
            Level::TRACE => ("trace", style().dimmed()),
        };
        (name, if self.colorize { colored } else { style() })
    }
}

impl<S, N> FormatEvent<S, N> for LevelPrefixFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let (name, level_style) = self.prefix(*event.metadata().level());
        write!(writer, "{}: ", name.style(level_style))?;

        let mut visitor = MessageVisitor {
            writer: &mut writer,
            result: Ok(()),
        };
        event.record(&mut visitor);
        visitor.result?;

        writeln!(writer)
    }
}

/// Writes only the `message` field; structured fields are not shown.
struct MessageVisitor<'writer, 'a> {
    writer: &'a mut format::Writer<'writer>,
    result: fmt::Result,
}

impl Visit for MessageVisitor<'_, '_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" && self.result.is_ok() {
            self.result = write!(self.writer, "{value:?}");
        }
    }
}

/// Where generated commands are written.
#[derive(Debug, Default)]
pub enum OutputWriter {
    /// Buffered stdout.
    #[default]
    Stdout,
    /// An in-memory buffer, for tests.
    #[cfg(test)]
    Buffer(Vec<u8>),
}

impl OutputWriter {
    pub(crate) fn stdout_writer(&mut self) -> Box<dyn Write + '_> {
        match self {
            Self::Stdout => Box::new(io::BufWriter::new(io::stdout())),
            #[cfg(test)]
            Self::Buffer(buf) => Box::new(buf),
        }
    }
}
