use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Console verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Unknown or absent values fall back to `info`.
    pub fn from_arg(arg: Option<&str>) -> Self {
        arg.and_then(Self::from_str_lenient).unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Event formatter printing `[LEVEL] message`.
pub struct BracketedLevel;

impl<S, N> FormatEvent<S, N> for BracketedLevel
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}] ", level_tag(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_tag(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Build a `[LEVEL] message` subscriber filtered at `level`.
pub fn subscriber<W>(level: LogLevel, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(level.to_string()))
        .event_format(BracketedLevel)
        .finish()
}

/// Install the stdout subscriber at `level`.
pub fn init(level: LogLevel) {
    if let Err(e) = tracing::subscriber::set_global_default(subscriber(level, std::io::stdout)) {
        eprintln!("logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(level: LogLevel, f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        tracing::subscriber::with_default(subscriber(level, buffer.clone()), f);
        buffer.contents()
    }

    #[test]
    fn events_are_prefixed_with_bracketed_level() {
        let out = capture(LogLevel::Debug, || {
            tracing::error!("boom");
            tracing::warn!("careful");
            tracing::info!("Converted configuration content...\n{{}}");
            tracing::debug!("detail");
        });
        assert_eq!(
            out,
            "[ERROR] boom\n[WARN] careful\n[INFO] Converted configuration content...\n{}\n[DEBUG] detail\n"
        );
    }

    #[test]
    fn level_filters_lower_events() {
        let out = capture(LogLevel::Info, || {
            tracing::info!("shown");
            tracing::debug!("hidden");
        });
        assert_eq!(out, "[INFO] shown\n");

        let out = capture(LogLevel::Error, || {
            tracing::warn!("hidden");
            tracing::error!("shown");
        });
        assert_eq!(out, "[ERROR] shown\n");
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(LogLevel::from_str_lenient("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str_lenient("Warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_lenient("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_str_lenient("trace"), None);
    }

    #[test]
    fn unknown_or_missing_defaults_to_info() {
        assert_eq!(LogLevel::from_arg(None), LogLevel::Info);
        assert_eq!(LogLevel::from_arg(Some("verbose")), LogLevel::Info);
        assert_eq!(LogLevel::from_arg(Some("debug")), LogLevel::Debug);
    }

    #[test]
    fn display_is_a_valid_filter() {
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert!(EnvFilter::try_new(level.to_string()).is_ok());
        }
    }

    #[test]
    fn tags() {
        assert_eq!(level_tag(&Level::WARN), "WARN");
        assert_eq!(level_tag(&Level::DEBUG), "DEBUG");
    }
}
