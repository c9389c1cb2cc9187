//! Leveled logger capability used by the HTTP transport.
//!
//! The transport reports its events through [`LeveledLogger`] so callers can
//! route them wherever they like. [`TracingLogger`] is the default adapter.

use std::fmt::{Display, Write as _};

/// Structured key/value pairs attached to a log message.
pub type LogFields<'a> = &'a [(&'a str, &'a dyn Display)];

/// A sink for leveled log messages with structured fields.
pub trait LeveledLogger: Send + Sync {
    /// Verbose diagnostics.
    fn debug(&self, message: &str, fields: LogFields<'_>);
    /// Routine events.
    fn info(&self, message: &str, fields: LogFields<'_>);
    /// Something unexpected that the caller may want to know about.
    fn warn(&self, message: &str, fields: LogFields<'_>);
    /// A failed operation.
    fn error(&self, message: &str, fields: LogFields<'_>);
}

/// Default logger: drops debug messages and forwards the rest to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl LeveledLogger for TracingLogger {
    fn debug(&self, _message: &str, _fields: LogFields<'_>) {}

    fn info(&self, message: &str, fields: LogFields<'_>) {
        tracing::info!(target: "tracker_client", "{}", format_line(message, fields));
    }

    fn warn(&self, message: &str, fields: LogFields<'_>) {
        tracing::warn!(target: "tracker_client", "{}", format_line(message, fields));
    }

    fn error(&self, message: &str, fields: LogFields<'_>) {
        tracing::error!(target: "tracker_client", "{}", format_line(message, fields));
    }
}

/// Render `message key=value key=value`.
pub fn format_line(message: &str, fields: LogFields<'_>) -> String {
    let mut line = message.to_string();
    for (key, value) in fields {
        let _ = write!(line, " {key}={value}");
    }
    line
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_format_line_without_fields() {
        assert_eq!(format_line("request sent", &[]), "request sent");
    }

    #[test]
    fn test_format_line_renders_fields_after_message() {
        let status = 503_u16;
        let line = format_line(
            "unexpected status",
            &[("status", &status), ("url", &"http://t/x")],
        );
        assert_eq!(line, "unexpected status status=503 url=http://t/x");
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        output.contents()
    }

    #[test]
    fn test_tracing_logger_drops_debug() {
        let attempt = 1;
        let output = capture(|| {
            TracingLogger.debug("performing request", &[("attempt", &attempt)]);
        });
        assert!(output.is_empty(), "unexpected output: {output}");
    }

    #[test]
    fn test_tracing_logger_forwards_other_levels() {
        let status = 503_u16;
        let output = capture(|| {
            TracingLogger.info("unexpected status", &[("status", &status)]);
            TracingLogger.warn("request cancelled", &[("url", &"http://t/x")]);
            TracingLogger.error("request failed", &[]);
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3, "output: {output}");
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("tracker_client"));
        assert!(lines[0].contains("unexpected status status=503"));
        assert!(lines[1].contains("WARN"));
        assert!(lines[1].contains("request cancelled url=http://t/x"));
        assert!(lines[2].contains("ERROR"));
        assert!(lines[2].ends_with("request failed"));
    }
}
