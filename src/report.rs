use colored::Colorize;

/// Log severity for cleanup outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// Secondary sink for cleanup messages, e.g. a console panel.
/// The primary tracing log always receives every message; a sink
/// additionally gets the formatted "LEVEL: message" line.
pub trait ReportSink {
    fn line(&mut self, severity: Severity, formatted: &str);
}

/// Emit one message to the tracing log and, if present, to the sink.
pub fn emit(sink: &mut Option<&mut dyn ReportSink>, severity: Severity, message: &str) {
    match severity {
        Severity::Debug => tracing::debug!("{message}"),
        Severity::Info => tracing::info!("{message}"),
        Severity::Warning => tracing::warn!("{message}"),
        Severity::Error => tracing::error!("{message}"),
        Severity::Critical => tracing::error!("{message}"),
    }
    if let Some(s) = sink.as_mut() {
        s.line(severity, &format!("{}: {}", severity.label(), message));
    }
}

/// Colored terminal sink.
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn line(&mut self, severity: Severity, formatted: &str) {
        match severity {
            Severity::Debug => println!("  {}", formatted.dimmed()),
            Severity::Info => println!("  {formatted}"),
            Severity::Warning => println!("  {}", formatted.yellow()),
            Severity::Error => println!("  {}", formatted.red()),
            Severity::Critical => println!("  {}", formatted.red().bold()),
        }
    }
}

/// Sink that buffers lines in memory. Used by tests and anywhere a
/// scrollback panel needs the raw text.
#[derive(Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl ReportSink for MemorySink {
    fn line(&mut self, _severity: Severity, formatted: &str) {
        self.lines.push(formatted.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_receives_formatted_level_prefix() {
        let mut mem = MemorySink::default();
        let mut sink: Option<&mut dyn ReportSink> = Some(&mut mem);
        emit(&mut sink, Severity::Warning, "low disk space");
        assert_eq!(mem.lines, vec!["WARNING: low disk space"]);
    }

    #[test]
    fn emit_without_sink_is_fine() {
        let mut sink: Option<&mut dyn ReportSink> = None;
        emit(&mut sink, Severity::Info, "no panel attached");
    }
}
