//! Output formatting and writing utilities
//!
//! This module provides utilities for writing results in human-readable
//! or JSON form. Human output goes through small formatting helpers; the
//! JSON forms serialize the handler report structs directly.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer targeting stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer (used by tests)
    #[cfg(test)]
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color: false,
            quiet: false,
            writer,
        }
    }

    /// Write a serializable report in the selected format.
    ///
    /// In human mode the caller's pre-rendered lines are used; the value
    /// is what the JSON modes serialize.
    pub fn report<T: Serialize>(&mut self, value: &T, human_lines: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                writeln!(self.writer, "{}", serde_json::to_string(value)?)?;
            }
            OutputFormat::JsonPretty => {
                writeln!(self.writer, "{}", serde_json::to_string_pretty(value)?)?;
            }
            OutputFormat::Human => {
                for line in human_lines {
                    writeln!(self.writer, "{}", line)?;
                }
            }
        }
        Ok(())
    }

    /// Write an advisory note (human mode only, suppressed by --quiet)
    pub fn note(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        let rendered = if self.use_color {
            format!("{} {}", "note:".yellow().bold(), message)
        } else {
            format!("note: {}", message)
        };
        writeln!(self.writer, "{}", rendered)?;
        Ok(())
    }

    /// Render a label/value pair for human output
    pub fn field(&self, label: &str, value: impl std::fmt::Display) -> String {
        if self.use_color {
            format!("{:>12}  {}", label.cyan(), value)
        } else {
            format!("{:>12}  {}", label, value)
        }
    }

    /// Render a pass/fail marker for human output
    pub fn verdict(&self, ok: bool) -> String {
        match (ok, self.use_color) {
            (true, true) => "ok".green().to_string(),
            (true, false) => "ok".to_string(),
            (false, true) => "FAIL".red().bold().to_string(),
            (false, false) => "FAIL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Serialize)]
    struct Sample {
        version: String,
        ordinal: u64,
    }

    #[test]
    fn test_json_report_serializes_the_value() {
        let buf = SharedBuf::default();
        let mut writer = OutputWriter::with_writer(OutputFormat::Json, Box::new(buf.clone()));
        let sample = Sample {
            version: "1.2.3".to_string(),
            ordinal: 42,
        };
        writer.report(&sample, &["ignored".to_string()]).unwrap();
        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written.trim(), r#"{"version":"1.2.3","ordinal":42}"#);
    }

    #[test]
    fn test_human_report_uses_the_lines() {
        let buf = SharedBuf::default();
        let mut writer = OutputWriter::with_writer(OutputFormat::Human, Box::new(buf.clone()));
        let sample = Sample {
            version: "1.2.3".to_string(),
            ordinal: 42,
        };
        writer
            .report(&sample, &["line one".to_string(), "line two".to_string()])
            .unwrap();
        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "line one\nline two\n");
    }
}
