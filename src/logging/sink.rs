//! Log output destinations.

use super::record::{Level, LogRecord};
use crate::cli::OutputManager;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Which records a sink admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFilter {
    /// Regular records at or above the level
    AtLeast(Level),
    /// Regular records of exactly this level
    Only(Level),
    /// Uncaught exceptions only
    Exceptions,
}

impl SinkFilter {
    /// Whether a record passes this filter
    pub fn admits(&self, record: &LogRecord) -> bool {
        match self {
            SinkFilter::AtLeast(min) => !record.exception && record.level >= *min,
            SinkFilter::Only(level) => !record.exception && record.level == *level,
            SinkFilter::Exceptions => record.exception,
        }
    }
}

/// A logging output destination.
pub trait Sink: Send {
    /// Short name used when reporting write failures
    fn name(&self) -> &str;

    /// Whether this sink wants the record
    fn accepts(&self, record: &LogRecord) -> bool;

    /// Write one record
    fn write(&mut self, record: &LogRecord) -> io::Result<()>;

    /// Flush buffered output
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Colored terminal sink. Errors and exceptions go to stderr, everything else to stdout.
#[derive(Debug)]
pub struct ConsoleSink {
    output: OutputManager,
    min_level: Level,
    handle_exceptions: bool,
}

impl ConsoleSink {
    /// Console sink admitting `info` and above, plus uncaught exceptions
    pub fn new() -> Self {
        Self {
            output: OutputManager::new(),
            min_level: Level::Info,
            handle_exceptions: true,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn accepts(&self, record: &LogRecord) -> bool {
        if record.exception {
            self.handle_exceptions
        } else {
            record.level >= self.min_level
        }
    }

    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        if record.exception {
            return self.output.error(&format!("Uncaught exception: {}", record.message));
        }
        match record.level {
            Level::Error => self.output.error(&record.message),
            Level::Warning => self.output.warn(&record.message),
            Level::Info => self.output.info(&record.message),
            Level::Verbose => self.output.verbose(&record.message),
        }
    }
}

/// Append-only file sink writing one JSON object per line.
#[derive(Debug)]
pub struct FileSink {
    name: String,
    path: PathBuf,
    filter: SinkFilter,
    file: File,
}

impl FileSink {
    /// Open (or create) `dir/file_name` for appending
    pub fn open(dir: &Path, file_name: &str, filter: SinkFilter) -> io::Result<Self> {
        let path = dir.join(file_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            name: file_name.to_string(),
            path,
            filter,
            file,
        })
    }

    /// File this sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, record: &LogRecord) -> bool {
        self.filter.admits(record)
    }

    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        writeln!(self.file, "{}", record.to_json_line())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// The four file sinks bound to a log directory.
pub fn file_sinks(dir: &Path) -> io::Result<Vec<FileSink>> {
    Ok(vec![
        FileSink::open(dir, "error.log", SinkFilter::Only(Level::Error))?,
        FileSink::open(dir, "warn.log", SinkFilter::Only(Level::Warning))?,
        FileSink::open(dir, "all.log", SinkFilter::AtLeast(Level::Verbose))?,
        FileSink::open(dir, "exceptions.log", SinkFilter::Exceptions)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_filter_is_exact() {
        let filter = SinkFilter::Only(Level::Warning);
        assert!(filter.admits(&LogRecord::new(Level::Warning, "a", "b")));
        assert!(!filter.admits(&LogRecord::new(Level::Error, "a", "b")));
        assert!(!filter.admits(&LogRecord::new(Level::Info, "a", "b")));
    }

    #[test]
    fn test_exceptions_stay_out_of_level_sinks() {
        let exception = LogRecord::exception("boom");
        assert!(!SinkFilter::Only(Level::Error).admits(&exception));
        assert!(!SinkFilter::AtLeast(Level::Verbose).admits(&exception));
        assert!(SinkFilter::Exceptions.admits(&exception));
    }

    #[test]
    fn test_console_skips_verbose() {
        let console = ConsoleSink::new();
        assert!(!console.accepts(&LogRecord::new(Level::Verbose, "a", "b")));
        assert!(console.accepts(&LogRecord::new(Level::Info, "a", "b")));
        assert!(console.accepts(&LogRecord::exception("boom")));
    }

    #[test]
    fn test_file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink =
            FileSink::open(dir.path(), "all.log", SinkFilter::AtLeast(Level::Verbose)).unwrap();
        sink.write(&LogRecord::new(Level::Info, "Pack", "one")).unwrap();
        sink.write(&LogRecord::new(Level::Error, "Pack", "two")).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"message\":\"Pack - two\""));
    }
}
