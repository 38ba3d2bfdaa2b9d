//! Colored terminal output for release operations
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    stderr: BufferWriter,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new() -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            stderr: BufferWriter::stderr(ColorChoice::Auto),
        }
    }

    fn marked(
        &self,
        writer: &BufferWriter,
        mark: &str,
        mark_spec: &ColorSpec,
        body_spec: Option<&mut ColorSpec>,
        message: &str,
    ) -> std::io::Result<()> {
        let mut buffer = writer.buffer();
        buffer.set_color(mark_spec)?;
        write!(&mut buffer, "{}", mark)?;
        buffer.reset()?;
        if let Some(spec) = body_spec {
            buffer.set_color(spec)?;
        }
        writeln!(&mut buffer, " {}", message)?;
        buffer.reset()?;
        writer.print(&buffer)
    }

    /// Print an info message
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            &self.stdout,
            "ℹ",
            ColorSpec::new().set_fg(Some(Color::Cyan)),
            None,
            message,
        )
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            &self.stdout,
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            None,
            message,
        )
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            &self.stdout,
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            Some(ColorSpec::new().set_fg(Some(Color::Yellow))),
            message,
        )
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            &self.stderr,
            "✗",
            ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true),
            Some(ColorSpec::new().set_fg(Some(Color::Red))),
            message,
        )
    }

    /// Print a verbose/debug message
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            &self.stdout,
            "→",
            ColorSpec::new().set_fg(Some(Color::Blue)),
            Some(ColorSpec::new().set_fg(Some(Color::White))),
            message,
        )
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.stdout.buffer();
        writeln!(&mut buffer, "    {}", message)?;
        self.stdout.print(&buffer)
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.stdout.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.stdout.print(&buffer)
    }
}
