//! Structured logging with level routing and error history.
//!
//! A [`Logger`] is constructed once by the entry point and shared as an
//! `Arc<Logger>`. It always writes to the console; after
//! [`Logger::configure_file_sinks`] it also writes `error.log`, `warn.log`,
//! `all.log` and `exceptions.log` into the configured directory. Every
//! error-level message is appended to an in-memory history that
//! [`Logger::query_errors`] returns.
//!
//! Sink failures never propagate to callers. They are collected and can be
//! inspected with [`Logger::sink_failures`].

mod bridge;
mod error;
mod record;
mod sink;

pub use bridge::LogBridge;
pub use error::LogError;
pub use record::{Level, LogRecord, format_message};
pub use sink::{ConsoleSink, FileSink, Sink, SinkFilter, file_sinks};

use std::cell::Cell;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

thread_local! {
    // Address of the logger state this thread currently holds, 0 when none.
    static HELD_STATE: Cell<usize> = const { Cell::new(0) };
}

#[derive(Default)]
struct LoggerState {
    sinks: Vec<Box<dyn Sink>>,
    errors: Vec<String>,
    log_dirs: Vec<PathBuf>,
    failures: Vec<LogError>,
}

/// Process-wide logger instance
pub struct Logger {
    state: Mutex<LoggerState>,
}

/// Lock guard that marks the state as held by the current thread until dropped
struct StateGuard<'a> {
    guard: MutexGuard<'a, LoggerState>,
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        HELD_STATE.with(|held| held.set(0));
    }
}

impl Deref for StateGuard<'_> {
    type Target = LoggerState;

    fn deref(&self) -> &LoggerState {
        &self.guard
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut LoggerState {
        &mut self.guard
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field(
                "sinks",
                &state.sinks.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            )
            .field("errors", &state.errors.len())
            .field("log_dirs", &state.log_dirs)
            .finish()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger with the console sink only
    pub fn new() -> Self {
        Self::with_sinks(vec![Box::new(ConsoleSink::new())])
    }

    /// Logger with an explicit initial sink set
    pub fn with_sinks(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                sinks,
                ..LoggerState::default()
            }),
        }
    }

    fn state_addr(&self) -> usize {
        &self.state as *const Mutex<LoggerState> as usize
    }

    /// True while the current thread is inside a locked section of this logger
    fn held_by_current_thread(&self) -> bool {
        HELD_STATE.with(|held| held.get() == self.state_addr())
    }

    // A poisoned lock still holds usable state; logging keeps going.
    fn lock(&self) -> StateGuard<'_> {
        let guard = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        HELD_STATE.with(|held| held.set(self.state_addr()));
        StateGuard { guard }
    }

    /// Add file sinks for `dir`, creating the directory if needed.
    ///
    /// Each directory is registered at most once: a repeat call for the same
    /// directory returns `Ok(false)` and changes nothing.
    pub fn configure_file_sinks(&self, dir: &Path) -> Result<bool, LogError> {
        let mut state = self.lock();
        if state.log_dirs.iter().any(|d| d == dir) {
            return Ok(false);
        }

        let setup_error = |e: std::io::Error| LogError::SinkSetup {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        };
        std::fs::create_dir_all(dir).map_err(setup_error)?;
        let sinks = file_sinks(dir).map_err(setup_error)?;

        state
            .sinks
            .extend(sinks.into_iter().map(|s| Box::new(s) as Box<dyn Sink>));
        state.log_dirs.push(dir.to_path_buf());
        Ok(true)
    }

    /// Directories file sinks have been configured for
    pub fn log_dirs(&self) -> Vec<PathBuf> {
        self.lock().log_dirs.clone()
    }

    /// Log at an explicit level
    pub fn log(&self, level: Level, prefix: &str, message: &str) {
        let record = LogRecord::new(level, prefix, message);
        let mut state = self.lock();
        if level == Level::Error {
            state.errors.push(record.message.clone());
        }
        dispatch(&mut state, &record);
    }

    /// Log at verbose level
    pub fn verbose(&self, prefix: &str, message: &str) {
        self.log(Level::Verbose, prefix, message);
    }

    /// Log at info level
    pub fn info(&self, prefix: &str, message: &str) {
        self.log(Level::Info, prefix, message);
    }

    /// Log at warning level
    pub fn warn(&self, prefix: &str, message: &str) {
        self.log(Level::Warning, prefix, message);
    }

    /// Log at error level and record the message in the error history
    pub fn error(&self, prefix: &str, message: &str) {
        self.log(Level::Error, prefix, message);
    }

    /// Persist an uncaught exception to the exception-handling sinks and flush them.
    ///
    /// A panic raised on a thread that already holds the logger (for example
    /// inside a sink) goes to stderr instead. Other threads wait for the lock.
    pub fn log_exception(&self, message: &str) {
        let record = LogRecord::exception(message);
        if self.held_by_current_thread() {
            eprintln!("Uncaught exception: {}", record.message);
            return;
        }
        let mut state = self.lock();
        dispatch(&mut state, &record);
        flush_sinks(&mut state);
    }

    /// Snapshot of every error-level message logged so far, in order
    pub fn query_errors(&self) -> Vec<String> {
        self.lock().errors.clone()
    }

    /// Snapshot of sink failures swallowed so far
    pub fn sink_failures(&self) -> Vec<LogError> {
        self.lock().failures.clone()
    }

    /// Flush every sink
    pub fn flush(&self) {
        flush_sinks(&mut self.lock());
    }

    /// Route panics through [`Logger::log_exception`], then to the previous hook
    pub fn install_panic_hook(logger: Arc<Logger>) {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            logger.log_exception(&info.to_string());
            previous(info);
        }));
    }
}

fn flush_sinks(state: &mut LoggerState) {
    let LoggerState { sinks, failures, .. } = state;
    for sink in sinks.iter_mut() {
        if let Err(e) = sink.flush() {
            failures.push(LogError::SinkWriteFailure {
                sink: sink.name().to_string(),
                reason: e.to_string(),
            });
        }
    }
}

fn dispatch(state: &mut LoggerState, record: &LogRecord) {
    let LoggerState { sinks, failures, .. } = state;
    for sink in sinks.iter_mut().filter(|s| s.accepts(record)) {
        if let Err(e) = sink.write(record) {
            failures.push(LogError::SinkWriteFailure {
                sink: sink.name().to_string(),
                reason: e.to_string(),
            });
        }
    }
}
