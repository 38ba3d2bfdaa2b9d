//! Adapter routing the `log` facade into a [`Logger`].

use super::{Level, Logger};
use std::sync::Arc;

/// `log::Log` implementation backed by a shared [`Logger`].
///
/// The record target becomes the message prefix.
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Arc<Logger>,
    max_level: log::LevelFilter,
}

impl LogBridge {
    /// Bridge admitting every `log` level
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            max_level: log::LevelFilter::Trace,
        }
    }

    /// Register as the global `log` backend
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.logger.log(
            Level::from(record.level()),
            record.target(),
            &record.args().to_string(),
        );
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_bridged_error_enters_history() {
        let logger = Arc::new(Logger::with_sinks(Vec::new()));
        let bridge = LogBridge::new(Arc::clone(&logger));

        bridge.log(
            &log::Record::builder()
                .level(log::Level::Error)
                .target("pack_release::process")
                .args(format_args!("spawn failed"))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .target("pack_release::process")
                .args(format_args!("detail"))
                .build(),
        );

        assert_eq!(
            logger.query_errors(),
            vec!["pack_release::process - spawn failed".to_string()]
        );
    }
}
