#[cfg(test)]
mod tests {
    use pack_release::logging::{LogRecord, Logger, Sink};
    use std::io;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Panics when asked to write a record mentioning "explode".
    struct ExplodingSink;

    impl Sink for ExplodingSink {
        fn name(&self) -> &str {
            "exploding"
        }

        fn accepts(&self, record: &LogRecord) -> bool {
            !record.exception
        }

        fn write(&mut self, record: &LogRecord) -> io::Result<()> {
            if record.message.contains("explode") {
                panic!("sink exploded");
            }
            Ok(())
        }
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap_or_default()
    }

    /// Runs `f` on its own thread and reports whether it finished within the limit.
    fn finishes_within<F>(limit: Duration, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
            let _ = tx.send(());
        });
        rx.recv_timeout(limit).is_ok()
    }

    // One test function: the hook is process-wide, so the scenarios run in sequence.
    #[test]
    fn test_panic_hook_persists_panics_and_survives_sink_panics() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(Logger::with_sinks(vec![Box::new(ExplodingSink)]));
        logger.configure_file_sinks(dir.path()).unwrap();
        Logger::install_panic_hook(Arc::clone(&logger));

        // A panic on a worker thread lands in exceptions.log only.
        let worker = std::thread::spawn(|| panic!("worker failed: disk full"));
        assert!(worker.join().is_err());

        let exceptions = read(&dir.path().join("exceptions.log"));
        assert_eq!(
            exceptions
                .lines()
                .filter(|l| l.contains("worker failed: disk full"))
                .count(),
            1
        );
        assert!(!read(&dir.path().join("all.log")).contains("worker failed"));
        assert!(logger.query_errors().iter().all(|e| !e.contains("worker failed")));

        // A sink panicking mid-write must not wedge the logger.
        let inner = Arc::clone(&logger);
        assert!(finishes_within(Duration::from_secs(10), move || {
            inner.info("Sink", "explode");
        }));

        let after = Arc::clone(&logger);
        assert!(finishes_within(Duration::from_secs(10), move || {
            after.error("After", "still logging");
            after.flush();
        }));
        assert!(read(&dir.path().join("error.log")).contains("After - still logging"));
        assert_eq!(logger.query_errors(), vec!["After - still logging".to_string()]);

        // Later panics from other threads still reach exceptions.log.
        let late = std::thread::spawn(|| panic!("late failure"));
        assert!(late.join().is_err());
        assert!(read(&dir.path().join("exceptions.log")).contains("late failure"));
    }
}
