use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    start: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!(
            "[{:9.3}s {:5}] {}",
            self.start.elapsed().as_secs_f64(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Installs a stderr logger stamped with the elapsed wall-clock time. Diagnostic
/// output never mixes with the graph stream, which is written to stdout.
pub fn build_stderr_logger_for_level(level: LevelFilter) {
    log::set_boxed_logger(Box::new(StderrLogger {
        start: Instant::now(),
    }))
    .expect("logger installed twice");
    log::set_max_level(level);
}

pub fn build_stderr_logger_for_verbosity(base: LevelFilter, verbose: bool) {
    build_stderr_logger_for_level(if verbose { LevelFilter::Debug } else { base });
}
