//! This module provides observability and diagnostics for the compaction engine.
//!
//! Diagnostics go through the `log` facade. The `log_metric!` macro emits a
//! structured key-value line at `debug` level and is compiled out of release
//! builds by its `#[cfg(debug_assertions)]` guard. `enable_verbose_logging`
//! installs an `env_logger` backend for callers that do not bring their own.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Once;

/// Logs a structured key-value metric string at `debug` level, only in debug builds.
///
/// # Example
/// ```
/// use sift::log_metric;
/// let survivors = 4;
/// log_metric!("event"="apply_boolean_mask", "dtype"="Int32", "survivors"=&survivors);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!("SIFT_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs a process-wide `env_logger` at `Debug` level.
///
/// Only the first call has any effect. When `log_file` is given, records are
/// appended to that file instead of stderr; if the file cannot be opened the
/// logger falls back to stderr.
pub fn enable_verbose_logging(log_file: Option<&str>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            match OpenOptions::new().append(true).create(true).open(filename) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(err) => {
                    eprintln!("sift: could not open log file {}: {}", filename, err);
                }
            }
        }

        let _ = builder.try_init();
    });
}
