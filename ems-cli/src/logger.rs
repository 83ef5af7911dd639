//! Logging Infrastructure
//!
//! Diagnostics go to stderr (or a daily rolling file) so stdout stays
//! reserved for what the user asked to see.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "ems=warn,ems_client=warn";

/// Initialize the logger with optional level override and file output
///
/// `RUST_LOG` wins over `log_level`; `log_level` is applied to this
/// binary and the client library only.
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::new(format!("ems={level},ems_client={level}")),
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "ems.log");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("log directory {dir} does not exist, logging to stderr");
    }

    subscriber.with_writer(std::io::stderr).init();
}
