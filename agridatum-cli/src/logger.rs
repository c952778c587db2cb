//! Logging Infrastructure
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "agridatum=info";

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level`. When `log_dir` names an existing
/// directory, output goes to a daily rolling file there instead.
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or(DEFAULT_FILTER)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "agridatum");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
    }

    subscriber.with_writer(std::io::stderr).init();
}
