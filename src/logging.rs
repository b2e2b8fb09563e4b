// src/logging.rs

use crate::errors::{DeskchatError, DeskchatResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::PathBuf;

/// Starts the file logger. Nothing is written to stdout or stderr
/// while the TUI owns the terminal.
pub fn init_logging(level: &str) -> DeskchatResult<LoggerHandle> {
    Logger::try_with_str(level)
        .map_err(|e| DeskchatError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(
            FileSpec::default()
                .directory(log_directory())
                .basename("deskchat")
                .suppress_timestamp(),
        )
        .start()
        .map_err(|e| DeskchatError::config_error(format!("failed to start logger: {}", e)))
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("deskchat"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Logs one completed HTTP round trip.
pub fn log_api_call(entry: &ApiCallLog) {
    log::info!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.request_summary,
        entry.response_status,
        entry.response_time_ms
    );
}
