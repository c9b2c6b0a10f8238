//! Logging setup and helpers on top of the `log` facade.

use log::{debug, info, log_enabled, warn, Level, LevelFilter};

use crate::util::hex::format_hex_compact;

/// Longest frame prefix written by [`log_frame_hex`]
const MAX_LOG_BYTES: usize = 64;

/// Initializes the logger with the `env_logger` crate.
///
/// `RUST_LOG` wins over `default_level` when it is set.
pub fn init_logger(default_level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs frame bytes at debug level as `0b 01 00 ...`, cut at 64 bytes.
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    if !log_enabled!(Level::Debug) {
        return;
    }

    let shown = &data[..data.len().min(MAX_LOG_BYTES)];
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    debug!("{prefix}: {}{suffix}", format_hex_compact(shown));
}
