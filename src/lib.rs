// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Leveled, timestamped, source-located log lines on stderr.
//!
//! Each [`Logger`] handle carries a short module label and its own severity
//! threshold. A process-wide default handle (empty label, threshold WARN)
//! serves every call that names no handle.
//!
//! ```
//! use foxlog::{log_info, log_warn, Severity};
//!
//! let net = foxlog::create(Some("net")).expect("logger");
//! foxlog::set_level(Some(&net), Severity::Info);
//!
//! log_info!(logger: &net, "listening on port {}", 8080);
//! log_warn!("no handle given, this goes through the default logger");
//!
//! foxlog::destroy(Some(net));
//! ```
//!
//! A line looks like this (colors omitted):
//!
//! ```text
//! [INFO]\t2025-08-14 16:00:00 main.rs:7 main() net listening on port 8080
//! ```
//!
//! `log_fatal!` terminates the process after writing its line.

pub mod error;
pub mod format;
mod logger;
#[macro_use]
mod macros;
pub mod settings;
mod severity;

pub use error::LogError;
pub use format::{CallSite, ColorMode};
pub use logger::{
    default_logger, resolve, Emitted, Logger, DEFAULT_THRESHOLD, FATAL_EXIT_CODE,
    MODULE_LABEL_CAPACITY,
};
pub use settings::{set_color_mode, set_max_line_bytes, Settings};
pub use severity::Severity;

/// Create a handle with an optional module label.
///
/// On allocation failure a diagnostic goes to stderr and the error is returned.
pub fn create(module_name: Option<&str>) -> Result<Logger, LogError> {
    Logger::new(module_name)
}

/// Release a handle; `None` is a no-op.
///
/// Other clones of the same handle stay valid.
pub fn destroy(handle: Option<Logger>) {
    drop(handle);
}

/// Set the threshold of `handle`, or of the default handle when `None`
pub fn set_level(handle: Option<&Logger>, level: Severity) {
    resolve(handle).set_threshold(level);
}
