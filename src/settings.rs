// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Process-wide rendering settings.
//!
//! Nothing here reads files or environment variables. Host programs that keep
//! their own configuration can embed [`Settings`] and call [`Settings::apply`].

use crate::format::ColorMode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

static COLOR_MODE: AtomicU8 = AtomicU8::new(ColorMode::Always as u8);
// 0 = unbounded
static MAX_LINE_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Current color mode (default: [`ColorMode::Always`])
pub fn color_mode() -> ColorMode {
    ColorMode::from_u8(COLOR_MODE.load(Ordering::Relaxed))
}

/// Select plain or colorized output for every handle
pub fn set_color_mode(mode: ColorMode) {
    COLOR_MODE.store(mode as u8, Ordering::Relaxed);
}

/// Current line bound in bytes, `None` when lines are unbounded
pub fn max_line_bytes() -> Option<usize> {
    match MAX_LINE_BYTES.load(Ordering::Relaxed) {
        0 => None,
        n => Some(n),
    }
}

/// Bound rendered lines to `limit` bytes (newline included); `None` removes the bound.
///
/// A bound of zero is treated as unbounded; a bound of one keeps only the newline.
pub fn set_max_line_bytes(limit: Option<usize>) {
    MAX_LINE_BYTES.store(limit.unwrap_or(0), Ordering::Relaxed);
}

/// Logging settings a host program can keep in its own config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Threshold of the default handle
    pub level: Severity,
    pub color: ColorMode,
    /// Optional bound on rendered line length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_line_bytes: Option<usize>,
    /// Default handle silenced by a raw threshold above FATAL; overrides `level`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub silent: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: Severity::Warn,
            color: ColorMode::Always,
            max_line_bytes: None,
            silent: false,
        }
    }
}

impl Settings {
    /// Install these settings process-wide
    pub fn apply(&self) {
        if self.silent {
            crate::default_logger().set_threshold_raw(u8::MAX);
        } else {
            crate::set_level(None, self.level);
        }
        set_color_mode(self.color);
        set_max_line_bytes(self.max_line_bytes);
    }

    /// Snapshot of what is currently installed.
    ///
    /// A default handle silenced with a raw threshold reads back as
    /// `silent: true` (with `level` FATAL), so applying the snapshot keeps it silent.
    pub fn current() -> Self {
        let threshold = crate::default_logger().threshold();
        Self {
            level: threshold.unwrap_or(Severity::Fatal),
            color: color_mode(),
            max_line_bytes: max_line_bytes(),
            silent: threshold.is_none(),
        }
    }
}
