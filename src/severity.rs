// SPDX-License-Identifier: Apache-2.0 OR MIT
// Severity levels for logging

use crate::error::LogError;
use serde::{Deserialize, Serialize};

/// Log severity levels (lower is more verbose)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Verbose traces, normally compiled in and gated off
    Debug = 0,
    /// Normal operation milestones
    Info = 1,
    /// Something looks wrong but work continues (default threshold)
    Warn = 2,
    /// An operation failed
    Error = 3,
    /// Unrecoverable; a FATAL line terminates the process
    Fatal = 4,
}

impl Severity {
    /// All levels, most verbose first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Get severity level as u8 (0-4)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get severity name as static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Create from u8 value (returns None if invalid)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Severity::Debug),
            1 => Some(Severity::Info),
            2 => Some(Severity::Warn),
            3 => Some(Severity::Error),
            4 => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// SGR color number used for the level tag
    pub const fn color_code(self) -> u8 {
        match self {
            Severity::Debug => 37,
            Severity::Info => 34,
            Severity::Warn => 33,
            Severity::Error | Severity::Fatal => 31,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LogError::UnknownSeverity(s.to_string()))
    }
}
