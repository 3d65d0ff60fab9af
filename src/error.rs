// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by logger construction and settings parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("unknown severity: {0:?} (expected debug, info, warn, error or fatal)")]
    UnknownSeverity(String),

    #[error("unknown color mode: {0:?} (expected always, never or auto)")]
    UnknownColorMode(String),
}
