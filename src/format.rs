// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Line rendering: timestamp, source location, module tag, color, message.
//!
//! Layout of one rendered line (plain mode):
//!
//! ```text
//! [ERROR]\t2025-08-14 16:00:00 conn.rs:42 accept() net peer reset
//! ```
//!
//! In colored mode every structural field is wrapped in its own SGR sequence
//! and followed by a reset, so stripping the escapes yields the plain line.

use crate::error::LogError;
use crate::severity::Severity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::io::IsTerminal;

/// Timestamp pattern, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RESET: &str = "\x1b[0m";
const TIME_STYLE: &str = "32";
const LOCATION_STYLE: &str = "35";
const FUNCTION_STYLE: &str = "36";
const MODULE_STYLE: &str = "1;34";

/// Whether rendered lines carry ANSI color escapes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Always colorize
    #[default]
    Always = 0,
    /// Never colorize
    Never = 1,
    /// Colorize only when stderr is a terminal
    Auto = 2,
}

impl ColorMode {
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => ColorMode::Never,
            2 => ColorMode::Auto,
            _ => ColorMode::Always,
        }
    }

    /// Resolve the mode against the actual output stream
    pub fn use_color(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stderr().is_terminal(),
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            _ => Err(LogError::UnknownColorMode(s.to_string())),
        }
    }
}

/// Source location captured by the logging macros
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// File name without its directory part
    pub fn short_file(&self) -> &'static str {
        short_file_name(self.file)
    }
}

/// Everything needed to render one line
pub struct Record<'a> {
    pub level: Severity,
    pub call_site: &'a CallSite,
    pub module: &'a str,
    pub timestamp: NaiveDateTime,
    pub args: fmt::Arguments<'a>,
}

/// A rendered line, always ending in `\n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    /// The line hit the configured byte bound and lost its tail
    pub truncated: bool,
}

/// Substring after the last path separator, or the whole path if there is none
pub fn short_file_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(path)
}

/// Strip the `::__here` probe and closure frames from a `type_name` path,
/// leaving the bare name of the enclosing function.
#[doc(hidden)]
pub fn short_function_name(raw: &'static str) -> &'static str {
    let mut path = raw.strip_suffix("::__here").unwrap_or(raw);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}

fn push_styled(buf: &mut String, style: &str, color: bool, args: fmt::Arguments<'_>) {
    if color {
        let _ = write!(buf, "\x1b[{}m{}{}", style, args, RESET);
    } else {
        let _ = buf.write_fmt(args);
    }
}

/// Render a record into one newline-terminated line.
///
/// `max_bytes` bounds the whole line including its newline; the cut lands on
/// a char boundary and is reported through [`RenderedLine::truncated`].
/// `Some(0)` means unbounded, as in [`set_max_line_bytes`](crate::set_max_line_bytes).
/// In colored mode the cut never splits an escape sequence, and a field cut
/// short is closed with a reset that counts against the bound.
pub fn render_line(record: &Record<'_>, color: bool, max_bytes: Option<usize>) -> RenderedLine {
    let mut text = String::with_capacity(128);
    let level = record.level;
    let site = record.call_site;

    let level_style = format!("1;{}", level.color_code());
    push_styled(&mut text, &level_style, color, format_args!("[{}]", level));
    text.push('\t');
    push_styled(
        &mut text,
        TIME_STYLE,
        color,
        format_args!("{}", record.timestamp.format(TIMESTAMP_FORMAT)),
    );
    text.push(' ');
    push_styled(
        &mut text,
        LOCATION_STYLE,
        color,
        format_args!("{}:{}", site.short_file(), site.line),
    );
    text.push(' ');
    push_styled(
        &mut text,
        FUNCTION_STYLE,
        color,
        format_args!("{}()", site.function),
    );
    text.push(' ');
    push_styled(
        &mut text,
        MODULE_STYLE,
        color,
        format_args!("{}", record.module),
    );
    text.push(' ');
    let _ = text.write_fmt(record.args);

    if !text.ends_with('\n') {
        text.push('\n');
    }

    let truncated = match max_bytes {
        Some(limit) if limit > 0 && text.len() > limit => {
            truncate_line(&mut text, limit, color);
            true
        }
        _ => false,
    };

    RenderedLine { text, truncated }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

// Move a cut that lands inside an escape sequence back to its start.
fn back_out_of_escape(text: &str, cut: usize) -> usize {
    match text[..cut].rfind('\x1b') {
        Some(start) if !text[start..cut].contains('m') => start,
        _ => cut,
    }
}

// A style is open when the last escape sequence is not a reset.
fn style_open(prefix: &str) -> bool {
    match prefix.rfind("\x1b[") {
        Some(start) => !prefix[start..].starts_with(RESET),
        None => false,
    }
}

fn truncate_line(text: &mut String, limit: usize, color: bool) {
    let budget = limit - 1;
    let mut cut = floor_char_boundary(text, budget);
    if color {
        loop {
            cut = back_out_of_escape(text, cut);
            if !style_open(&text[..cut]) {
                break;
            }
            let with_reset = budget.saturating_sub(RESET.len());
            if cut <= with_reset {
                text.truncate(cut);
                text.push_str(RESET);
                text.push('\n');
                return;
            }
            cut = floor_char_boundary(text, with_reset);
        }
    }
    text.truncate(cut);
    text.push('\n');
}
