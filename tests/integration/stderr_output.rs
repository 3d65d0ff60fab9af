// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Integration Tests: what actually reaches stderr, and FATAL termination.
//!
//! Each test re-runs this test binary filtered down to itself, with
//! `FOXLOG_TEST_SCENARIO` set. The child takes the scenario branch, logs, and
//! the parent inspects the child's exit status, stdout and stderr.

use anyhow::{Context, Result};
use foxlog::{
    log_debug, log_error, log_fatal, log_info, log_warn, CallSite, ColorMode, Severity,
    FATAL_EXIT_CODE,
};
use regex::Regex;
use std::process::{Command, Output};

const SCENARIO_ENV: &str = "FOXLOG_TEST_SCENARIO";
const AFTER_MARKER: &str = "control-returned-after-log-call";

fn scenario() -> Option<String> {
    std::env::var(SCENARIO_ENV).ok()
}

/// Run a single test of this binary in a child process
fn run_child(test_name: &str, scenario: &str) -> Result<Output> {
    let current_exe = std::env::current_exe().context("locating test binary")?;
    Command::new(current_exe)
        .arg(format!("stderr_output::{}", test_name))
        .arg("--exact")
        .arg("--nocapture")
        .arg("--test-threads=1")
        .env(SCENARIO_ENV, scenario)
        .output()
        .context("spawning child test process")
}

fn strip_colors(text: &str) -> String {
    Regex::new("\x1b\\[[0-9;]*m")
        .unwrap()
        .replace_all(text, "")
        .into_owned()
}

/// **Passing Test:** A FATAL line is written, then the process exits non-zero
/// without running the statement after the call.
#[test]
fn test_fatal_terminates_process() -> Result<()> {
    if scenario().as_deref() == Some("fatal") {
        log_fatal!("going down: code={}", 7);
        println!("{}", AFTER_MARKER);
        return Ok(());
    }

    let output = run_child("test_fatal_terminates_process", "fatal")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = strip_colors(&String::from_utf8_lossy(&output.stderr));

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(!stdout.contains(AFTER_MARKER), "code after FATAL ran: {}", stdout);
    assert!(stderr.starts_with("[FATAL]\t"), "stderr: {:?}", stderr);
    assert!(stderr.ends_with("going down: code=7\n"), "stderr: {:?}", stderr);
    assert!(stderr.contains("test_fatal_terminates_process()"));
    Ok(())
}

/// **Passing Test:** A FATAL call filtered out by a raw threshold above FATAL
/// returns normally.
#[test]
fn test_gated_fatal_returns() -> Result<()> {
    if scenario().as_deref() == Some("gated_fatal") {
        let quiet = foxlog::create(Some("quiet"))?;
        quiet.set_threshold_raw(u8::MAX);
        let emitted = log_fatal!(logger: &quiet, "never written");
        assert!(emitted.is_none());
        println!("{}", AFTER_MARKER);
        return Ok(());
    }

    let output = run_child("test_gated_fatal_returns", "gated_fatal")?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(AFTER_MARKER));
    assert!(output.stderr.is_empty());
    Ok(())
}

/// **Passing Test:** The rendered line carries level, timestamp, short file
/// name, line, function and module in that order, followed by the message.
#[test]
fn test_line_layout_on_stderr() -> Result<()> {
    if scenario().as_deref() == Some("layout") {
        let net = foxlog::create(Some("net"))?;
        let site = CallSite::new("/a/b/c.txt", 42, "doit");
        net.emit(Severity::Error, &site, format_args!("x={}", 5));
        return Ok(());
    }

    let output = run_child("test_line_layout_on_stderr", "layout")?;
    assert!(output.status.success());

    let raw = String::from_utf8_lossy(&output.stderr);
    assert!(raw.contains("\x1b["), "default mode should colorize");

    let layout = Regex::new(
        r"^\[ERROR\]\t\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} c\.txt:42 doit\(\) net x=5\n$",
    )?;
    let plain = strip_colors(&raw);
    assert!(layout.is_match(&plain), "unexpected line: {:?}", plain);
    Ok(())
}

/// **Passing Test:** Plain mode writes no escape sequences at all.
#[test]
fn test_plain_mode_on_stderr() -> Result<()> {
    if scenario().as_deref() == Some("plain") {
        foxlog::set_color_mode(ColorMode::Never);
        log_error!("plain {}", "text");
        return Ok(());
    }

    let output = run_child("test_plain_mode_on_stderr", "plain")?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success());
    assert!(!stderr.contains('\x1b'));
    assert!(stderr.starts_with("[ERROR]\t"));
    assert!(stderr.contains("stderr_output.rs:"));
    assert!(stderr.contains("test_plain_mode_on_stderr()  plain text\n"));
    Ok(())
}

/// **Passing Test:** Setting the level with no handle changes what the
/// unqualified macros emit.
#[test]
fn test_default_logger_level_change() -> Result<()> {
    if scenario().as_deref() == Some("default_level") {
        foxlog::set_color_mode(ColorMode::Never);
        log_info!("hidden before");
        foxlog::set_level(None, Severity::Info);
        log_info!("shown after {}", 1);
        log_debug!("still hidden");
        return Ok(());
    }

    let output = run_child("test_default_logger_level_change", "default_level")?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success());
    assert_eq!(stderr.lines().count(), 1, "stderr: {:?}", stderr);
    assert!(stderr.starts_with("[INFO]\t"));
    assert!(stderr.ends_with("shown after 1\n"));
    Ok(())
}

/// **Passing Test:** Every line ends in exactly one newline, whether or not
/// the message already had one.
#[test]
fn test_single_trailing_newline() -> Result<()> {
    if scenario().as_deref() == Some("newline") {
        foxlog::set_color_mode(ColorMode::Never);
        log_warn!("already ends\n");
        log_warn!("no newline");
        return Ok(());
    }

    let output = run_child("test_single_trailing_newline", "newline")?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.split_inclusive('\n').collect();
    assert_eq!(lines.len(), 2, "stderr: {:?}", stderr);
    assert!(lines[0].ends_with("already ends\n"));
    assert!(lines[1].ends_with("no newline\n"));
    Ok(())
}

/// **Passing Test:** A bounded line is cut to the bound and the caller is told.
#[test]
fn test_bounded_line_reports_truncation() -> Result<()> {
    if scenario().as_deref() == Some("bounded") {
        foxlog::set_color_mode(ColorMode::Never);
        foxlog::set_max_line_bytes(Some(160));
        let long = "z".repeat(500);
        let emitted = log_error!("{}", long).expect("ERROR passes the default gate");
        println!("truncated={} bytes={}", emitted.truncated, emitted.bytes);
        return Ok(());
    }

    let output = run_child("test_bounded_line_reports_truncation", "bounded")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success());
    assert!(stdout.contains("truncated=true bytes=160"), "stdout: {}", stdout);
    assert_eq!(stderr.len(), 160);
    assert!(stderr.ends_with("z\n"));
    Ok(())
}
