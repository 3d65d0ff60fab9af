// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logger handle, level gate and emitter

use crate::error::LogError;
use crate::format::{render_line, CallSite, Record};
use crate::settings;
use crate::severity::Severity;
use std::collections::TryReserveError;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

/// Longest module label a handle keeps, in bytes
pub const MODULE_LABEL_CAPACITY: usize = 16;

/// Exit status of a process terminated by a FATAL line
pub const FATAL_EXIT_CODE: i32 = 255;

/// Threshold of freshly created handles and of the default handle
pub const DEFAULT_THRESHOLD: Severity = Severity::Warn;

/// Destination for rendered lines
pub(crate) trait Sink: Send + Sync {
    /// Write one complete line; must not interleave with other lines
    fn write_line(&self, line: &[u8]);
}

/// Writes each line to stderr with a single locked `write_all`
pub(crate) struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, line: &[u8]) {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line);
        let _ = stderr.flush();
    }
}

/// Outcome of a line that passed the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emitted {
    /// Bytes handed to the output stream
    pub bytes: usize,
    /// The line was cut at the configured bound
    pub truncated: bool,
}

struct Inner {
    threshold: AtomicU8,
    label: String,
    label_truncated: bool,
    sink: Arc<dyn Sink>,
}

/// Logger handle: a module label and a severity threshold.
///
/// Clones share the same threshold. Dropping the last clone releases it.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Create a handle writing to stderr, threshold [`DEFAULT_THRESHOLD`].
    ///
    /// Names longer than [`MODULE_LABEL_CAPACITY`] bytes are cut on a char
    /// boundary; see [`Logger::label_truncated`].
    pub fn new(module_name: Option<&str>) -> Result<Self, LogError> {
        Self::with_sink(module_name, Arc::new(StderrSink))
    }

    pub(crate) fn with_sink(
        module_name: Option<&str>,
        sink: Arc<dyn Sink>,
    ) -> Result<Self, LogError> {
        let name = module_name.unwrap_or("");
        let kept = truncate_label(name);

        let mut label = String::new();
        if let Err(e) = label.try_reserve_exact(kept.len()) {
            return Err(report_alloc_failure(sink.as_ref(), e));
        }
        label.push_str(kept);

        Ok(Self {
            inner: Arc::new(Inner {
                threshold: AtomicU8::new(DEFAULT_THRESHOLD.as_u8()),
                label_truncated: kept.len() < name.len(),
                label,
                sink,
            }),
        })
    }

    /// Module label as stored (possibly truncated)
    pub fn module_name(&self) -> &str {
        &self.inner.label
    }

    /// Whether the name given at creation did not fit
    pub fn label_truncated(&self) -> bool {
        self.inner.label_truncated
    }

    /// Current threshold, `None` if a raw value outside the named levels was set
    pub fn threshold(&self) -> Option<Severity> {
        Severity::from_u8(self.threshold_raw())
    }

    /// Current threshold as its numeric value
    #[inline]
    pub fn threshold_raw(&self) -> u8 {
        self.inner.threshold.load(Ordering::Relaxed)
    }

    /// Set the minimum severity this handle emits
    pub fn set_threshold(&self, level: Severity) {
        self.set_threshold_raw(level.as_u8());
    }

    /// Set the threshold without range checks; values above FATAL silence the handle
    pub fn set_threshold_raw(&self, level: u8) {
        self.inner.threshold.store(level, Ordering::Relaxed);
    }

    /// The gate: `true` iff `level >= threshold`
    #[inline]
    pub fn enabled(&self, level: Severity) -> bool {
        level.as_u8() >= self.threshold_raw()
    }

    /// Render and write one line. Callers check [`Logger::enabled`] first;
    /// the macros do that at the call site.
    ///
    /// A FATAL line terminates the process with [`FATAL_EXIT_CODE`] right
    /// after it is written; this function does not return in that case.
    pub fn emit(
        &self,
        level: Severity,
        call_site: &CallSite,
        args: fmt::Arguments<'_>,
    ) -> Emitted {
        let record = Record {
            level,
            call_site,
            module: &self.inner.label,
            timestamp: chrono::Local::now().naive_local(),
            args,
        };
        let line = render_line(
            &record,
            settings::color_mode().use_color(),
            settings::max_line_bytes(),
        );
        self.inner.sink.write_line(line.text.as_bytes());

        if level == Severity::Fatal {
            std::process::exit(FATAL_EXIT_CODE);
        }

        Emitted {
            bytes: line.text.len(),
            truncated: line.truncated,
        }
    }

    /// Gate then emit; `None` when the level is filtered out
    pub fn log(
        &self,
        level: Severity,
        call_site: &CallSite,
        args: fmt::Arguments<'_>,
    ) -> Option<Emitted> {
        if !self.enabled(level) {
            return None;
        }
        Some(self.emit(level, call_site, args))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("module", &self.inner.label)
            .field("threshold", &self.threshold_raw())
            .finish()
    }
}

// The failure line goes to the handle's own output before the error is returned.
fn report_alloc_failure(sink: &dyn Sink, e: TryReserveError) -> LogError {
    let err = LogError::from(e);
    sink.write_line(format!("{}\n", err).as_bytes());
    err
}

fn truncate_label(name: &str) -> &str {
    if name.len() <= MODULE_LABEL_CAPACITY {
        return name;
    }
    let mut end = MODULE_LABEL_CAPACITY;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide handle used when no explicit handle is given.
///
/// Created on first use with an empty label and [`DEFAULT_THRESHOLD`]; never torn down.
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(|| Logger {
        inner: Arc::new(Inner {
            threshold: AtomicU8::new(DEFAULT_THRESHOLD.as_u8()),
            label: String::new(),
            label_truncated: false,
            sink: Arc::new(StderrSink),
        }),
    })
}

/// Pick the explicit handle if there is one, else the default handle
#[inline]
pub fn resolve<'a>(handle: impl Into<Option<&'a Logger>>) -> &'a Logger {
    handle.into().unwrap_or_else(|| default_logger())
}
