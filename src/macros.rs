// SPDX-License-Identifier: Apache-2.0 OR MIT
// Call-site logging macros
//
// Every macro checks the gate before building its format arguments, so a
// filtered-out call costs one atomic load and a compare.

/// Name of the enclosing function, without module path or closure frames
///
/// # Examples
/// ```
/// fn handshake() -> &'static str {
///     foxlog::function_name!()
/// }
/// assert_eq!(handshake(), "handshake");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::format::short_function_name(__type_name_of(__here))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let __logger: &$crate::Logger = $crate::resolve($logger);
        let __level: $crate::Severity = $level;
        if __logger.enabled(__level) {
            let __site = $crate::CallSite::new(file!(), line!(), $crate::function_name!());
            ::core::option::Option::Some(__logger.emit(__level, &__site, format_args!($($arg)+)))
        } else {
            ::core::option::Option::None
        }
    }};
}

/// Log a message with debug severity
///
/// # Examples
/// ```ignore
/// log_debug!("parsed {} headers", count);
/// log_debug!(logger: &net, "peer {} idle", addr);
/// ```
#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!(::core::option::Option::None::<&$crate::Logger>, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log a message with info severity
///
/// # Examples
/// ```ignore
/// log_info!("listening on {}", addr);
/// log_info!(logger: &net, "accepted {}", peer);
/// ```
#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!(::core::option::Option::None::<&$crate::Logger>, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a message with warn severity
///
/// # Examples
/// ```ignore
/// log_warn!("retrying in {}s", delay);
/// ```
#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!(::core::option::Option::None::<&$crate::Logger>, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log a message with error severity
///
/// # Examples
/// ```ignore
/// log_error!(logger: &db, "query failed: {}", err);
/// ```
#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!(::core::option::Option::None::<&$crate::Logger>, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a message with fatal severity and terminate the process.
///
/// When the gate passes, the line is written and the process exits with
/// [`FATAL_EXIT_CODE`](crate::FATAL_EXIT_CODE); nothing after the call runs.
/// Only a raw threshold above FATAL lets control return.
///
/// # Examples
/// ```ignore
/// log_fatal!("config unreadable: {}", err);
/// ```
#[macro_export]
macro_rules! log_fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Fatal, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!(::core::option::Option::None::<&$crate::Logger>, $crate::Severity::Fatal, $($arg)+)
    };
}
