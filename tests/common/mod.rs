//! Shared helpers for integration tests.

#![allow(dead_code, unused_macros)]

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a test-writer tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `errcov=trace` so the audit's diagnostic
/// stream shows up in captured output of failing tests.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("errcov=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Marks the start of a named test phase in the log.
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "test phase start");
    };
}

/// Marks successful completion of a named test.
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test complete");
    };
}

/// Asserts a condition, logging expected and actual values first.
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {{
        tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            "{}",
            $msg
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    }};
}
