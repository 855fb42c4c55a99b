//! Backend error checks.
//!
//! Immediate-mode backends report errors asynchronously through an error
//! query, so the renderer polls after state-mutating and draw calls and
//! routes what it finds through an [`ErrorCheckMode`]. Errors are never
//! retried: the same call would fail the same way.

use vellum_test_utils::RenderBackend;

use crate::error::RenderError;
use crate::stats::RenderStats;

/// Upper bound on errors drained per check, in case a broken driver never
/// stops reporting.
const MAX_ERRORS_PER_CHECK: usize = 16;

/// What to do with errors reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCheckMode {
    /// Do not poll the backend at all.
    Ignore,
    /// Log and count errors; the frame continues.
    Log,
    /// Log and count errors, then panic.
    Assert,
}

impl Default for ErrorCheckMode {
    /// `Assert` in debug builds, `Log` otherwise.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ErrorCheckMode::Assert
        } else {
            ErrorCheckMode::Log
        }
    }
}

/// Drain the backend's pending errors after `operation`.
///
/// Returns the first error found, after logging and counting all of them.
///
/// # Panics
/// Panics in [`ErrorCheckMode::Assert`] if any error was pending.
pub(crate) fn check_backend_errors<B: RenderBackend + ?Sized>(
    backend: &B,
    mode: ErrorCheckMode,
    stats: &mut RenderStats,
    operation: &'static str,
) -> Option<RenderError> {
    if mode == ErrorCheckMode::Ignore {
        return None;
    }

    let mut first = None;
    for _ in 0..MAX_ERRORS_PER_CHECK {
        let Some(code) = backend.poll_error() else {
            break;
        };
        stats.backend_errors += 1;
        let err = RenderError::Backend { operation, code };
        tracing::error!("{}", err);
        first.get_or_insert(err);
    }

    if mode == ErrorCheckMode::Assert {
        if let Some(err) = &first {
            panic!("{}", err);
        }
    }

    first
}
