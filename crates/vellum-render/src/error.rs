//! Error types for the renderer.

use std::fmt;

use vellum_test_utils::{BackendErrorCode, MissingEntryPoint};

/// Errors that can occur while driving the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A required backend entry point is unavailable for the current context.
    ///
    /// Fatal: no rendering can proceed on this context.
    MissingEntryPoint(MissingEntryPoint),

    /// The backend reported an error after a state-mutating or draw call.
    Backend {
        /// The operation after which the error was observed.
        operation: &'static str,
        /// The backend's error code.
        code: BackendErrorCode,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingEntryPoint(missing) => {
                write!(f, "Cannot initialize renderer: {}", missing)
            }
            RenderError::Backend { operation, code } => {
                write!(f, "Backend error after {}: {}", operation, code)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::MissingEntryPoint(missing) => Some(missing),
            RenderError::Backend { .. } => None,
        }
    }
}

impl From<MissingEntryPoint> for RenderError {
    fn from(missing: MissingEntryPoint) -> Self {
        RenderError::MissingEntryPoint(missing)
    }
}

/// Result type alias for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_entry_point_display_and_source() {
        let err = RenderError::from(MissingEntryPoint {
            name: "glDrawRangeElements",
        });

        assert!(err.to_string().contains("glDrawRangeElements"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_backend_error_display() {
        let err = RenderError::Backend {
            operation: "draw",
            code: BackendErrorCode::INVALID_VALUE,
        };

        assert_eq!(
            err.to_string(),
            "Backend error after draw: GL_INVALID_VALUE (0x0501)"
        );
    }
}
