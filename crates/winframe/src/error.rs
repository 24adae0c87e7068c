//! Backend failure reporting

use thiserror::Error;

use crate::window::backend::WindowBackend;

/// A backend call failed
///
/// Carries the name of the call and the backend's diagnostic text as it was
/// when the error was created. Later backend activity that overwrites or
/// clears the diagnostic does not affect an error already captured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {diagnostic}")]
pub struct BackendError {
    operation: String,
    diagnostic: String,
}

impl BackendError {
    /// Capture the pending diagnostic of `backend` for the failed `operation`
    ///
    /// Only call this right after a backend call reported failure; capturing
    /// with no error pending is a bug in the caller.
    pub fn capture<B: WindowBackend + ?Sized>(operation: impl Into<String>, backend: &B) -> Self {
        let error = Self::new(operation, backend.last_error());
        debug_assert!(
            !error.diagnostic.is_empty(),
            "captured `{}` failure with no backend diagnostic pending",
            error.operation
        );
        error
    }

    /// Build from an already captured diagnostic
    pub fn new(operation: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Name of the backend call that failed
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Backend diagnostic text at the time of failure
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, BackendError>;
