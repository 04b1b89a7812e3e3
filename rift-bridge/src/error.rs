use rift_core::Stage;
use thiserror::Error;

use crate::handle::LifecycleState;

/// Result alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Everything that can go wrong talking to the native pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The native factory returned null. Abandon this attempt.
    #[error("Failed to create RIFT bridge")]
    Creation,

    /// Native initialize reported failure. Safe to retry.
    #[error("Failed to initialize: {message}")]
    Initialization { message: String },

    /// Native execute reported failure, or the input could not cross the
    /// boundary. A different input may succeed.
    #[error("Pipeline failed: {message}")]
    Execution {
        stage: Option<Stage>,
        message: String,
    },

    /// Operation called in the wrong lifecycle state.
    #[error("Cannot {operation} while bridge is {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },

    /// The library has no standalone entry point for this stage.
    #[error("Stage {0} cannot be run on its own")]
    UnsupportedStage(Stage),

    /// Operation called after `release`.
    #[error("Cannot {operation}: bridge has been released")]
    UseAfterRelease { operation: &'static str },
}

impl BridgeError {
    pub fn execution(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Execution {
            stage: Stage::from_error_message(&message),
            message,
        }
    }

    /// Whether the caller may reasonably try the operation again.
    /// Lifecycle misuse and creation failures are not retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BridgeError::Initialization { .. } | BridgeError::Execution { .. }
        )
    }

    /// True for the errors that indicate a bug in the caller.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidState { .. }
                | BridgeError::UnsupportedStage(_)
                | BridgeError::UseAfterRelease { .. }
        )
    }
}
