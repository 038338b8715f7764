// ── Core error types ──
//
// Errors surfaced by the synchronization layer. Transport failures are
// carried verbatim; mutations additionally record which remote step
// failed and for which names, so callers can script their own
// compensation.

use thiserror::Error;

use crate::namespace::WriteStep;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller errors (raised before any remote call) ───────────────
    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ── Remote errors ────────────────────────────────────────────────
    /// A read failed at the transport. The source is untouched.
    #[error(transparent)]
    Transport(#[from] panofly_api::Error),

    /// One step of a multi-step mutation failed. Earlier steps took
    /// effect; later steps did not run.
    #[error("{step} step failed for {names:?}: {source}")]
    Step {
        step: WriteStep,
        names: Vec<String>,
        #[source]
        source: panofly_api::Error,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("{entity_type} not found: {name}")]
    NotFound { entity_type: String, name: String },

    // ── Configuration errors ─────────────────────────────────────────
    /// Connection settings that cannot describe a device.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// The mutation step that failed, if this is a step failure.
    pub fn failed_step(&self) -> Option<WriteStep> {
        match self {
            Self::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The underlying transport error, for reads and failed steps alike.
    pub fn transport_error(&self) -> Option<&panofly_api::Error> {
        match self {
            Self::Transport(e) | Self::Step { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the caller can fix this by changing its inputs.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Precondition { .. } | Self::InvalidArgument { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            other => other
                .transport_error()
                .is_some_and(panofly_api::Error::is_not_found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_exposes_step_and_source() {
        let err = CoreError::Step {
            step: WriteStep::Unimport,
            names: vec!["ethernet1/1".into()],
            source: panofly_api::Error::Api {
                code: Some(12),
                message: "bad xpath".into(),
            },
        };
        assert_eq!(err.failed_step(), Some(WriteStep::Unimport));
        assert_eq!(err.transport_error().and_then(panofly_api::Error::api_error_code), Some(12));
        assert_eq!(
            err.to_string(),
            "unimport step failed for [\"ethernet1/1\"]: Device API error: bad xpath"
        );
    }

    #[test]
    fn caller_errors_are_flagged() {
        assert!(CoreError::precondition("vsys must be specified").is_caller_error());
        assert!(!CoreError::malformed("entry without @name").is_caller_error());
    }

    #[test]
    fn not_found_covers_device_code_seven() {
        let err = CoreError::Transport(panofly_api::Error::Api {
            code: Some(7),
            message: "Object doesn't exist".into(),
        });
        assert!(err.is_not_found());
        let err = CoreError::NotFound {
            entity_type: "ethernet interface".into(),
            name: "ethernet1/3".into(),
        };
        assert!(err.is_not_found());
    }
}
