//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use panofly_config::ConfigError;
use panofly_core::{CoreError, WriteStep};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PARTIAL: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the device")]
    #[diagnostic(
        code(panofly::connection_failed),
        help(
            "Check that the management interface is reachable.\n\
             Self-signed certificates need --insecure (-k) or ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: panofly_core::CoreError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(panofly::auth_failed),
        help("Verify the API key, or the username and password for login profiles.")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(panofly::no_credentials),
        help(
            "Set api_key_env or api_key in the profile, store a key in the keyring\n\
             under service 'panofly', or pass --api-key / PANOFLY_API_KEY."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(panofly::not_found),
        help("Run: panofly {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Writes ───────────────────────────────────────────────────────
    #[error("{step} step failed for {names:?}")]
    #[diagnostic(
        code(panofly::step_failed),
        help("{recovery}")
    )]
    StepFailed {
        step: WriteStep,
        names: Vec<String>,
        recovery: String,
        #[source]
        source: CoreError,
    },

    #[error("Device API error: {message}")]
    #[diagnostic(code(panofly::api_error))]
    ApiError {
        #[source]
        source: CoreError,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(panofly::validation))]
    Validation { field: String, reason: String },

    #[error("No template or template stack selected")]
    #[diagnostic(
        code(panofly::no_scope),
        help("Pass --template / --template-stack, or set template in your profile.")
    )]
    NoScope,

    #[error("No vsys selected for the import step")]
    #[diagnostic(
        code(panofly::no_vsys),
        help("Pass --vsys, or set vsys in your profile.")
    )]
    NoVsys,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(panofly::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(panofly::no_config),
        help(
            "Pass --device and --api-key, or add a profile.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(panofly::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(panofly::timeout),
        help("Increase timeout with --timeout or check device responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Other core failures ──────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(panofly::core))]
    Core(CoreError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(panofly::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::StepFailed { step, .. } if *step != WriteStep::Configure => exit_code::PARTIAL,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NoScope
            | Self::NoVsys
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

fn recovery_hint(step: WriteStep) -> &'static str {
    match step {
        WriteStep::Configure => "Nothing was changed on the device.",
        WriteStep::Unimport => {
            "The configuration was written but vsys membership was not updated.\n\
             Re-run the same command once the device accepts the change."
        }
        WriteStep::Import => {
            "The configuration was written and removed from every vsys,\n\
             but was not imported into the target vsys. Re-run the same command."
        }
        WriteStep::Delete => {
            "The interfaces were removed from every vsys but still exist.\n\
             Re-run the delete."
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, name } => {
                let list_command = if entity_type.starts_with("tunnel") {
                    "tunnel list"
                } else {
                    "ethernet list"
                };
                CliError::NotFound {
                    resource_type: entity_type,
                    identifier: name,
                    list_command: list_command.into(),
                }
            }

            CoreError::Step { step, ref names, .. } => CliError::StepFailed {
                step,
                names: names.clone(),
                recovery: recovery_hint(step).into(),
                source: err,
            },

            CoreError::InvalidArgument { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Precondition { message } => CliError::Validation {
                field: "scope".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "device".into(),
                reason: message,
            },

            CoreError::Transport(ref api) => match api {
                panofly_core::ApiError::Authentication { message } => CliError::AuthFailed {
                    message: message.clone(),
                },
                panofly_core::ApiError::Timeout { timeout_secs } => CliError::Timeout {
                    seconds: *timeout_secs,
                },
                panofly_core::ApiError::Transport(_) | panofly_core::ApiError::Tls(_) => {
                    CliError::ConnectionFailed { source: err }
                }
                panofly_core::ApiError::Api { message, .. } => CliError::ApiError {
                    message: message.clone(),
                    source: err,
                },
                _ => CliError::Core(err),
            },

            other => CliError::Core(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api_failure() -> panofly_core::ApiError {
        panofly_core::ApiError::Api {
            code: Some(12),
            message: "Invalid object".into(),
        }
    }

    #[test]
    fn later_step_failures_exit_as_partial() {
        let failed = |step| CoreError::Step {
            step,
            names: vec!["ethernet1/1".into()],
            source: api_failure(),
        };

        assert_eq!(
            CliError::from(failed(WriteStep::Configure)).exit_code(),
            exit_code::GENERAL
        );
        for step in [WriteStep::Unimport, WriteStep::Import, WriteStep::Delete] {
            assert_eq!(CliError::from(failed(step)).exit_code(), exit_code::PARTIAL);
        }
    }

    #[test]
    fn not_found_points_at_the_family_listing() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "tunnel interface".into(),
            name: "tunnel.4".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(err, CliError::NotFound { list_command, .. } if list_command == "tunnel list"));
    }

    #[test]
    fn transport_errors_map_by_kind() {
        let auth = CliError::from(CoreError::Transport(
            panofly_core::ApiError::Authentication {
                message: "bad key".into(),
            },
        ));
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let timeout = CliError::from(CoreError::Transport(panofly_core::ApiError::Timeout {
            timeout_secs: 5,
        }));
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let api = CliError::from(CoreError::Transport(api_failure()));
        assert!(matches!(api, CliError::ApiError { ref message, .. } if message == "Invalid object"));
    }

    #[test]
    fn caller_errors_are_usage_errors() {
        let err = CliError::from(CoreError::InvalidArgument {
            message: "entry has no name".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);

        let err = CliError::from(CoreError::Config {
            message: "device URL must use http or https, got ftp://".into(),
        });
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "device"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
