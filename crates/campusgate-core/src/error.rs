// ── Core error types ──
//
// User-facing errors from campusgate-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<campusgate_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Error type shared by every core operation.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach filtering service: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request to filtering service timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Policy not found: {identifier}")]
    PolicyNotFound { identifier: String },

    #[error("Alert not found: {identifier}")]
    AlertNotFound { identifier: String },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Service error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Re-tag a generic 404 with the entity kind the caller was after.
    pub(crate) fn not_found(entity_type: &str, identifier: &str) -> Self {
        match entity_type {
            "policy" => Self::PolicyNotFound {
                identifier: identifier.to_owned(),
            },
            "alert" => Self::AlertNotFound {
                identifier: identifier.to_owned(),
            },
            _ => Self::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: identifier.to_owned(),
            },
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout => true,
            Self::Api { status, .. } => status.is_some_and(|s| s >= 500),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<campusgate_api::Error> for CoreError {
    fn from(err: campusgate_api::Error) -> Self {
        match err {
            campusgate_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            campusgate_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            campusgate_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            campusgate_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            campusgate_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_entity_variant() {
        let err = CoreError::not_found("policy", "p1");
        assert!(matches!(err, CoreError::PolicyNotFound { .. }));

        let err = CoreError::not_found("device", "d1");
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn server_errors_are_transient() {
        let err = CoreError::Api {
            message: "boom".into(),
            status: Some(503),
        };
        assert!(err.is_transient());

        let err = CoreError::Api {
            message: "bad request".into(),
            status: Some(400),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn api_404_converts_to_not_found() {
        let api_err = campusgate_api::Error::Api {
            status: 404,
            message: "Policy not found".into(),
        };
        let core: CoreError = api_err.into();
        assert!(matches!(core, CoreError::NotFound { .. }));
    }
}
