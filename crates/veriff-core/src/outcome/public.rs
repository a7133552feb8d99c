//! The public vocabulary the host switches on.
//!
//! Hosts should compare against the exported constants (or
//! [`exported_constants`]) rather than hardcoding string literals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Status values ─────────────────────────────────────────────────────────────

pub const STATUS_DONE: &str = "done";
pub const STATUS_CANCELED: &str = "canceled";
pub const STATUS_ERROR: &str = "error";

// ── Reject codes ──────────────────────────────────────────────────────────────

/// The configuration could not be resolved; the engine was never started.
pub const ERROR_INVALID_ARGS: &str = "INVALID_ARGUMENTS";

/// Another verification session is still outstanding on this bridge.
pub const ERROR_SESSION_IN_PROGRESS: &str = "SESSION_IN_PROGRESS";

/// The UI-affinity context the engine must start on is no longer running.
pub const ERROR_UI_CONTEXT_NOT_ATTACHED: &str = "UI_CONTEXT_NOT_ATTACHED";

// ── Engine error codes ────────────────────────────────────────────────────────

pub const ERROR_UNABLE_TO_ACCESS_CAMERA: &str = "UNABLE_TO_ACCESS_CAMERA";
pub const ERROR_UNABLE_TO_ACCESS_MICROPHONE: &str = "ERROR_UNABLE_TO_ACCESS_MICROPHONE";
pub const ERROR_NETWORK: &str = "NETWORK_ERROR";
pub const ERROR_SESSION: &str = "SESSION_ERROR";
pub const ERROR_UNSUPPORTED_SDK_VERSION: &str = "UNSUPPORTED_SDK_VERSION";
pub const ERROR_UNKNOWN: &str = "UNKNOWN_ERROR";

/// Top-level outcome of a started session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Done,
    Canceled,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Done => STATUS_DONE,
            Status::Canceled => STATUS_CANCELED,
            Status::Error => STATUS_ERROR,
        }
    }
}

/// Public error code carried by a [`Status::Error`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnableToAccessCamera,
    #[serde(rename = "ERROR_UNABLE_TO_ACCESS_MICROPHONE")]
    UnableToAccessMicrophone,
    NetworkError,
    SessionError,
    UnsupportedSdkVersion,
    UnknownError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::UnableToAccessCamera,
        ErrorCode::UnableToAccessMicrophone,
        ErrorCode::NetworkError,
        ErrorCode::SessionError,
        ErrorCode::UnsupportedSdkVersion,
        ErrorCode::UnknownError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnableToAccessCamera => ERROR_UNABLE_TO_ACCESS_CAMERA,
            ErrorCode::UnableToAccessMicrophone => ERROR_UNABLE_TO_ACCESS_MICROPHONE,
            ErrorCode::NetworkError => ERROR_NETWORK,
            ErrorCode::SessionError => ERROR_SESSION,
            ErrorCode::UnsupportedSdkVersion => ERROR_UNSUPPORTED_SDK_VERSION,
            ErrorCode::UnknownError => ERROR_UNKNOWN,
        }
    }
}

/// What the host's pending call resolves with once the engine has finished.
///
/// Serializes as `{"status": "...", "error": "..."}`; `error` is omitted
/// unless `status` is `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

impl ResultPayload {
    pub fn done() -> Self {
        Self {
            status: Status::Done,
            error: None,
        }
    }

    pub fn canceled() -> Self {
        Self {
            status: Status::Canceled,
            error: None,
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self {
            status: Status::Error,
            error: Some(code),
        }
    }
}

/// What the host's pending call rejects with when the session never started.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct Rejection {
    pub code: &'static str,
    pub message: String,
}

impl Rejection {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_INVALID_ARGS,
            message: message.into(),
        }
    }

    pub fn session_in_progress() -> Self {
        Self {
            code: ERROR_SESSION_IN_PROGRESS,
            message: "A verification session is already in progress".to_string(),
        }
    }

    pub fn ui_context_not_attached() -> Self {
        Self {
            code: ERROR_UI_CONTEXT_NOT_ATTACHED,
            message: "No UI context attached while launching verification".to_string(),
        }
    }
}

/// Named constants exported to the host, keyed the way hosts look them up.
pub fn exported_constants() -> BTreeMap<&'static str, &'static str> {
    let mut constants = BTreeMap::from([
        ("errorInvalidArgs", ERROR_INVALID_ARGS),
        ("errorSessionInProgress", ERROR_SESSION_IN_PROGRESS),
        ("errorUiContextNotAttached", ERROR_UI_CONTEXT_NOT_ATTACHED),
        ("statusDone", STATUS_DONE),
        ("statusCanceled", STATUS_CANCELED),
        ("statusError", STATUS_ERROR),
    ]);
    for code in ErrorCode::ALL {
        constants.insert(code.as_str(), code.as_str());
    }
    constants
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_payload_serializes_without_error_field() {
        // Arrange / Act
        let json = serde_json::to_value(ResultPayload::done()).unwrap();

        // Assert
        assert_eq!(json, serde_json::json!({ "status": "done" }));
    }

    #[test]
    fn test_error_payload_serializes_code() {
        let json = serde_json::to_value(ResultPayload::error(ErrorCode::NetworkError)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "error", "error": "NETWORK_ERROR" })
        );
    }

    #[test]
    fn test_serde_names_match_exported_constants() {
        // The wire names and the constants must never drift apart.
        for code in ErrorCode::ALL {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
        for status in [Status::Done, Status::Canceled, Status::Error] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }

    #[test]
    fn test_payload_deserializes_from_host_json() {
        let payload: ResultPayload =
            serde_json::from_str(r#"{"status":"canceled"}"#).unwrap();
        assert_eq!(payload, ResultPayload::canceled());
    }

    #[test]
    fn test_rejection_display_includes_code() {
        let rejection = Rejection::invalid_arguments("missing session");
        assert_eq!(rejection.to_string(), "INVALID_ARGUMENTS: missing session");
    }

    #[test]
    fn test_exported_constants_cover_statuses_and_codes() {
        let constants = exported_constants();

        assert_eq!(constants["statusDone"], "done");
        assert_eq!(constants["statusCanceled"], "canceled");
        assert_eq!(constants["statusError"], "error");
        assert_eq!(constants["errorInvalidArgs"], "INVALID_ARGUMENTS");
        assert_eq!(constants["UNSUPPORTED_SDK_VERSION"], "UNSUPPORTED_SDK_VERSION");
        assert_eq!(constants.len(), 6 + ErrorCode::ALL.len());
    }
}
