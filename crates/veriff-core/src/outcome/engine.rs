//! The engine's native outcome vocabulary.
//!
//! The engine delivers exactly one [`EngineResult`] per started session.  The
//! set is closed: an engine that reports anything else has drifted out of
//! sync with this bridge.  Textual names (as used by scripted engines and the
//! developer CLI) outside the set fail with [`ParseOutcomeError`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Why an engine session ended in failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineError {
    CameraUnavailable,
    MicrophoneUnavailable,
    NetworkError,
    UploadError,
    ServerError,
    VideoFailed,
    LocalError,
    #[serde(rename = "deprecatedSDKVersion")]
    DeprecatedSdkVersion,
    Unknown,
}

impl EngineError {
    /// Every declared error variant, in declaration order.
    pub const ALL: [EngineError; 9] = [
        EngineError::CameraUnavailable,
        EngineError::MicrophoneUnavailable,
        EngineError::NetworkError,
        EngineError::UploadError,
        EngineError::ServerError,
        EngineError::VideoFailed,
        EngineError::LocalError,
        EngineError::DeprecatedSdkVersion,
        EngineError::Unknown,
    ];

    /// The engine's own name for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineError::CameraUnavailable => "cameraUnavailable",
            EngineError::MicrophoneUnavailable => "microphoneUnavailable",
            EngineError::NetworkError => "networkError",
            EngineError::UploadError => "uploadError",
            EngineError::ServerError => "serverError",
            EngineError::VideoFailed => "videoFailed",
            EngineError::LocalError => "localError",
            EngineError::DeprecatedSdkVersion => "deprecatedSDKVersion",
            EngineError::Unknown => "unknown",
        }
    }
}

/// How an engine session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineResult {
    /// The flow completed.  This does not imply a verification decision.
    Done,
    /// The user left the flow before completing it.
    Canceled,
    Error(EngineError),
}

impl fmt::Display for EngineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineResult::Done => f.write_str("done"),
            EngineResult::Canceled => f.write_str("canceled"),
            EngineResult::Error(err) => f.write_str(err.as_str()),
        }
    }
}

/// An outcome name that is not part of the engine's declared set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine outcome: {0:?}")]
pub struct ParseOutcomeError(pub String);

impl FromStr for EngineResult {
    type Err = ParseOutcomeError;

    /// Parses `done`, `canceled`, or one of the [`EngineError`] names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => return Ok(EngineResult::Done),
            "canceled" => return Ok(EngineResult::Canceled),
            _ => {}
        }
        EngineError::ALL
            .into_iter()
            .find(|err| err.as_str() == s)
            .map(EngineResult::Error)
            .ok_or_else(|| ParseOutcomeError(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_done_and_canceled() {
        assert_eq!("done".parse::<EngineResult>(), Ok(EngineResult::Done));
        assert_eq!("canceled".parse::<EngineResult>(), Ok(EngineResult::Canceled));
    }

    #[test]
    fn test_every_error_name_round_trips_through_display() {
        for err in EngineError::ALL {
            let result = EngineResult::Error(err);
            let parsed: EngineResult = result.to_string().parse().unwrap();
            assert_eq!(parsed, result);
        }
    }

    #[test]
    fn test_parse_unknown_name_fails() {
        let err = "cosmicRay".parse::<EngineResult>().unwrap_err();
        assert_eq!(err, ParseOutcomeError("cosmicRay".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("DONE".parse::<EngineResult>().is_err());
    }

    #[test]
    fn test_deprecated_sdk_version_name() {
        assert_eq!(EngineError::DeprecatedSdkVersion.as_str(), "deprecatedSDKVersion");
    }
}
