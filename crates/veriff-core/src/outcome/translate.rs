//! Engine outcome → public payload translation.
//!
//! | Engine outcome                       | Status     | Error code                          |
//! |--------------------------------------|------------|-------------------------------------|
//! | `done`                               | `done`     | —                                   |
//! | `canceled`                           | `canceled` | —                                   |
//! | `cameraUnavailable`                  | `error`    | `UNABLE_TO_ACCESS_CAMERA`           |
//! | `microphoneUnavailable`              | `error`    | `ERROR_UNABLE_TO_ACCESS_MICROPHONE` |
//! | `networkError`, `uploadError`        | `error`    | `NETWORK_ERROR`                     |
//! | `serverError`, `videoFailed`, `localError` | `error` | `SESSION_ERROR`                |
//! | `deprecatedSDKVersion`               | `error`    | `UNSUPPORTED_SDK_VERSION`           |
//! | `unknown`                            | `error`    | `UNKNOWN_ERROR`                     |
//!
//! Both matches below are exhaustive with no wildcard arm: a new engine
//! variant without a row in this table does not compile.

use super::engine::{EngineError, EngineResult};
use super::public::{ErrorCode, ResultPayload};

/// Maps an engine outcome to the payload the host's pending call resolves with.
///
/// # Example
///
/// ```rust
/// use veriff_core::outcome::{translate, EngineError, EngineResult, ErrorCode, ResultPayload};
///
/// let payload = translate(EngineResult::Error(EngineError::UploadError));
/// assert_eq!(payload, ResultPayload::error(ErrorCode::NetworkError));
/// ```
pub fn translate(result: EngineResult) -> ResultPayload {
    match result {
        EngineResult::Done => ResultPayload::done(),
        EngineResult::Canceled => ResultPayload::canceled(),
        EngineResult::Error(err) => ResultPayload::error(error_code_for(err)),
    }
}

/// The public error code for one engine error variant.
pub fn error_code_for(err: EngineError) -> ErrorCode {
    match err {
        EngineError::CameraUnavailable => ErrorCode::UnableToAccessCamera,
        EngineError::MicrophoneUnavailable => ErrorCode::UnableToAccessMicrophone,
        EngineError::NetworkError | EngineError::UploadError => ErrorCode::NetworkError,
        EngineError::ServerError | EngineError::VideoFailed | EngineError::LocalError => {
            ErrorCode::SessionError
        }
        EngineError::DeprecatedSdkVersion => ErrorCode::UnsupportedSdkVersion,
        EngineError::Unknown => ErrorCode::UnknownError,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
