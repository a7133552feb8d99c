//! Result taxonomy.
//!
//! The engine reports one of many native outcome variants; the host only ever
//! sees a small, stable public vocabulary.  This module holds both
//! vocabularies and the translation table between them.
//!
//! ```text
//! engine  ──EngineResult──►  translate()  ──ResultPayload──►  host (resolve)
//! resolver ──────────────── Rejection ────────────────────►  host (reject)
//! ```
//!
//! The two host-facing channels are never conflated: a [`Rejection`] means
//! the session could not even start, a [`ResultPayload`] with
//! [`Status::Error`] means it started and then failed.

pub mod engine;
pub mod public;
pub mod translate;

pub use engine::{EngineError, EngineResult, ParseOutcomeError};
pub use public::{exported_constants, ErrorCode, Rejection, ResultPayload, Status};
pub use translate::{error_code_for, translate};
