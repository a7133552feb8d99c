//! # veriff-core
//!
//! Shared library for the Veriff verification bridge containing the color
//! parser, the typed session/branding descriptors, and the result taxonomy
//! that the host application switches on.
//!
//! This crate has zero dependencies on async runtimes, sockets, the file
//! system, or UI frameworks.  Everything here is a pure function or a plain
//! value type, which keeps it trivially unit-testable.
//!
//! # Architecture overview
//!
//! The bridge sits between a host application and an embedded, vendor-supplied
//! verification engine.  The host hands over a loosely-typed configuration
//! map; the bridge turns it into the strongly-typed values defined here:
//!
//! - **`color`** – Parses `#rrggbb` / `#rrggbbaa` strings into [`Rgba`].
//!
//! - **`domain`** – [`SessionDescriptor`] (where to start the flow) and
//!   [`BrandingDescriptor`] (how it should look).
//!
//! - **`outcome`** – The engine's native outcome vocabulary, the small public
//!   vocabulary the host sees, and the translation table between the two.

pub mod color;
pub mod domain;
pub mod outcome;

// Re-export the most-used types at the crate root so callers can write
// `veriff_core::Rgba` instead of `veriff_core::color::Rgba`.
pub use color::{parse_color, Rgba};
pub use domain::branding::{BrandingDescriptor, ImageHandle, Logo};
pub use domain::session::{AddressingScheme, QueryItem, SessionDescriptor};
pub use outcome::engine::{EngineError, EngineResult, ParseOutcomeError};
pub use outcome::public::{ErrorCode, Rejection, ResultPayload, Status};
pub use outcome::translate::translate;
