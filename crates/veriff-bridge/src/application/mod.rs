//! Application layer for veriff-bridge.
//!
//! The application layer orchestrates a launch: it knows *what* to do, but
//! delegates *how* to the infrastructure layer and the engine seam.
//!
//! # Responsibilities
//!
//! - Validating the host's configuration map into typed descriptors
//! - Holding the host's pending call and settling it exactly once
//! - Starting the engine on the UI context and translating its outcome
//!
//! # What does NOT belong here?
//!
//! - HTTP, file, or image decoding (that is infrastructure)
//! - The outcome tables themselves (those live in `veriff-core`)

pub mod bridge;
pub mod launch_session;
pub mod pending_call;
pub mod resolve_config;

pub use bridge::VerificationBridge;
pub use launch_session::{
    CompletionHandler, EngineConfiguration, LaunchError, SessionLauncher, VerificationEngine,
};
pub use pending_call::{
    CallOutcome, PendingCall, PendingCallAbandoned, PendingReceiver, SessionLease,
};
pub use resolve_config::{ConfigResolver, ResolveError, ResolvedConfiguration};
