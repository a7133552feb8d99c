//! Engine adapters.
//!
//! The real verification engine is a vendor component linked in by the host
//! application.  This crate ships two stand-ins behind the
//! [`VerificationEngine`](crate::application::VerificationEngine) seam:
//!
//! - [`RecordingEngine`] records every start and lets the caller decide
//!   when, and with what, each session completes.
//! - [`ScriptedEngine`] completes every session with a preset outcome after
//!   a delay.  The developer harness binary runs against it.

pub mod recording;
pub mod scripted;

pub use recording::{RecordedLaunch, RecordingEngine};
pub use scripted::ScriptedEngine;
