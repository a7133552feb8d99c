//! Infrastructure layer for veriff-bridge.
//!
//! Everything that touches the outside world lives here:
//!
//! - Reading bundled resources and local logo files
//! - Fetching remote logos over HTTP and decoding them
//! - Running the UI-affinity execution context the engine starts on
//! - Engine adapters (a recording double and a scripted stand-in)
//!
//! # What does NOT belong here?
//!
//! - Configuration validation (that is the application layer)
//! - The result taxonomy (that is `veriff-core`)

pub mod assets;
pub mod engine;
pub mod ui_context;

pub use assets::{AssetError, AssetResolver, DirectoryCatalog, HttpFetcher, LogoReference};
pub use engine::{RecordedLaunch, RecordingEngine, ScriptedEngine};
pub use ui_context::{UiContext, UiContextClosed, UiThread};
