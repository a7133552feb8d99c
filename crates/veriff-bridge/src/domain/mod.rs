//! Domain layer for veriff-bridge.
//!
//! The configuration key vocabulary the host speaks, and the settings that
//! tune the bridge itself.  Apart from reading the settings file, nothing
//! here performs I/O.
//!
//! # What does NOT belong here?
//!
//! - Logo files, bundled resources, or network access (that is infrastructure)
//! - Anything that touches the engine (that is the application layer)

pub mod keys;
pub mod settings;

pub use settings::{AssetSettings, BridgeSettings, SessionSettings, SettingsError};
