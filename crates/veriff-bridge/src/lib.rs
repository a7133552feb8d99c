//! veriff-bridge library crate.
//!
//! Lets a host application launch an embedded identity-verification engine
//! with a loosely-typed configuration map and receive the outcome as a small,
//! stable payload.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host application (JSON-like configuration map)
//!         ↕
//! [veriff-bridge]
//!   ├── domain/           Configuration keys, BridgeSettings
//!   ├── application/      Resolve config, launch, settle the pending call
//!   └── infrastructure/
//!         ├── assets/     Bundled, file, and remote logos (reqwest, image)
//!         ├── ui_context  The UI-affinity thread the engine starts on
//!         └── engine/     Recording and scripted engine stand-ins
//!         ↕
//! Verification engine (black box: start → single completion)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` depends on `domain`, `veriff-core`, and the
//!   infrastructure handles it is constructed with.
//! - `infrastructure` owns every thread, socket, and file handle.

/// Domain layer: configuration vocabulary and settings.
pub mod domain;

/// Application layer: configuration resolution and session launch.
pub mod application;

/// Infrastructure layer: assets, UI context, engine adapters.
pub mod infrastructure;
