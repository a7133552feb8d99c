//! Domain types shared by every layer of the bridge.
//!
//! These are the typed descriptors produced by configuration resolution.
//! Downstream components (the session launcher, the engine adapters) consume
//! only these values and never look at the host's raw configuration map.

pub mod branding;
pub mod session;

pub use branding::{BrandingDescriptor, ImageHandle, Logo};
pub use session::{AddressingScheme, QueryItem, SessionDescriptor};
