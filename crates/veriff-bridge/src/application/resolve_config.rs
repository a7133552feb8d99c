//! Configuration resolution: raw host map → typed descriptors.
//!
//! [`ConfigResolver::resolve`] is the single place the host's untyped
//! configuration is read.  Everything downstream consumes only the
//! [`SessionDescriptor`] and [`BrandingDescriptor`] it produces.
//!
//! # Session addressing
//!
//! Checked in priority order:
//!
//! 1. `sessionUrl` → used verbatim; `locale` applies.
//! 2. `sessionToken` → `baseUrl` (or the configured default) + `"/"` + token;
//!    `locale` is ignored.
//! 3. Neither → [`ResolveError::MissingSession`].
//!
//! Empty strings and values of the wrong type count as absent throughout.
//!
//! # Branding
//!
//! Colors go through [`parse_color`], so a malformed hex string yields
//! [`veriff_core::Rgba::ZERO`] rather than an error.  File and bundled logos
//! are loaded here; a remote logo is left as [`Logo::Remote`] for the
//! launcher to fetch before the engine starts.  Logo failures only produce
//! warnings.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};
use veriff_core::{
    parse_color, AddressingScheme, BrandingDescriptor, Logo, Rejection, Rgba, SessionDescriptor,
};

use crate::domain::{keys, SessionSettings};
use crate::infrastructure::{AssetResolver, LogoReference};

/// Why a configuration map could not be turned into a session.
///
/// Every variant is reported to the host as `INVALID_ARGUMENTS`.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Veriff SDK configuration must be a map")]
    NotAMap,

    #[error("No sessionUrl or sessionToken in Veriff SDK configuration")]
    MissingSession,

    #[error("Invalid session url {url}")]
    InvalidSessionUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<ResolveError> for Rejection {
    fn from(err: ResolveError) -> Self {
        Rejection::invalid_arguments(err.to_string())
    }
}

/// The typed result of resolving one configuration map.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfiguration {
    pub session: SessionDescriptor,
    pub branding: BrandingDescriptor,
}

/// Validates host configuration maps.
pub struct ConfigResolver {
    default_base_url: String,
    assets: Arc<AssetResolver>,
}

impl ConfigResolver {
    pub fn new(settings: &SessionSettings, assets: Arc<AssetResolver>) -> Self {
        Self {
            default_base_url: settings.default_base_url.clone(),
            assets,
        }
    }

    /// Resolves `raw` into session and branding descriptors.
    ///
    /// The session is resolved first, so an invalid map fails before any
    /// logo is loaded.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`].
    pub fn resolve(&self, raw: &Value) -> Result<ResolvedConfiguration, ResolveError> {
        let map = raw.as_object().ok_or(ResolveError::NotAMap)?;

        let session = self.resolve_session(map)?;
        let branding = match map.get(keys::BRANDING) {
            Some(Value::Object(branding)) => self.resolve_branding(branding),
            Some(other) => {
                warn!("{} must be a map, got {other}; using engine defaults", keys::BRANDING);
                BrandingDescriptor::default()
            }
            None => BrandingDescriptor::default(),
        };

        Ok(ResolvedConfiguration { session, branding })
    }

    fn resolve_session(&self, map: &Map<String, Value>) -> Result<SessionDescriptor, ResolveError> {
        let (url, scheme) = if let Some(url) = string_field(map, keys::SESSION_URL) {
            (url.to_string(), AddressingScheme::SessionUrl)
        } else if let Some(token) = string_field(map, keys::SESSION_TOKEN) {
            let base = string_field(map, keys::BASE_URL).unwrap_or(self.default_base_url.as_str());
            let base = base.strip_suffix('/').unwrap_or(base);
            (format!("{base}/{token}"), AddressingScheme::LegacyToken)
        } else {
            return Err(ResolveError::MissingSession);
        };

        let session = SessionDescriptor::new(&url, scheme)
            .map_err(|source| ResolveError::InvalidSessionUrl { url, source })?
            .with_locale(string_field(map, keys::LOCALE).map(str::to_string))
            .with_custom_intro_screen(bool_field(map, keys::CUSTOM_INTRO_SCREEN).unwrap_or(false));

        debug!(
            "session resolved via {:?} with {} query item(s)",
            session.scheme(),
            session.query_items().len()
        );
        Ok(session)
    }

    fn resolve_branding(&self, branding: &Map<String, Value>) -> BrandingDescriptor {
        let logo = match LogoReference::from_branding(branding) {
            Some(LogoReference::Remote(url)) => Some(Logo::Remote(url)),
            Some(local) => self.assets.resolve_local(&local).map(Logo::Image),
            None => None,
        };

        BrandingDescriptor {
            theme_color: color_field(branding, keys::THEME_COLOR),
            logo,
            background_color: color_field(branding, keys::BACKGROUND_COLOR),
            status_bar_color: color_field(branding, keys::STATUS_BAR_COLOR),
            primary_text_color: color_field(branding, keys::PRIMARY_TEXT_COLOR),
            secondary_text_color: color_field(branding, keys::SECONDARY_TEXT_COLOR),
            primary_button_background_color: color_field(
                branding,
                keys::PRIMARY_BUTTON_BACKGROUND_COLOR,
            ),
            button_corner_radius: corner_radius(branding),
        }
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// A non-empty string value, or `None`.
fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    match map.get(key)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => {
            warn!("{key} must be a string, got {other}; ignoring");
            None
        }
    }
}

fn bool_field(map: &Map<String, Value>, key: &str) -> Option<bool> {
    match map.get(key)? {
        Value::Bool(b) => Some(*b),
        other => {
            warn!("{key} must be a boolean, got {other}; ignoring");
            None
        }
    }
}

fn color_field(map: &Map<String, Value>, key: &str) -> Option<Rgba> {
    string_field(map, key).map(parse_color)
}

fn corner_radius(map: &Map<String, Value>) -> Option<f64> {
    let value = map.get(keys::BUTTON_CORNER_RADIUS)?;
    match value.as_f64() {
        Some(radius) if radius.is_finite() && radius >= 0.0 => Some(radius),
        Some(radius) => {
            warn!("{} must be non-negative, got {radius}; ignoring", keys::BUTTON_CORNER_RADIUS);
            None
        }
        None => {
            warn!("{} must be a number, got {value}; ignoring", keys::BUTTON_CORNER_RADIUS);
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
