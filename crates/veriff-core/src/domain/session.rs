//! Session addressing.
//!
//! A [`SessionDescriptor`] carries everything needed to start one verification
//! attempt: the session URL, an optional locale, the custom-intro flag, and
//! the query items echoed back to the engine.
//!
//! The session URL is validated on construction, so holding a descriptor is
//! proof that the URL is well-formed.  The string itself is kept verbatim
//! (not re-serialized through [`Url`]) because the engine matches on the
//! exact value the host supplied.

use serde::Serialize;
use url::Url;

/// Which configuration scheme produced the session URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressingScheme {
    /// The host supplied `sessionUrl` directly.
    SessionUrl,
    /// The URL was built from `baseUrl` + `sessionToken`.  This scheme does
    /// not support a custom locale.
    LegacyToken,
}

/// One `name=value` pair from the session URL's query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolved addressing, locale, and flags for one verification attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptor {
    session_url: String,
    scheme: AddressingScheme,
    locale: Option<String>,
    custom_intro_screen: bool,
    query_items: Vec<QueryItem>,
}

impl SessionDescriptor {
    /// Validates `session_url` and extracts its query items.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `session_url` is not an absolute URL.
    pub fn new(session_url: &str, scheme: AddressingScheme) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(session_url)?;
        let query_items = parsed
            .query_pairs()
            .map(|(name, value)| QueryItem::new(name, value))
            .collect();

        Ok(Self {
            session_url: session_url.to_string(),
            scheme,
            locale: None,
            custom_intro_screen: false,
            query_items,
        })
    }

    /// Sets the locale.  Ignored for [`AddressingScheme::LegacyToken`]
    /// sessions, which cannot carry one.
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        if self.scheme == AddressingScheme::SessionUrl {
            self.locale = locale;
        } else if locale.is_some() {
            tracing::debug!("legacy session token does not support a custom locale; ignoring");
        }
        self
    }

    pub fn with_custom_intro_screen(mut self, enabled: bool) -> Self {
        self.custom_intro_screen = enabled;
        self
    }

    pub fn session_url(&self) -> &str {
        &self.session_url
    }

    pub fn scheme(&self) -> AddressingScheme {
        self.scheme
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn custom_intro_screen(&self) -> bool {
        self.custom_intro_screen
    }

    /// Query items in the order they appear in the URL, percent-decoded.
    pub fn query_items(&self) -> &[QueryItem] {
        &self.query_items
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
