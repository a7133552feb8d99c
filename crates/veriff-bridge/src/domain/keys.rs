//! Recognised keys of the host's configuration map.
//!
//! ```json
//! {
//!   "sessionUrl": "https://magic.veriff.me/v/…",
//!   "sessionToken": "…",
//!   "baseUrl": "https://magic.veriff.me",
//!   "locale": "et",
//!   "customIntroScreen": true,
//!   "branding": {
//!     "themeColor": "#112233",
//!     "logo": { "uri": "https://cdn.example.com/logo.png" },
//!     "buttonCornerRadius": 8
//!   }
//! }
//! ```

// ── Session addressing ────────────────────────────────────────────────────────

pub const SESSION_URL: &str = "sessionUrl";
/// Legacy addressing; combined with [`BASE_URL`].
pub const SESSION_TOKEN: &str = "sessionToken";
pub const BASE_URL: &str = "baseUrl";
pub const LOCALE: &str = "locale";
pub const CUSTOM_INTRO_SCREEN: &str = "customIntroScreen";

// ── Branding ──────────────────────────────────────────────────────────────────

pub const BRANDING: &str = "branding";
pub const THEME_COLOR: &str = "themeColor";
/// Either `{ "uri": "…" }` or a bare bundled-resource name.
pub const LOGO: &str = "logo";
/// Bundled-resource name consulted only when [`LOGO`] is absent.
pub const NAVIGATION_BAR_IMAGE: &str = "navigationBarImage";
pub const LOGO_URI: &str = "uri";
pub const BACKGROUND_COLOR: &str = "backgroundColor";
pub const STATUS_BAR_COLOR: &str = "statusBarColor";
pub const PRIMARY_TEXT_COLOR: &str = "primaryTextColor";
pub const SECONDARY_TEXT_COLOR: &str = "secondaryTextColor";
pub const PRIMARY_BUTTON_BACKGROUND_COLOR: &str = "primaryButtonBackgroundColor";
pub const BUTTON_CORNER_RADIUS: &str = "buttonCornerRadius";
