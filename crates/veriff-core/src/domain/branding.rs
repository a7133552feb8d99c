//! Visual branding passed to the engine.
//!
//! Every field of [`BrandingDescriptor`] is independently optional; `None`
//! means "use the engine default".  An entirely empty descriptor is what the
//! bridge produces when the host supplies no `branding` map at all.
//!
//! # Logos
//!
//! A logo is either already decoded ([`Logo::Image`]) or still pending on a
//! remote fetch ([`Logo::Remote`]).  The session launcher resolves any pending
//! remote logo *before* starting the engine and swaps it for the decoded
//! image (or drops it on failure) via [`BrandingDescriptor::with_resolved_logo`].

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use url::Url;

use crate::color::Rgba;

/// An opaque, decoded in-memory image.
///
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Clone)]
pub struct ImageHandle {
    pixels: Arc<RgbaImage>,
}

impl ImageHandle {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The decoded RGBA8 pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

// Pixels are never serialized; only the dimensions are useful in diagnostics.
impl Serialize for ImageHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImageHandle", 2)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

/// A logo that is either ready to use or waiting on a remote fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Logo {
    Image(ImageHandle),
    Remote(Url),
}

/// Colors, logo, and corner radius for the verification UI.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingDescriptor {
    pub theme_color: Option<Rgba>,
    pub logo: Option<Logo>,
    pub background_color: Option<Rgba>,
    pub status_bar_color: Option<Rgba>,
    pub primary_text_color: Option<Rgba>,
    pub secondary_text_color: Option<Rgba>,
    pub primary_button_background_color: Option<Rgba>,
    /// Always non-negative when present.
    pub button_corner_radius: Option<f64>,
}

impl BrandingDescriptor {
    /// `true` when every field is absent (engine defaults apply throughout).
    pub fn is_empty(&self) -> bool {
        self.theme_color.is_none()
            && self.logo.is_none()
            && self.background_color.is_none()
            && self.status_bar_color.is_none()
            && self.primary_text_color.is_none()
            && self.secondary_text_color.is_none()
            && self.primary_button_background_color.is_none()
            && self.button_corner_radius.is_none()
    }

    /// The URL of a logo that still has to be fetched, if any.
    pub fn pending_remote_logo(&self) -> Option<&Url> {
        match &self.logo {
            Some(Logo::Remote(url)) => Some(url),
            _ => None,
        }
    }

    /// Replaces a pending remote logo with the fetch result.
    ///
    /// `None` means the fetch failed and the descriptor proceeds without a
    /// logo.  A logo that was already decoded is left untouched.
    pub fn with_resolved_logo(mut self, image: Option<ImageHandle>) -> Self {
        if matches!(self.logo, Some(Logo::Remote(_))) {
            self.logo = image.map(Logo::Image);
        }
        self
    }

    /// The decoded logo, if one is attached.
    pub fn logo_image(&self) -> Option<&ImageHandle> {
        match &self.logo {
            Some(Logo::Image(image)) => Some(image),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_image() -> ImageHandle {
        ImageHandle::new(RgbaImage::new(4, 2))
    }

    #[test]
    fn test_default_descriptor_is_empty() {
        assert!(BrandingDescriptor::default().is_empty());
    }

    #[test]
    fn test_descriptor_with_one_color_is_not_empty() {
        let branding = BrandingDescriptor {
            status_bar_color: Some(Rgba::ZERO),
            ..Default::default()
        };
        assert!(!branding.is_empty());
    }

    #[test]
    fn test_resolved_logo_replaces_pending_remote() {
        // Arrange
        let url = Url::parse("https://host/a.png").unwrap();
        let branding = BrandingDescriptor {
            logo: Some(Logo::Remote(url.clone())),
            ..Default::default()
        };
        assert_eq!(branding.pending_remote_logo(), Some(&url));

        // Act
        let branding = branding.with_resolved_logo(Some(tiny_image()));

        // Assert
        assert!(branding.pending_remote_logo().is_none());
        assert_eq!(branding.logo_image().map(ImageHandle::width), Some(4));
    }

    #[test]
    fn test_failed_remote_logo_is_dropped() {
        let branding = BrandingDescriptor {
            logo: Some(Logo::Remote(Url::parse("https://host/a.png").unwrap())),
            ..Default::default()
        };

        let branding = branding.with_resolved_logo(None);

        assert!(branding.logo.is_none());
    }

    #[test]
    fn test_resolved_logo_keeps_existing_image() {
        let branding = BrandingDescriptor {
            logo: Some(Logo::Image(tiny_image())),
            ..Default::default()
        };

        let branding = branding.with_resolved_logo(None);

        assert!(branding.logo_image().is_some());
    }

    #[test]
    fn test_image_handle_debug_shows_dimensions_only() {
        let debug = format!("{:?}", tiny_image());
        assert_eq!(debug, "ImageHandle { width: 4, height: 2 }");
    }

    #[test]
    fn test_branding_serializes_camel_case_with_image_dimensions() {
        let branding = BrandingDescriptor {
            logo: Some(Logo::Image(tiny_image())),
            button_corner_radius: Some(8.0),
            ..Default::default()
        };

        let json = serde_json::to_value(&branding).unwrap();

        assert_eq!(json["buttonCornerRadius"], 8.0);
        assert_eq!(json["logo"]["image"]["width"], 4);
        assert!(json["themeColor"].is_null());
    }
}
