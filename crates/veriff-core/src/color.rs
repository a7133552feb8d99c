//! Hex color parsing.
//!
//! Branding colors arrive from the host as hex strings.  Two forms are
//! accepted, each with an optional leading `#`:
//!
//! ```text
//! #rrggbb     opaque color, alpha = 1.0
//! #rrggbbaa   alpha lives in the LAST byte; the remaining six digits are rrggbb
//! ```
//!
//! Parsing is deliberately lenient: anything else (non-hex characters, the
//! wrong number of digits, an empty string) yields [`Rgba::ZERO`] instead of
//! an error.  The engine has always treated a bad color as "no color", and
//! hosts rely on a typo in one color field not aborting the whole launch.

use serde::Serialize;

/// A normalized color with every channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    /// All channels zero (fully transparent black).  Returned for malformed input.
    pub const ZERO: Rgba = Rgba {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Builds a color from 8-bit channel values.
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
            alpha: f32::from(alpha) / 255.0,
        }
    }

    /// Returns the color as 8-bit channels, rounding to the nearest step.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ]
    }
}

/// Parses a `#rrggbb` or `#rrggbbaa` hex string.  Never fails; see the
/// module docs for the fallback.
///
/// # Example
///
/// ```rust
/// use veriff_core::color::{parse_color, Rgba};
///
/// assert_eq!(parse_color("#FF0000"), Rgba::from_rgba8(0xff, 0, 0, 0xff));
/// assert_eq!(parse_color("zzz"), Rgba::ZERO);
/// ```
pub fn parse_color(hex: &str) -> Rgba {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    // `from_str_radix` tolerates a leading `+`, so check the digits ourselves.
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgba::ZERO;
    }

    let has_alpha = match digits.len() {
        6 => false,
        8 => true,
        _ => return Rgba::ZERO,
    };

    let Ok(mut value) = u32::from_str_radix(digits, 16) else {
        return Rgba::ZERO;
    };

    let mut alpha = 0xff;
    if has_alpha {
        alpha = (value & 0xff) as u8;
        value >>= 8;
    }

    Rgba::from_rgba8(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
        alpha,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_six_digit_red_is_opaque() {
        // Arrange / Act
        let color = parse_color("#FF0000");

        // Assert
        assert_eq!(color.to_rgba8(), [0xff, 0x00, 0x00, 0xff]);
        assert_close(color.alpha, 1.0);
    }

    #[test]
    fn test_parse_without_hash_prefix() {
        assert_eq!(parse_color("ff0000"), parse_color("#FF0000"));
    }

    #[test]
    fn test_parse_eight_digit_takes_alpha_from_last_byte() {
        // Arrange / Act
        let color = parse_color("#FF000080");

        // Assert: rrggbb comes from the leading six digits
        assert_eq!(color.to_rgba8(), [0xff, 0x00, 0x00, 0x80]);
        assert_close(color.alpha, 128.0 / 255.0);
    }

    #[test]
    fn test_parse_mixed_case_channels() {
        let color = parse_color("#aAbBcC");
        assert_eq!(color.to_rgba8(), [0xaa, 0xbb, 0xcc, 0xff]);
    }

    #[test]
    fn test_parse_theme_color_channels() {
        let color = parse_color("#112233");
        assert_close(color.red, 17.0 / 255.0);
        assert_close(color.green, 34.0 / 255.0);
        assert_close(color.blue, 51.0 / 255.0);
        assert_close(color.alpha, 1.0);
    }

    #[test]
    fn test_parse_non_hex_characters_yields_zero() {
        assert_eq!(parse_color("zzz"), Rgba::ZERO);
        assert_eq!(parse_color("#GG0000"), Rgba::ZERO);
    }

    #[test]
    fn test_parse_wrong_length_yields_zero() {
        assert_eq!(parse_color("#12"), Rgba::ZERO);
        assert_eq!(parse_color("#1234567"), Rgba::ZERO);
        assert_eq!(parse_color("#123456789"), Rgba::ZERO);
    }

    #[test]
    fn test_parse_empty_and_bare_hash_yield_zero() {
        assert_eq!(parse_color(""), Rgba::ZERO);
        assert_eq!(parse_color("#"), Rgba::ZERO);
    }

    #[test]
    fn test_parse_rejects_sign_prefix() {
        // `u32::from_str_radix` alone would accept this.
        assert_eq!(parse_color("+12345"), Rgba::ZERO);
    }

    #[test]
    fn test_to_rgba8_clamps_out_of_range_channels() {
        let color = Rgba {
            red: 2.0,
            green: -1.0,
            blue: 0.5,
            alpha: 1.0,
        };
        assert_eq!(color.to_rgba8(), [255, 0, 128, 255]);
    }
}
