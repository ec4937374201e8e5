//! Packed ARGB color codec.
//!
//! Workbook colors arrive as 8 hex digits, alpha first (`AARRGGBB`). They are
//! rendered as CSS `rgba()` strings with the alpha scaled to `0..=1`.

/// A CSS color string (e.g., "#fff", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Color with an alpha channel, as stored by spreadsheet styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Argb {
    /// Create a new ARGB color.
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Decode an `AARRGGBB` string.
    ///
    /// Returns `None` unless the input is exactly 8 hex digits.
    pub fn decode(packed: &str) -> Option<Self> {
        if packed.len() != 8 || !packed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(packed.get(i * 2..i * 2 + 2)?, 16).ok();
        Some(Self {
            alpha: channel(0)?,
            red: channel(1)?,
            green: channel(2)?,
            blue: channel(3)?,
        })
    }

    /// Encode back to the packed `AARRGGBB` form (uppercase).
    pub fn encode(self) -> String {
        format!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.red, self.green, self.blue
        )
    }

    /// Alpha as a fraction of 255.
    pub fn opacity(self) -> f64 {
        f64::from(self.alpha) / 255.0
    }

    /// Convert to CSS `rgba(r, g, b, a)`.
    pub fn to_css(self) -> CssColor {
        format!(
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            self.opacity()
        )
    }
}

/// Decode an optional packed color straight to CSS.
pub fn decode_css(packed: Option<&str>) -> Option<CssColor> {
    packed.and_then(Argb::decode).map(Argb::to_css)
}

/// Decode an optional packed color, falling back to `default` when absent or invalid.
pub fn decode_css_or(packed: Option<&str>, default: &str) -> CssColor {
    decode_css(packed).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_opaque_red() {
        let color = Argb::decode("FFFF0000").unwrap();
        assert_eq!(color, Argb::new(255, 255, 0, 0));
        assert_eq!(color.to_css(), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_decode_lowercase() {
        assert_eq!(Argb::decode("80a0b0c0"), Some(Argb::new(0x80, 0xA0, 0xB0, 0xC0)));
    }

    #[test]
    fn test_transparent_alpha() {
        assert_eq!(
            Argb::decode("00123456").unwrap().to_css(),
            "rgba(18, 52, 86, 0)"
        );
    }

    #[test]
    fn test_fractional_alpha_matches_js_number_formatting() {
        // 128 / 255 printed with shortest round-trip digits
        assert_eq!(
            Argb::decode("80000000").unwrap().to_css(),
            "rgba(0, 0, 0, 0.5019607843137255)"
        );
    }

    #[test]
    fn test_rejects_rgb_without_alpha() {
        assert_eq!(Argb::decode("FF0000"), None);
    }

    #[test]
    fn test_rejects_sign_prefixed_channels() {
        // from_str_radix would accept "+F"
        assert_eq!(Argb::decode("+FFF0000"), None);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(decode_css_or(None, "#333"), "#333");
        assert_eq!(decode_css_or(Some("zz"), "#fff"), "#fff");
        assert_eq!(
            decode_css_or(Some("FF00FF00"), "#fff"),
            "rgba(0, 255, 0, 1)"
        );
    }
}
