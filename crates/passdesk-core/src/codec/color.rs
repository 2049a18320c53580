//! Hex and CSS `rgb(...)` color strings.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{PassError, Result};

fn css_rgb_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^\s*rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)\s*$")
            .expect("static regex")
    })
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, case-insensitive.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| PassError::color(text))?;
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| PassError::color(text))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse `rgb(r,g,b)`; blanks around the components are tolerated.
    pub fn parse_css(text: &str) -> Result<Self> {
        let caps = css_rgb_regex()
            .captures(text)
            .ok_or_else(|| PassError::color(text))?;
        let channel = |i: usize| -> Result<u8> {
            caps[i].parse::<u8>().map_err(|_| PassError::color(text))
        };
        Ok(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Compact `rgb(r,g,b)` as stored on the wire.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Accepts either notation.
impl FromStr for Rgb {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::parse_css(s)
        }
    }
}

/// `#RRGGBB` to `rgb(r,g,b)`.
///
/// ```
/// use passdesk_core::codec::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#d8bd5a").unwrap(), "rgb(216,189,90)");
/// assert!(hex_to_rgb("d8bd5a").is_err());
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<String> {
    Rgb::from_hex(hex).map(Rgb::to_css)
}

/// `rgb(r,g,b)` to uppercase `#RRGGBB`.
///
/// ```
/// use passdesk_core::codec::rgb_to_hex;
///
/// assert_eq!(rgb_to_hex("rgb(216, 189, 90)").unwrap(), "#D8BD5A");
/// assert!(rgb_to_hex("rgb(256,0,0)").is_err());
/// ```
pub fn rgb_to_hex(rgb: &str) -> Result<String> {
    Rgb::parse_css(rgb).map(Rgb::to_hex)
}
