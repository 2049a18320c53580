//! Converters between the wire representation and the editable one.
//!
//! - colors: `rgb(r,g,b)` on the wire, `#RRGGBB` while editing
//! - timestamps: ISO-8601 UTC on the wire, `YYYY-MM-DDTHH:MM` while editing

pub mod color;
pub mod timestamp;

pub use color::{hex_to_rgb, rgb_to_hex, Rgb};
pub use timestamp::{iso_to_local, parse_iso, parse_local, to_iso_z, LOCAL_FORMAT};
