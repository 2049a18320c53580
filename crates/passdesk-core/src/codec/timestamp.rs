//! ISO-8601 UTC timestamps and minute-resolution local datetime strings.
//!
//! The local form carries no zone; it is read and written as UTC wall time.
//! Going from ISO to local drops seconds and sub-second digits, so a
//! timestamp with sub-minute precision does not survive a round trip.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{PassError, Result};

/// Output layout of [`iso_to_local`].
pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

const LOCAL_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// `2025-07-26T14:00:59.250Z` to `2025-07-26T14:00`.
///
/// Any RFC 3339 offset is accepted and normalized to UTC first.
///
/// ```
/// use passdesk_core::codec::iso_to_local;
///
/// assert_eq!(iso_to_local("2025-07-26T14:00:00Z").unwrap(), "2025-07-26T14:00");
/// assert_eq!(iso_to_local("2025-07-26T15:30:00+01:00").unwrap(), "2025-07-26T14:30");
/// ```
pub fn iso_to_local(iso: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(iso.trim()).map_err(|_| PassError::timestamp(iso))?;
    Ok(parsed.with_timezone(&Utc).format(LOCAL_FORMAT).to_string())
}

/// `2025-07-26T14:00` to `2025-07-26T14:00:00Z`.
///
/// Seconds are optional on input and default to `00`.
///
/// ```
/// use passdesk_core::codec::to_iso_z;
///
/// assert_eq!(to_iso_z("2025-07-26T14:00").unwrap(), "2025-07-26T14:00:00Z");
/// assert_eq!(to_iso_z("2025-07-26T14:00:07").unwrap(), "2025-07-26T14:00:07Z");
/// assert!(to_iso_z("26/07/2025 14:00").is_err());
/// ```
pub fn to_iso_z(local: &str) -> Result<String> {
    let naive = parse_local(local)?;
    Ok(naive
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Parse the local form into a naive datetime.
pub fn parse_local(local: &str) -> Result<NaiveDateTime> {
    let text = local.trim();
    NaiveDateTime::parse_from_str(text, LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, LOCAL_FORMAT_SECONDS))
        .map_err(|_| PassError::timestamp(local))
}

/// Parse an ISO wire timestamp into UTC.
pub fn parse_iso(iso: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(iso.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| PassError::timestamp(iso))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_to_local_truncates_seconds() {
        assert_eq!(iso_to_local("2025-07-26T14:00:45.123Z").unwrap(), "2025-07-26T14:00");
    }

    #[test]
    fn test_iso_to_local_normalizes_offset_across_midnight() {
        assert_eq!(iso_to_local("2025-01-01T00:30:00+02:00").unwrap(), "2024-12-31T22:30");
    }

    #[test]
    fn test_to_iso_z_defaults_seconds() {
        assert_eq!(to_iso_z("2025-10-10T19:00").unwrap(), "2025-10-10T19:00:00Z");
    }

    #[test]
    fn test_round_trip_minute_resolution() {
        let local = "2025-05-23T13:00";
        assert_eq!(iso_to_local(&to_iso_z(local).unwrap()).unwrap(), local);
    }

    #[test]
    fn test_malformed_input() {
        for bad in ["", "2025-07-26", "14:00", "2025-13-01T00:00", "2025-07-26T25:00", "yesterday"] {
            assert!(
                matches!(to_iso_z(bad), Err(PassError::InvalidTimestamp { .. })),
                "{bad:?}"
            );
        }
        for bad in ["", "2025-07-26T14:00", "2025-07-26 14:00:00", "not a date"] {
            assert!(
                matches!(iso_to_local(bad), Err(PassError::InvalidTimestamp { .. })),
                "{bad:?}"
            );
        }
    }
}
