//! Host timezone detection.
//!
//! The detected timezone is read once at startup and used both to seed the
//! selection with the user's own city and to mark that card throughout the
//! session. Detection failures fall back to UTC rather than erroring out.

use chrono_tz::Tz;

/// Returns the host's IANA timezone identifier, or "UTC" when the platform
/// gives no answer.
#[must_use]
pub fn detected_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Parses a timezone identifier, falling back to UTC for unknown names.
///
/// Platform timezone databases occasionally report aliases chrono-tz does
/// not know; a UTC clock is more useful than a startup failure.
#[must_use]
pub fn parse_tz(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or(chrono_tz::UTC)
}
