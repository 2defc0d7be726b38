//! Timezone-aware clock formatting.
//!
//! Pure functions turning a moment in time plus an IANA timezone into the
//! strings and flags a clock card displays. Everything here is re-derived on
//! every frame; nothing is cached between ticks.

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Local hour (inclusive) at which daylight begins.
const DAYLIGHT_START_HOUR: u32 = 6;
/// Local hour (exclusive) at which daylight ends.
const DAYLIGHT_END_HOUR: u32 = 18;

/// Formatted display state for one city at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTime {
    /// 24-hour clock, "HH:MM:SS"
    pub clock: String,
    /// Short weekday, short month, day-of-month, e.g. "Sat Aug 30"
    pub date: String,
    /// True when the city's local hour is in [6, 18)
    pub is_daylight: bool,
    /// Rounded wall-clock hour difference relative to the observer
    pub offset_hours: i64,
}

impl CityTime {
    /// Human label for the hour offset: "Current", "+9h", or "-3h".
    #[must_use]
    pub fn offset_label(&self) -> String {
        match self.offset_hours {
            0 => "Current".to_string(),
            h if h > 0 => format!("+{h}h"),
            h => format!("{h}h"),
        }
    }

    /// Day/night badge text matching the dashboard wording.
    #[must_use]
    pub fn daylight_label(&self) -> &'static str {
        if self.is_daylight {
            "Daylight"
        } else {
            "Midnight"
        }
    }
}

/// Computes the display state for a city timezone at a given instant.
///
/// `observer_local` is the observer's own wall clock at the same instant,
/// used for the hour-offset comparison.
///
/// The offset is deliberately NOT the difference of true UTC offsets: the
/// city's wall-clock reading is reinterpreted as a plain timestamp and
/// diffed against the observer's plain local timestamp, then rounded to the
/// nearest hour. This mirrors the long-standing dashboard behavior,
/// including its quirks around half-hour zones and date boundaries; see
/// the tests before "fixing" it.
#[must_use]
pub fn city_time(tz: Tz, now: DateTime<Utc>, observer_local: NaiveDateTime) -> CityTime {
    let city = now.with_timezone(&tz);
    let city_naive = city.naive_local();

    let clock = city.format("%H:%M:%S").to_string();
    let date = city.format("%a %b %-d").to_string();

    let hour = city.hour();
    let is_daylight = (DAYLIGHT_START_HOUR..DAYLIGHT_END_HOUR).contains(&hour);

    // Round minutes to the nearest hour so half-hour zones (e.g. Asia/Kolkata)
    // land on a whole number, matching the displayed "+Nh" granularity.
    let diff_minutes = (city_naive - observer_local).num_minutes();
    let offset_hours = (diff_minutes as f64 / 60.0).round() as i64;

    CityTime {
        clock,
        date,
        is_daylight,
        offset_hours,
    }
}

/// Computes the display state for a city timezone right now, using the
/// host's own local wall clock as the observer.
#[must_use]
pub fn city_time_now(tz: Tz) -> CityTime {
    city_time(tz, Utc::now(), Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// A fixed instant: 2024-06-15 12:00:00 UTC.
    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// The observer's wall clock if they were in UTC at that instant.
    fn utc_observer() -> NaiveDateTime {
        noon_utc().naive_utc()
    }

    #[test]
    fn test_clock_string_is_24h() {
        let t = city_time(chrono_tz::Asia::Tokyo, noon_utc(), utc_observer());
        // 12:00 UTC = 21:00 JST
        assert_eq!(t.clock, "21:00:00");
    }

    #[test]
    fn test_date_string_format() {
        let t = city_time(chrono_tz::UTC, noon_utc(), utc_observer());
        assert_eq!(t.date, "Sat Jun 15");
    }

    #[test]
    fn test_daylight_boundaries() {
        // 05:59 local is night, 06:00 is day, 17:59 is day, 18:00 is night
        let cases = [
            (Utc.with_ymd_and_hms(2024, 6, 15, 5, 59, 0).unwrap(), false),
            (Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap(), true),
            (Utc.with_ymd_and_hms(2024, 6, 15, 17, 59, 59).unwrap(), true),
            (Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap(), false),
        ];
        for (instant, expect_day) in cases {
            let t = city_time(chrono_tz::UTC, instant, instant.naive_utc());
            assert_eq!(t.is_daylight, expect_day, "at {instant}");
        }
    }

    #[test]
    fn test_daylight_follows_city_not_observer() {
        // 12:00 UTC is 21:00 in Tokyo: night there, day for a UTC observer.
        let tokyo = city_time(chrono_tz::Asia::Tokyo, noon_utc(), utc_observer());
        assert!(!tokyo.is_daylight);
        let london = city_time(chrono_tz::Europe::London, noon_utc(), utc_observer());
        assert!(london.is_daylight);
    }

    #[test]
    fn test_offset_whole_hours() {
        let t = city_time(chrono_tz::Asia::Tokyo, noon_utc(), utc_observer());
        assert_eq!(t.offset_hours, 9);
        assert_eq!(t.offset_label(), "+9h");

        let t = city_time(chrono_tz::America::New_York, noon_utc(), utc_observer());
        assert_eq!(t.offset_hours, -4); // EDT in June
        assert_eq!(t.offset_label(), "-4h");
    }

    #[test]
    fn test_offset_zero_is_current() {
        let t = city_time(chrono_tz::UTC, noon_utc(), utc_observer());
        assert_eq!(t.offset_hours, 0);
        assert_eq!(t.offset_label(), "Current");
    }

    #[test]
    fn test_offset_half_hour_zone_rounds() {
        // Asia/Kolkata is UTC+5:30; f64::round is half-away-from-zero,
        // so +5.5 displays as +6.
        let t = city_time(chrono_tz::Asia::Kolkata, noon_utc(), utc_observer());
        assert_eq!(t.offset_hours, 6);
    }

    #[test]
    fn test_offset_crosses_date_boundary() {
        // Known quirk of the wall-clock heuristic: the diff is taken between
        // full naive timestamps, so when the city is already on the next
        // calendar day the offset stays correct (+13 here, not -11). This
        // pins the behavior the display depends on.
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 23, 0, 0).unwrap();
        let t = city_time(chrono_tz::Pacific::Auckland, instant, instant.naive_utc());
        // 23:00 UTC Jan 15 = 12:00 NZDT Jan 16
        assert_eq!(t.offset_hours, 13);
        assert_eq!(t.clock, "12:00:00");
    }

    #[test]
    fn test_daylight_label() {
        let day = city_time(chrono_tz::UTC, noon_utc(), utc_observer());
        assert_eq!(day.daylight_label(), "Daylight");
        let midnight = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let night = city_time(chrono_tz::UTC, midnight, midnight.naive_utc());
        assert_eq!(night.daylight_label(), "Midnight");
    }
}
