//! Static catalog of selectable cities.
//!
//! The catalog is fixed reference data: id, display name, country, IANA
//! timezone, and coordinates for each city. Lookups by id drive shared-link
//! and persisted-state resolution; the timezone lookup backs detection of
//! the user's own city at startup.

use crate::models::City;

/// Raw catalog rows: (id, name, country, timezone, lat, lng).
const CATALOG: &[(&str, &str, &str, &str, f64, f64)] = &[
    ("seoul", "Seoul", "South Korea", "Asia/Seoul", 37.5665, 126.978),
    ("newyork", "New York", "USA", "America/New_York", 40.7128, -74.006),
    ("london", "London", "UK", "Europe/London", 51.5074, -0.1278),
    ("tokyo", "Tokyo", "Japan", "Asia/Tokyo", 35.6895, 139.6917),
    ("paris", "Paris", "France", "Europe/Paris", 48.8566, 2.3522),
    ("dubai", "Dubai", "UAE", "Asia/Dubai", 25.2048, 55.2708),
    ("sydney", "Sydney", "Australia", "Australia/Sydney", -33.8688, 151.2093),
    ("saopaulo", "São Paulo", "Brazil", "America/Sao_Paulo", -23.5505, -46.6333),
    ("berlin", "Berlin", "Germany", "Europe/Berlin", 52.52, 13.405),
    ("singapore", "Singapore", "Singapore", "Asia/Singapore", 1.3521, 103.8198),
    ("losangeles", "Los Angeles", "USA", "America/Los_Angeles", 34.0522, -118.2437),
    ("mumbai", "Mumbai", "India", "Asia/Kolkata", 19.076, 72.8777),
    ("cairo", "Cairo", "Egypt", "Africa/Cairo", 30.0444, 31.2357),
];

/// Returns all catalog cities.
#[must_use]
pub fn all_cities() -> Vec<City> {
    CATALOG
        .iter()
        .map(|&(id, name, country, timezone, lat, lng)| {
            City::new(id, name, country, timezone, lat, lng)
        })
        .collect()
}

/// Looks up a catalog city by its stable identifier.
///
/// Returns `None` for unknown ids; callers treat a miss as a non-fatal,
/// expected condition (stale shared links, renamed ids).
#[must_use]
pub fn find(id: &str) -> Option<City> {
    CATALOG
        .iter()
        .find(|(cid, ..)| *cid == id)
        .map(|&(cid, name, country, timezone, lat, lng)| {
            City::new(cid, name, country, timezone, lat, lng)
        })
}

/// Looks up the catalog city whose timezone identifier matches exactly.
#[must_use]
pub fn find_by_timezone(timezone: &str) -> Option<City> {
    CATALOG
        .iter()
        .find(|&&(_, _, _, tz, _, _)| tz == timezone)
        .map(|&(cid, name, country, tz, lat, lng)| City::new(cid, name, country, tz, lat, lng))
}

/// Filters the catalog by a free-text query against the current selection.
///
/// Case-insensitive substring match on city name or country; cities already
/// selected (by id) are excluded. An empty query yields no results (the
/// search panel is hidden). Returns the full match set; the presentation
/// layer caps how many are shown.
#[must_use]
pub fn search(query: &str, selected_ids: &[String]) -> Vec<City> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    all_cities()
        .into_iter()
        .filter(|city| {
            (city.name.to_lowercase().contains(&needle)
                || city.country.to_lowercase().contains(&needle))
                && !selected_ids.iter().any(|id| *id == city.id)
        })
        .collect()
}
