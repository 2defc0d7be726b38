//! Catalog-wide property tests: every built-in city must have a resolvable
//! timezone, render a well-formed clock, and project onto the map.

use globalclock::models::City;
use globalclock::{catalog, clock, projector};

#[test]
fn test_every_city_timezone_resolves() {
    for city in catalog::all_cities() {
        assert!(
            city.tz().is_ok(),
            "city '{}' has unresolvable timezone '{}'",
            city.id,
            city.timezone
        );
    }
}

#[test]
fn test_every_city_validates() {
    for city in catalog::all_cities() {
        assert!(city.validate().is_ok(), "city '{}' failed validation", city.id);
    }
}

#[test]
fn test_every_city_renders_a_clock() {
    for city in catalog::all_cities() {
        let tz = city.tz().unwrap();
        let time = clock::city_time_now(tz);

        assert_eq!(time.clock.len(), 8, "bad clock for '{}'", city.id);
        assert_eq!(
            time.clock.matches(':').count(),
            2,
            "bad clock for '{}': {}",
            city.id,
            time.clock
        );
        assert!(!time.date.is_empty());
        assert!(!time.offset_label().is_empty());
    }
}

#[test]
fn test_every_city_projects_onto_the_map() {
    for city in catalog::all_cities() {
        let (x, y) = projector::project(city.lat, city.lng);
        assert!((0.0..=100.0).contains(&x), "x out of range for '{}'", city.id);
        assert!((0.0..=100.0).contains(&y), "y out of range for '{}'", city.id);
    }
}

#[test]
fn test_known_positions_are_distinct() {
    let cities = catalog::all_cities();
    for (i, a) in cities.iter().enumerate() {
        for b in &cities[i + 1..] {
            let pa = projector::project(a.lat, a.lng);
            let pb = projector::project(b.lat, b.lng);
            assert_ne!(pa, pb, "'{}' and '{}' overlap on the map", a.id, b.id);
        }
    }
}

#[test]
fn test_search_matches_name_and_country() {
    let by_name = catalog::search("toky", &[]);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "tokyo");

    let by_country = catalog::search("south korea", &[]);
    assert_eq!(by_country.len(), 1);
    assert_eq!(by_country[0].id, "seoul");
}

#[test]
fn test_search_excludes_selected_cities() {
    let selected = vec!["london".to_string()];
    let results = catalog::search("lon", &selected);
    assert!(results.iter().all(|c| c.id != "london"));
}

#[test]
fn test_search_empty_query_returns_nothing() {
    assert!(catalog::search("", &[]).is_empty());
}

#[test]
fn test_detected_city_sentinel_has_no_position() {
    let local = City::detected("Antarctica/Troll".to_string());
    assert!(!local.has_known_position());
    assert!(local.tz().is_ok());
    assert_eq!(local.name, "Current Location");
}
