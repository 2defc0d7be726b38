//! Shared-link encoding of the city selection.
//!
//! A share link is the dashboard URL with a `cities` query parameter holding
//! the comma-joined city id list. Parsing accepts either a full URL or a
//! bare query string (with or without a leading `?`), so a pasted link and a
//! hand-typed `cities=seoul,london` both work from the command line.

use url::Url;

use crate::constants::{CITIES_PARAM, SHARE_BASE_URL};

/// Extracts the shared city id list from a URL or bare query string.
///
/// Returns `None` when no `cities` parameter is present at all, which lets
/// the caller fall through to the persisted selection. An empty parameter
/// yields an empty list, not `None`.
#[must_use]
pub fn parse_shared_ids(input: &str) -> Option<Vec<String>> {
    let query = extract_query(input)?;

    let pairs = url::form_urlencoded::parse(query.as_bytes());
    for (key, value) in pairs {
        if key == CITIES_PARAM {
            return Some(split_ids(&value));
        }
    }
    None
}

/// Builds the shareable URL for a city id list.
#[must_use]
pub fn share_url(ids: &[String]) -> String {
    // The base URL is a compile-time constant and always parses.
    let mut url = Url::parse(SHARE_BASE_URL).expect("share base URL is valid");
    url.query_pairs_mut()
        .append_pair(CITIES_PARAM, &ids.join(","));
    url.to_string()
}

/// Pulls the query-string portion out of a URL or bare query input.
fn extract_query(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        return url.query().map(String::from);
    }

    // Not an absolute URL: treat the input itself as the query string.
    Some(trimmed.trim_start_matches('?').to_string())
}

/// Splits a comma-joined id list, dropping empty fragments.
fn split_ids(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}
