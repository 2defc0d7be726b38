//! City reference data with timezone and geographic coordinates.

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::LOCAL_CITY_ID;

/// A selectable city with its timezone and geographic metadata.
///
/// Catalog entries are immutable reference data. The only non-catalog
/// instance is the synthesized "Current Location" city created when the
/// host's detected timezone matches no catalog entry; it carries the
/// `lat = lng = 0.0` sentinel (see [`City::has_known_position`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Stable unique identifier (e.g., "seoul")
    pub id: String,
    /// Display name (e.g., "Seoul")
    pub name: String,
    /// Country label (e.g., "South Korea")
    pub country: String,
    /// IANA timezone identifier (e.g., "Asia/Seoul")
    pub timezone: String,
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lng: f64,
}

impl City {
    /// Creates a new city entry.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        timezone: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            timezone: timezone.into(),
            lat,
            lng,
        }
    }

    /// Creates the synthesized "Current Location" city for a detected
    /// timezone that matches no catalog entry.
    ///
    /// Uses neutral (0, 0) coordinates as the "position unknown" sentinel.
    #[must_use]
    pub fn detected(timezone: impl Into<String>) -> Self {
        Self::new(LOCAL_CITY_ID, "Current Location", "Detected", timezone, 0.0, 0.0)
    }

    /// Parses the city's IANA timezone identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is not a known IANA timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {e}", self.timezone))
    }

    /// Whether this city carries real coordinates.
    ///
    /// False only for the synthesized detected-location entry, whose (0, 0)
    /// sentinel should be displayed as "Detected Location" rather than as a
    /// point in the Gulf of Guinea.
    #[must_use]
    pub fn has_known_position(&self) -> bool {
        self.lat != 0.0 || self.lng != 0.0
    }

    /// Validates coordinate ranges for catalog entries.
    ///
    /// # Errors
    ///
    /// Returns an error if latitude or longitude is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            anyhow::bail!("City '{}' has latitude {} out of [-90, 90]", self.id, self.lat);
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            anyhow::bail!(
                "City '{}' has longitude {} out of [-180, 180]",
                self.id,
                self.lng
            );
        }
        Ok(())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}
