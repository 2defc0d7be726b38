//! Ordered city selection with initialization, mutation, and persistence.
//!
//! The selection is the only mutable shared state in the application. It is
//! owned here and mutated exclusively through [`Selection::add`] and
//! [`Selection::remove`]; every mutation persists the current id list.

use crate::catalog;
use crate::models::City;
use crate::share;
use crate::store::HubStore;

/// The user's current ordered, de-duplicated set of displayed cities.
///
/// Invariants, maintained by construction:
/// - no duplicate city ids;
/// - after [`Selection::initialize`], exactly one entry's timezone matches
///   the host's detected timezone.
#[derive(Debug)]
pub struct Selection {
    cities: Vec<City>,
    detected_timezone: String,
    store: HubStore,
}

impl Selection {
    /// Builds the initial selection from the three seed sources in priority
    /// order: shared link, then persisted store, then empty.
    ///
    /// Ids that resolve to no catalog entry are silently dropped; a stale
    /// share link should degrade, not error. If none of the resolved cities
    /// live in the detected timezone, the matching catalog city (or a
    /// synthesized "Current Location" entry when the catalog has no match)
    /// is prepended, so the user's own clock is always on the board.
    #[must_use]
    pub fn initialize(
        shared_input: Option<&str>,
        store: HubStore,
        detected_timezone: String,
    ) -> Self {
        let shared_ids = shared_input.and_then(share::parse_shared_ids);

        let seed_ids: Vec<String> = if let Some(ids) = shared_ids {
            ids
        } else if let Some(persisted) = store.load() {
            persisted
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect()
        } else {
            Vec::new()
        };

        let mut cities: Vec<City> = Vec::new();
        for id in &seed_ids {
            if cities.iter().any(|c| c.id == *id) {
                continue;
            }
            if let Some(city) = catalog::find(id) {
                cities.push(city);
            }
        }

        let local_present = cities.iter().any(|c| c.timezone == detected_timezone);
        if !local_present {
            let local = catalog::find_by_timezone(&detected_timezone)
                .unwrap_or_else(|| City::detected(detected_timezone.clone()));
            cities.insert(0, local);
        }

        let selection = Self {
            cities,
            detected_timezone,
            store,
        };
        selection.persist();
        selection
    }

    /// Appends a city unless one with the same id is already selected.
    ///
    /// Returns true when the selection changed.
    pub fn add(&mut self, city: City) -> bool {
        if self.cities.iter().any(|c| c.id == city.id) {
            return false;
        }
        self.cities.push(city);
        self.persist();
        true
    }

    /// Removes the city with the given id. Unknown ids leave the selection
    /// unchanged (idempotent).
    pub fn remove(&mut self, id: &str) {
        let before = self.cities.len();
        self.cities.retain(|c| c.id != id);
        if self.cities.len() != before {
            self.persist();
        }
    }

    /// Writes the current id list to the store.
    ///
    /// Skipped while the selection is empty so a half-initialized session
    /// never clobbers previously persisted state. Store failures are
    /// swallowed: mutation already succeeded in memory and the dashboard
    /// keeps running session-only.
    pub fn persist(&self) {
        if self.cities.is_empty() {
            return;
        }
        let _ = self.store.save(&self.joined_ids());
    }

    /// Produces the shareable URL encoding the current selection.
    #[must_use]
    pub fn share_url(&self) -> String {
        share::share_url(&self.ids())
    }

    /// The selected cities in display order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Selected city ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.cities.iter().map(|c| c.id.clone()).collect()
    }

    fn joined_ids(&self) -> String {
        self.ids().join(",")
    }

    /// Whether this card shows the user's own detected location.
    #[must_use]
    pub fn is_local(&self, city: &City) -> bool {
        city.timezone == self.detected_timezone
    }

    /// The timezone identifier detected for this session.
    #[must_use]
    pub fn detected_timezone(&self) -> &str {
        &self.detected_timezone
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
