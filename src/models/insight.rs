//! Per-city insight blurb returned by the remote text service.

use serde::{Deserialize, Serialize};

/// Short descriptive blurb about a city at its current local time.
///
/// Ephemeral: fetched on demand, never persisted or cached across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInsight {
    /// Short summary of what's likely happening in the city right now
    pub summary: String,
    /// One cultural fact or tip
    pub culture_tip: String,
    /// Single word or short phrase describing the vibe
    pub current_vibe: String,
}

impl CityInsight {
    /// The fixed fallback used whenever the remote service fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            summary: "Explore the beauty of this metropolis.".to_string(),
            culture_tip: "Each city has its own rhythm.".to_string(),
            current_vibe: "Active".to_string(),
        }
    }

    /// Schema validation: all three fields must be present and non-empty.
    ///
    /// Deserialization already guarantees presence; this rejects responses
    /// that technically parse but carry empty strings.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.summary.trim().is_empty()
            && !self.culture_tip.trim().is_empty()
            && !self.current_vibe.trim().is_empty()
    }
}
