//! Background city-insight fetching with fallback.
//!
//! The insight service is an external collaborator: it gets a city name and
//! its current local time and returns a short blurb. Any failure along the
//! way (no endpoint configured, network error, malformed JSON, schema miss)
//! collapses into the fixed fallback triple at this boundary, so nothing
//! upstream ever sees an error. Fetches run on a background thread and
//! report back over a channel polled from the event loop, so the clock
//! display never waits on the network.

use anyhow::{Context, Result};
use serde_json::json;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use crate::models::{City, CityInsight};

/// Environment variable naming the insight service endpoint.
pub const ENDPOINT_ENV: &str = "GLOBAL_CLOCK_INSIGHT_URL";
/// Environment variable holding the insight service API key.
pub const API_KEY_ENV: &str = "GLOBAL_CLOCK_INSIGHT_KEY";

/// Request timeout for a single insight fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Client for the remote insight service.
#[derive(Debug, Clone)]
pub struct InsightClient {
    endpoint: Option<String>,
    api_key: Option<String>,
    http: Option<reqwest::blocking::Client>,
}

impl InsightClient {
    /// Creates a client with an explicit endpoint and optional API key.
    #[must_use]
    pub fn new(endpoint: Option<String>, api_key: Option<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .ok();
        Self {
            endpoint,
            api_key,
            http,
        }
    }

    /// Creates a client configured from the environment.
    ///
    /// Without `GLOBAL_CLOCK_INSIGHT_URL` set every fetch yields the
    /// fallback insight, which keeps the dashboard fully usable offline.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    /// Fetches an insight for a city, never failing.
    ///
    /// This blocks for up to the request timeout; callers on the UI path go
    /// through [`InsightState::start_fetch`] instead.
    #[must_use]
    pub fn fetch(&self, city_name: &str, local_time: &str) -> CityInsight {
        self.request(city_name, local_time)
            .unwrap_or_else(|_| CityInsight::fallback())
    }

    /// The fallible request path; every error is collapsed by [`Self::fetch`].
    fn request(&self, city_name: &str, local_time: &str) -> Result<CityInsight> {
        let endpoint = self
            .endpoint
            .as_deref()
            .context("No insight endpoint configured")?;
        let http = self.http.as_ref().context("HTTP client unavailable")?;

        let mut request = http.post(endpoint).json(&json!({
            "cityName": city_name,
            "localTime": local_time,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().context("Insight request failed")?;
        let response = response
            .error_for_status()
            .context("Insight service returned an error status")?;

        let insight: CityInsight = response
            .json()
            .context("Insight response was not valid JSON for the expected schema")?;

        if !insight.is_valid() {
            anyhow::bail!("Insight response failed schema validation");
        }

        Ok(insight)
    }
}

impl Default for InsightClient {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Message sent from the fetch thread back to the event loop.
#[derive(Debug, Clone)]
pub enum InsightMessage {
    /// Fetch finished; `insight` is the response or the fallback.
    Complete { city_id: String, insight: CityInsight },
}

/// Tracks in-flight and completed insight fetches across the session.
///
/// One fetch runs at a time; results are kept per city id for the rest of
/// the session (they are never persisted).
#[derive(Debug, Default)]
pub struct InsightState {
    receiver: Option<Receiver<InsightMessage>>,
    loading: Option<String>,
    results: HashMap<String, CityInsight>,
}

impl InsightState {
    /// Creates a new idle insight state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is currently running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Whether a fetch for this specific city is running.
    #[must_use]
    pub fn is_loading_city(&self, city_id: &str) -> bool {
        self.loading.as_deref() == Some(city_id)
    }

    /// The fetched insight for a city, if one completed this session.
    #[must_use]
    pub fn get(&self, city_id: &str) -> Option<&CityInsight> {
        self.results.get(city_id)
    }

    /// Drops the stored insight for a city (used when its card is removed).
    pub fn forget(&mut self, city_id: &str) {
        self.results.remove(city_id);
    }

    /// Polls the fetch channel for a completed result.
    ///
    /// Returns true if a message was received.
    pub fn poll(&mut self) -> bool {
        if let Some(receiver) = &self.receiver {
            match receiver.try_recv() {
                Ok(message) => {
                    self.handle_message(message);
                    true
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => false,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    // Thread finished without reporting; treat as done.
                    self.receiver = None;
                    self.loading = None;
                    false
                }
            }
        } else {
            false
        }
    }

    fn handle_message(&mut self, message: InsightMessage) {
        match message {
            InsightMessage::Complete { city_id, insight } => {
                self.results.insert(city_id, insight);
                self.receiver = None;
                self.loading = None;
            }
        }
    }

    /// Starts a background fetch for a city.
    ///
    /// # Errors
    ///
    /// Returns an error if a fetch is already in progress.
    pub fn start_fetch(
        &mut self,
        client: &InsightClient,
        city: &City,
        local_time: String,
    ) -> Result<()> {
        if self.is_loading() {
            anyhow::bail!("Insight fetch already in progress");
        }

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        self.loading = Some(city.id.clone());

        let client = client.clone();
        let city_id = city.id.clone();
        let city_name = city.name.clone();

        thread::spawn(move || {
            let insight = client.fetch(&city_name, &local_time);
            // Receiver may be gone if the app quit; nothing to do then.
            let _ = sender.send(InsightMessage::Complete { city_id, insight });
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_client_falls_back() {
        let client = InsightClient::new(None, None);
        let insight = client.fetch("Seoul", "21:00:00");
        assert_eq!(insight, CityInsight::fallback());
    }

    #[test]
    fn test_unreachable_endpoint_falls_back() {
        // Reserved TEST-NET-1 address; connection fails fast or times out,
        // and either way the fallback comes back instead of an error.
        let client = InsightClient::new(Some("http://192.0.2.1:9/insight".to_string()), None);
        let insight = client.fetch("Seoul", "21:00:00");
        assert_eq!(insight, CityInsight::fallback());
    }

    #[test]
    fn test_state_starts_idle() {
        let state = InsightState::new();
        assert!(!state.is_loading());
        assert!(state.get("seoul").is_none());
    }

    #[test]
    fn test_state_complete_message_stores_result() {
        let mut state = InsightState::new();
        state.loading = Some("seoul".to_string());
        state.handle_message(InsightMessage::Complete {
            city_id: "seoul".to_string(),
            insight: CityInsight::fallback(),
        });
        assert!(!state.is_loading());
        assert_eq!(state.get("seoul"), Some(&CityInsight::fallback()));
    }

    #[test]
    fn test_state_rejects_concurrent_fetch() {
        let mut state = InsightState::new();
        state.loading = Some("seoul".to_string());
        let client = InsightClient::new(None, None);
        let city = crate::catalog::find("tokyo").unwrap();
        assert!(state
            .start_fetch(&client, &city, "12:00:00".to_string())
            .is_err());
    }

    #[test]
    fn test_state_forget() {
        let mut state = InsightState::new();
        state
            .results
            .insert("seoul".to_string(), CityInsight::fallback());
        state.forget("seoul");
        assert!(state.get("seoul").is_none());
    }

    #[test]
    fn test_fetch_round_trip_through_state() {
        // Unconfigured client resolves quickly with the fallback; drive the
        // poll loop the way the TUI does.
        let mut state = InsightState::new();
        let client = InsightClient::new(None, None);
        let city = crate::catalog::find("seoul").unwrap();
        state
            .start_fetch(&client, &city, "21:00:00".to_string())
            .unwrap();
        assert!(state.is_loading_city("seoul"));

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while state.get("seoul").is_none() && std::time::Instant::now() < deadline {
            state.poll();
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(state.get("seoul"), Some(&CityInsight::fallback()));
        assert!(!state.is_loading());
    }
}
