//! Scenario-scoped state.

use chrono::NaiveDateTime;

use crate::domain::{JourneyParameters, ParamKey};
use crate::resolve::Resolution;
use crate::validate::Expectations;

use super::orchestrator::{RequestState, ScenarioError, TransportResponse};

/// Mutable state for one scenario.
///
/// Created when a scenario starts and dropped when it ends; nothing in it
/// outlives the scenario. Steps receive it by `&mut`.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    /// Origin text as supplied by the scenario.
    pub origin: String,
    /// Destination text as supplied by the scenario.
    pub destination: String,
    /// Query parameters for every request in the scenario.
    pub parameters: JourneyParameters,
    /// When the most recent request was issued.
    pub request_time: Option<NaiveDateTime>,
    /// Canonical names once the locations have been resolved.
    pub resolution: Option<Resolution>,
    /// Last response received, whatever its status.
    pub last_response: Option<TransportResponse>,
    /// Where the request protocol got to.
    pub state: RequestState,
    /// Requests issued in the current attempt.
    pub round_trips: usize,
    /// URLs requested in the current attempt, in order.
    pub requested_urls: Vec<String>,
}

impl ScenarioContext {
    /// Start a scenario for `origin` → `destination`.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Replace the scenario's parameters.
    pub fn with_parameters(mut self, parameters: JourneyParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the journey preference.
    pub fn set_preference(&mut self, preference: impl Into<String>) {
        self.parameters.set(ParamKey::JourneyPreference, preference);
    }

    /// The journey preference, if any.
    pub fn preference(&self) -> Option<&str> {
        self.parameters.preference()
    }

    /// Canonical origin name, or the raw input before resolution.
    pub fn canonical_origin(&self) -> &str {
        self.resolution
            .as_ref()
            .map_or(self.origin.as_str(), |r| r.origin.canonical_name())
    }

    /// Canonical destination name, or the raw input before resolution.
    pub fn canonical_destination(&self) -> &str {
        self.resolution
            .as_ref()
            .map_or(self.destination.as_str(), |r| r.destination.canonical_name())
    }

    /// Status of the last response, if any.
    pub fn last_status(&self) -> Option<u16> {
        self.last_response.as_ref().map(|r| r.status)
    }

    /// Clear per-attempt state before a new request sequence.
    pub fn reset_attempt(&mut self) {
        self.request_time = None;
        self.resolution = None;
        self.last_response = None;
        self.state = RequestState::Querying;
        self.round_trips = 0;
        self.requested_urls.clear();
    }

    /// What the final response should reflect.
    pub fn expectations(&self) -> Result<Expectations, ScenarioError> {
        let request_time = self.request_time.ok_or(ScenarioError::NotRequested)?;
        Ok(Expectations {
            preference: self.preference().map(str::to_string),
            from: self.canonical_origin().to_string(),
            to: self.canonical_destination().to_string(),
            request_time,
        })
    }
}
