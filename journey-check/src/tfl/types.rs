//! TfL Journey Planner response DTOs.
//!
//! These types map directly to the `Journey/JourneyResults` JSON responses.
//! Almost every field is an `Option` because the API omits fields freely and
//! the validator needs to report which one is missing rather than fail to
//! deserialize.

use serde::Deserialize;

/// Body of a `300 Multiple Choices` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisambiguationResponse {
    /// Candidates for the origin text.
    pub from_location_disambiguation: Option<LocationDisambiguation>,

    /// Candidates for the destination text.
    pub to_location_disambiguation: Option<LocationDisambiguation>,

    /// Candidates for a via point, if one was requested.
    pub via_location_disambiguation: Option<LocationDisambiguation>,
}

/// Disambiguation block for one side of the journey.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDisambiguation {
    /// Whether the API could match the supplied text.
    pub match_status: Option<MatchStatus>,

    /// Ranked candidate places.
    pub disambiguation_options: Option<Vec<DisambiguationOption>>,
}

impl LocationDisambiguation {
    /// Candidate options, empty when the list is absent.
    pub fn options(&self) -> &[DisambiguationOption] {
        self.disambiguation_options.as_deref().unwrap_or(&[])
    }

    /// True when the API already matched the input to a unique place.
    pub fn is_identified(&self) -> bool {
        matches!(self.match_status, Some(MatchStatus::Identified))
    }
}

/// Match status reported per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// The input matched a unique place.
    Identified,
    /// Several candidates are offered.
    List,
    /// Nothing matched.
    NotIdentified,
    /// Any value this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A single disambiguation candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisambiguationOption {
    /// Value to send back as the location parameter (e.g. a stop ID).
    pub parameter_value: Option<String>,

    /// API URI for this candidate.
    pub uri: Option<String>,

    /// The place this candidate refers to.
    pub place: Option<Place>,

    /// Confidence score; higher is better.
    pub match_quality: Option<f64>,
}

impl DisambiguationOption {
    /// The candidate's display name, if it has one.
    pub fn common_name(&self) -> Option<&str> {
        self.place
            .as_ref()
            .and_then(|p| p.common_name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    /// Match quality, with a missing score ranking as zero.
    pub fn quality(&self) -> f64 {
        self.match_quality.unwrap_or(0.0)
    }
}

/// A place referenced by a disambiguation candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Human-readable name (e.g. "Southbank Centre").
    pub common_name: Option<String>,

    /// Kind of place (`StopPoint`, `PointOfInterest`, `Address`, ...).
    pub place_type: Option<String>,

    /// Latitude.
    pub lat: Option<f64>,

    /// Longitude.
    pub lon: Option<f64>,
}

/// Body of a `200 OK` journey response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySetResponse {
    /// Candidate itineraries.
    pub journeys: Option<Vec<JourneyDto>>,

    /// Echo of the resolved query.
    pub journey_vector: Option<JourneyVector>,
}

/// One itinerary as returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    /// Local start time, `YYYY-MM-DDTHH:MM:SS`.
    pub start_date_time: Option<String>,

    /// Local arrival time, `YYYY-MM-DDTHH:MM:SS`.
    pub arrival_date_time: Option<String>,

    /// Total duration in minutes.
    pub duration: Option<i64>,

    /// Journey legs in travel order.
    pub legs: Option<Vec<LegDto>>,
}

/// One leg of an itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Leg duration in minutes.
    pub duration: Option<i64>,

    /// Human-readable directions.
    pub instruction: Option<Instruction>,

    /// Local departure time.
    pub departure_time: Option<String>,

    /// Local arrival time.
    pub arrival_time: Option<String>,

    /// Whether the leg is affected by a disruption.
    pub is_disrupted: Option<bool>,
}

/// Directions for a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Short form, e.g. "Central line to Bank".
    pub summary: Option<String>,

    /// Long form.
    pub detailed: Option<String>,
}

/// The server's echo of which locations and query it routed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyVector {
    /// Resolved origin.
    pub from: Option<String>,

    /// Resolved destination.
    pub to: Option<String>,

    /// Via point, if any.
    pub via: Option<String>,

    /// The request URI the server answered.
    pub uri: Option<String>,
}
