//! Itinerary types and conversion from API DTOs.
//!
//! An `Itinerary` is only ever built from a DTO that passed structural
//! checks, so code holding one can rely on a positive duration, at least one
//! leg, and complete instructions on every leg.

use chrono::{Duration, NaiveDateTime};

use crate::tfl::{JourneyDto, LegDto};

use super::ItineraryError;

/// Timestamp layout used by the journey API (local time, no offset).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One travel segment of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Leg duration in minutes, always positive.
    pub duration_mins: i64,
    /// Short instruction, e.g. "Central line to Bank".
    pub summary: String,
    /// Detailed instruction.
    pub detail: String,
    pub departure: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
    pub is_disrupted: bool,
}

/// A complete journey option.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// When the journey starts (API local time).
    pub start: NaiveDateTime,
    /// When the journey arrives, if reported.
    pub arrival: Option<NaiveDateTime>,
    /// Total duration in minutes, always positive.
    pub duration_mins: i64,
    /// Legs in travel order, never empty.
    pub legs: Vec<Leg>,
}

impl Itinerary {
    /// Total duration, saturating for durations chrono cannot represent.
    pub fn duration(&self) -> Duration {
        Duration::try_minutes(self.duration_mins).unwrap_or(Duration::MAX)
    }

    /// Number of legs flagged as disrupted.
    pub fn disrupted_legs(&self) -> usize {
        self.legs.iter().filter(|leg| leg.is_disrupted).count()
    }
}

/// Parse an API timestamp.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// Convert the `journeys` list of a response.
///
/// Fails on the first structural problem, in list order.
pub fn convert_journeys(journeys: Option<&[JourneyDto]>) -> Result<Vec<Itinerary>, ItineraryError> {
    let journeys = match journeys {
        Some(list) if !list.is_empty() => list,
        _ => return Err(ItineraryError::NoJourneys),
    };

    journeys
        .iter()
        .enumerate()
        .map(|(i, dto)| convert_journey(dto, i))
        .collect()
}

/// Convert a single itinerary.
pub fn convert_journey(dto: &JourneyDto, index: usize) -> Result<Itinerary, ItineraryError> {
    let path = format!("journeys[{index}]");

    let duration_mins = positive(dto.duration, &format!("{path}.duration"))?;

    let legs = match dto.legs.as_deref() {
        None => return Err(ItineraryError::MissingField(format!("{path}.legs"))),
        Some([]) => return Err(ItineraryError::NoLegs(path)),
        Some(legs) => legs
            .iter()
            .enumerate()
            .map(|(j, leg)| convert_leg(leg, &format!("{path}.legs[{j}]")))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let start = required_timestamp(dto.start_date_time.as_deref(), &format!("{path}.startDateTime"))?;
    let arrival = dto.arrival_date_time.as_deref().and_then(parse_timestamp);

    Ok(Itinerary {
        start,
        arrival,
        duration_mins,
        legs,
    })
}

fn convert_leg(dto: &LegDto, path: &str) -> Result<Leg, ItineraryError> {
    let duration_mins = positive(dto.duration, &format!("{path}.duration"))?;

    let instruction = dto
        .instruction
        .as_ref()
        .ok_or_else(|| ItineraryError::MissingField(format!("{path}.instruction")))?;
    let summary = non_blank(
        instruction.summary.as_deref(),
        &format!("{path}.instruction.summary"),
    )?;
    let detail = non_blank(
        instruction.detailed.as_deref(),
        &format!("{path}.instruction.detailed"),
    )?;

    Ok(Leg {
        duration_mins,
        summary,
        detail,
        departure: dto.departure_time.as_deref().and_then(parse_timestamp),
        arrival: dto.arrival_time.as_deref().and_then(parse_timestamp),
        is_disrupted: dto.is_disrupted.unwrap_or(false),
    })
}

fn positive(value: Option<i64>, path: &str) -> Result<i64, ItineraryError> {
    match value {
        None => Err(ItineraryError::MissingField(path.to_string())),
        Some(v) if v <= 0 => Err(ItineraryError::NonPositiveDuration {
            path: path.to_string(),
            value: v,
        }),
        Some(v) => Ok(v),
    }
}

fn non_blank(value: Option<&str>, path: &str) -> Result<String, ItineraryError> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ItineraryError::MissingField(path.to_string()))
}

fn required_timestamp(value: Option<&str>, path: &str) -> Result<NaiveDateTime, ItineraryError> {
    let raw = value.ok_or_else(|| ItineraryError::MissingField(path.to_string()))?;
    parse_timestamp(raw).ok_or_else(|| ItineraryError::InvalidTimestamp {
        path: path.to_string(),
        value: raw.to_string(),
    })
}
