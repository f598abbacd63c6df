//! Itinerary set validation.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. the response has journeys,
//! 2. every journey and leg is structurally complete,
//! 3. the journey vector echoes the resolved names,
//! 4. the request URI echoes the preference, if one was given,
//! 5. the fastest journey is selected,
//! 6. for `leasttime`, the fastest journey is the shortest one,
//! 7. the fastest journey is not stale.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::domain::{Itinerary, ItineraryError, convert_journeys};
use crate::tfl::JourneySetResponse;

use super::config::ValidationConfig;

/// Preference whose fastest journey must also be the shortest.
pub const LEAST_TIME: &str = "leasttime";

/// Which side of the journey a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

/// What the response is expected to reflect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectations {
    /// Journey preference sent with the request.
    pub preference: Option<String>,
    /// Canonical origin name.
    pub from: String,
    /// Canonical destination name.
    pub to: String,
    /// When the final request was issued.
    pub request_time: NaiveDateTime,
}

/// Why an itinerary set was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    /// Missing, empty, or incomplete journeys
    #[error(transparent)]
    Structure(#[from] ItineraryError),

    /// The echoed journey vector routed a different place
    #[error("journey vector {side} is {actual:?}, expected {expected:?}")]
    VectorMismatch {
        side: Side,
        expected: String,
        actual: Option<String>,
    },

    /// The echoed request URI does not carry the preference
    #[error("request URI {uri:?} does not contain preference {preference:?}")]
    PreferenceNotEchoed {
        preference: String,
        uri: Option<String>,
    },

    /// The fastest journey is not the shortest one
    #[error("fastest journey takes {fastest_mins} min but the shortest takes {minimum_mins} min")]
    FastestNotMinimal { fastest_mins: i64, minimum_mins: i64 },

    /// The fastest journey starts too long before the request
    #[error(
        "fastest journey starts at {start}, more than {tolerance_mins} min before the request at {request_time}"
    )]
    Stale {
        start: NaiveDateTime,
        request_time: NaiveDateTime,
        tolerance_mins: i64,
    },
}

/// An itinerary set that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedJourneys {
    /// All itineraries, in response order.
    pub itineraries: Vec<Itinerary>,
    /// Index of the fastest itinerary.
    pub fastest_index: usize,
}

impl ValidatedJourneys {
    /// The fastest itinerary.
    pub fn fastest(&self) -> &Itinerary {
        &self.itineraries[self.fastest_index]
    }
}

/// Validate a journey response against expectations.
pub fn validate(
    response: &JourneySetResponse,
    expected: &Expectations,
    config: &ValidationConfig,
) -> Result<ValidatedJourneys, ValidationFailure> {
    // 1 and 2
    let itineraries = convert_journeys(response.journeys.as_deref())?;
    debug!(count = itineraries.len(), "itineraries structurally valid");

    // 3
    let vector = response.journey_vector.as_ref();
    check_vector_side(Side::From, vector.and_then(|v| v.from.as_deref()), &expected.from)?;
    check_vector_side(Side::To, vector.and_then(|v| v.to.as_deref()), &expected.to)?;

    // 4
    let preference = expected
        .preference
        .as_deref()
        .filter(|p| !p.trim().is_empty());
    if let Some(preference) = preference {
        let uri = vector.and_then(|v| v.uri.clone());
        let echoed = uri
            .as_deref()
            .is_some_and(|u| u.to_lowercase().contains(&preference.to_lowercase()));
        if !echoed {
            return Err(ValidationFailure::PreferenceNotEchoed {
                preference: preference.to_string(),
                uri,
            });
        }
    }

    // 5
    let fastest_index = fastest_index(&itineraries).ok_or(ItineraryError::NoJourneys)?;
    let fastest = &itineraries[fastest_index];
    debug!(
        index = fastest_index,
        duration_mins = fastest.duration_mins,
        start = %fastest.start,
        "fastest itinerary"
    );

    // 6
    if preference.is_some_and(|p| p.trim().eq_ignore_ascii_case(LEAST_TIME)) {
        let minimum_mins = itineraries
            .iter()
            .map(|i| i.duration_mins)
            .min()
            .unwrap_or(fastest.duration_mins);
        if fastest.duration_mins != minimum_mins {
            return Err(ValidationFailure::FastestNotMinimal {
                fastest_mins: fastest.duration_mins,
                minimum_mins,
            });
        }
    }

    // 7
    check_freshness(
        fastest.start,
        expected.request_time,
        config.freshness_tolerance(),
    )?;

    Ok(ValidatedJourneys {
        itineraries,
        fastest_index,
    })
}

/// Index of the shortest itinerary; ties keep the earliest.
pub fn fastest_index(itineraries: &[Itinerary]) -> Option<usize> {
    itineraries
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, i64)>, (i, itinerary)| match best {
            Some((_, best_mins)) if itinerary.duration_mins < best_mins => {
                Some((i, itinerary.duration_mins))
            }
            Some(current) => Some(current),
            None => Some((i, itinerary.duration_mins)),
        })
        .map(|(i, _)| i)
}

/// Check that `start` is no earlier than `request_time - tolerance`.
///
/// A tolerance reaching past the earliest representable time accepts every
/// start.
pub fn check_freshness(
    start: NaiveDateTime,
    request_time: NaiveDateTime,
    tolerance: Duration,
) -> Result<(), ValidationFailure> {
    match request_time.checked_sub_signed(tolerance) {
        Some(earliest) if start < earliest => Err(ValidationFailure::Stale {
            start,
            request_time,
            tolerance_mins: tolerance.num_minutes(),
        }),
        _ => Ok(()),
    }
}

fn check_vector_side(
    side: Side,
    actual: Option<&str>,
    expected: &str,
) -> Result<(), ValidationFailure> {
    let matches = actual.is_some_and(|a| a.trim().eq_ignore_ascii_case(expected.trim()));
    if !matches {
        return Err(ValidationFailure::VectorMismatch {
            side,
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
        });
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Leg;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn itinerary(duration_mins: i64) -> Itinerary {
        Itinerary {
            start: NaiveDate::from_ymd_opt(2026, 1, 7)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            arrival: None,
            duration_mins,
            legs: vec![Leg {
                duration_mins,
                summary: "s".into(),
                detail: "d".into(),
                departure: None,
                arrival: None,
                is_disrupted: false,
            }],
        }
    }

    proptest! {
        /// The selected itinerary always has the minimum duration, and is
        /// the first one that does.
        #[test]
        fn fastest_is_minimum(durations in prop::collection::vec(1i64..600, 1..20)) {
            let itineraries: Vec<_> = durations.iter().copied().map(itinerary).collect();
            let index = fastest_index(&itineraries).unwrap();
            let minimum = *durations.iter().min().unwrap();

            prop_assert_eq!(itineraries[index].duration_mins, minimum);
            prop_assert_eq!(index, durations.iter().position(|d| *d == minimum).unwrap());
        }

        /// Starts at or after the tolerance boundary pass; one second before fails.
        #[test]
        fn freshness_boundary(offset_secs in 0i64..86_400, tolerance_mins in 0i64..30) {
            let request = NaiveDate::from_ymd_opt(2026, 1, 7)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            let tolerance = Duration::minutes(tolerance_mins);
            let boundary = request - tolerance;

            prop_assert!(check_freshness(boundary, request, tolerance).is_ok());
            prop_assert!(check_freshness(boundary + Duration::seconds(offset_secs), request, tolerance).is_ok());
            prop_assert!(check_freshness(boundary - Duration::seconds(1), request, tolerance).is_err());
        }
    }
}
