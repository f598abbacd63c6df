//! Itinerary set validation.
//!
//! Turns a `200 OK` journey response into validated itineraries, selecting
//! the fastest one and checking it against the request that produced it.

mod config;
mod validator;

pub use config::{
    DEFAULT_FRESHNESS_TOLERANCE_MINS, STRICT_FRESHNESS_TOLERANCE_MINS, ValidationConfig,
};
pub use validator::{
    Expectations, LEAST_TIME, Side, ValidatedJourneys, ValidationFailure, check_freshness,
    fastest_index, validate,
};
