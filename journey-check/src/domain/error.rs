//! Domain error types.
//!
//! These errors describe itinerary data that fails structural validation
//! while being converted from API DTOs. They are distinct from transport
//! errors.

/// Structural problems found while converting an itinerary response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// The response carries no `journeys` list, or an empty one
    #[error("response contains no journeys")]
    NoJourneys,

    /// A required field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A duration is zero or negative
    #[error("{path} must be positive, got {value}")]
    NonPositiveDuration { path: String, value: i64 },

    /// A journey has an empty leg list
    #[error("{0} has no legs")]
    NoLegs(String),

    /// A timestamp could not be parsed
    #[error("{path} is not a valid timestamp: {value:?}")]
    InvalidTimestamp { path: String, value: String },
}
