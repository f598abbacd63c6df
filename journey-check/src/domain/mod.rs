//! Domain types for journey checking.
//!
//! Query parameters sent to the journey endpoint, and the validated
//! itinerary model built from its responses. Itinerary types enforce their
//! invariants at conversion time, so code that receives them can trust
//! their shape.

mod error;
mod itinerary;
mod params;

pub use error::ItineraryError;
pub use itinerary::{Itinerary, Leg, convert_journey, convert_journeys, parse_timestamp};
pub use params::{
    JourneyParameters, NEXT_WEDNESDAY, ParamKey, compact_time, next_wednesday, resolve_date,
};
