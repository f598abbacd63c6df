//! TfL Unified API journey planner transport.
//!
//! This module provides the HTTP client for the `Journey/JourneyResults`
//! endpoint, a scripted mock for tests, and the DTOs for both response
//! shapes the endpoint uses.
//!
//! Key characteristics of the endpoint:
//! - Ambiguous location text yields `300 Multiple Choices` with candidate
//!   lists per side, not an error
//! - A resolved query yields `200 OK` with the itineraries and a
//!   `journeyVector` echoing what was routed
//! - Times are local London time without an offset

mod client;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, TflClient, TflConfig};
pub use error::TflError;
pub use mock::{MOCK_BASE_URL, MockTflClient};
pub use types::{
    DisambiguationOption, DisambiguationResponse, Instruction, JourneyDto, JourneySetResponse,
    JourneyVector, LegDto, LocationDisambiguation, MatchStatus, Place,
};
