//! TfL journey planner checks.
//!
//! Drives the TfL Unified API journey endpoint through its two-phase
//! protocol (disambiguate, then plan) and validates the itineraries it
//! returns: structure, echoed locations and preference, fastest selection
//! and freshness against the request time.

pub mod clock;
pub mod domain;
pub mod resolve;
pub mod scenario;
pub mod tfl;
pub mod url_builder;
pub mod validate;
