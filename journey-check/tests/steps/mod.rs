//! Step definitions for the journey planning suite.

mod journey_steps;
