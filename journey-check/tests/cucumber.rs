//! Cucumber test runner for journey planning scenarios.
//!
//! Runs `tests/features/journey_planning.feature` against a scripted mock of
//! the journey API with a frozen clock, so the suite needs no network.

mod steps;

use cucumber::World;
use world::JourneyWorld;

#[tokio::main]
async fn main() {
    JourneyWorld::run("tests/features/journey_planning.feature").await;
}
