//! Steps for `journey_planning` behavioural tests.

use chrono::NaiveDateTime;
use cucumber::{gherkin::Step, given, then, when};
use journey_check::{
    clock::FixedClock,
    domain::JourneyParameters,
    scenario::{RequestState, ScenarioError, Stage},
    tfl::MockTflClient,
    validate::{ValidationConfig, ValidationFailure},
};

use crate::world::{JourneyWorld, fixture, script};

#[given("the journey API is available")]
async fn api_available(world: &mut JourneyWorld) {
    let available = world.mock.is_available().await.expect("probe");
    assert!(available, "journey API is not available");
}

#[given("the journey API is down")]
async fn api_down(world: &mut JourneyWorld) {
    world.mock.set_unavailable().await;
}

#[then("the journey API reports itself unavailable")]
async fn api_unavailable(world: &mut JourneyWorld) {
    assert!(!world.mock.is_available().await.expect("probe"));
}

#[given(expr = "the time is {string}")]
fn time_is(world: &mut JourneyWorld, at: String) {
    let at = NaiveDateTime::parse_from_str(&at, "%Y-%m-%d %H:%M").expect("timestamp");
    world.clock = FixedClock(at);
}

#[given(expr = "the API answers {int} with {string}")]
async fn api_answers(world: &mut JourneyWorld, status: u16, name: String) {
    world
        .mock
        .push_file(status, fixture(&name))
        .await
        .expect("fixture loads");
}

#[given(expr = "the API follows the {string} script")]
fn api_script(world: &mut JourneyWorld, name: String) {
    world.mock = MockTflClient::from_dir(script(&name)).expect("script loads");
}

#[given(expr = "a journey from {string} to {string}")]
fn journey_from_to(world: &mut JourneyWorld, from: String, to: String) {
    world.ctx.origin = from;
    world.ctx.destination = to;
}

#[given(expr = "the journey preference is {string}")]
fn preference(world: &mut JourneyWorld, value: String) {
    world.ctx.set_preference(value);
}

#[given("the journey parameters:")]
fn parameters(world: &mut JourneyWorld, step: &Step) {
    let table = step.table.as_ref().expect("parameter table");
    world.ctx.parameters = JourneyParameters::from_rows(&table.rows);
}

#[given(expr = "a freshness tolerance of {int} minute(s)")]
fn tolerance(world: &mut JourneyWorld, minutes: u32) {
    world.config = ValidationConfig::new(minutes);
}

#[when("the journey is planned")]
async fn plan(world: &mut JourneyWorld) {
    world.plan().await;
}

#[then("the journey is valid")]
fn journey_valid(world: &mut JourneyWorld) {
    let journeys = world.journeys();
    assert!(!journeys.itineraries.is_empty());
    for itinerary in &journeys.itineraries {
        assert!(itinerary.duration_mins > 0);
        for leg in &itinerary.legs {
            assert!(leg.duration_mins > 0);
            assert!(!leg.summary.is_empty());
            assert!(!leg.detail.is_empty());
        }
    }
    assert_eq!(world.ctx.state, RequestState::Resolved);
    assert_eq!(world.ctx.last_status(), Some(200));
}

#[then(expr = "the fastest journey takes {int} minutes")]
fn fastest_takes(world: &mut JourneyWorld, minutes: i64) {
    let journeys = world.journeys();
    assert_eq!(journeys.fastest().duration_mins, minutes);
    let minimum = journeys.itineraries.iter().map(|i| i.duration_mins).min();
    assert_eq!(minimum, Some(minutes));
}

#[then(expr = "{int} itinerary/itineraries has/have disrupted legs")]
fn disrupted_itineraries(world: &mut JourneyWorld, count: usize) {
    let disrupted = world
        .journeys()
        .itineraries
        .iter()
        .filter(|i| i.disrupted_legs() > 0)
        .count();
    assert_eq!(disrupted, count);
}

#[then(expr = "{int} request(s) was/were made")]
async fn requests_made(world: &mut JourneyWorld, count: usize) {
    assert_eq!(world.mock.requests().await.len(), count);
    assert_eq!(world.ctx.round_trips, count);
    assert_eq!(world.ctx.requested_urls.len(), count);
}

#[then(expr = "the origin resolves to {string}")]
fn origin_is(world: &mut JourneyWorld, name: String) {
    assert_eq!(world.ctx.canonical_origin(), name);
}

#[then(expr = "the origin does not resolve to {string}")]
fn origin_is_not(world: &mut JourneyWorld, name: String) {
    assert!(world.ctx.resolution.is_some(), "locations were never resolved");
    assert_ne!(world.ctx.canonical_origin(), name);
}

#[then(expr = "the destination resolves to {string}")]
fn destination_is(world: &mut JourneyWorld, name: String) {
    assert_eq!(world.ctx.canonical_destination(), name);
}

#[then(expr = "the last request URL contains {string}")]
async fn last_url_contains(world: &mut JourneyWorld, fragment: String) {
    let requests = world.mock.requests().await;
    let last = requests.last().expect("a request was made");
    assert!(last.contains(&fragment), "{last} does not contain {fragment}");
}

#[then(expr = "every request URL ends with {string}")]
fn every_url_ends_with(world: &mut JourneyWorld, suffix: String) {
    assert!(!world.ctx.requested_urls.is_empty());
    for url in &world.ctx.requested_urls {
        assert!(url.ends_with(&suffix), "{url} does not end with {suffix}");
    }
}

#[then(expr = "the echoed request URI contains {string}")]
fn echoed_uri_contains(world: &mut JourneyWorld, fragment: String) {
    let body = &world.ctx.last_response.as_ref().expect("a response").body;
    let uri = body["journeyVector"]["uri"].as_str().unwrap_or_default();
    assert!(
        uri.to_lowercase().contains(&fragment.to_lowercase()),
        "{uri} does not contain {fragment}"
    );
}

#[then(expr = "planning fails on the {word} request with status {int}")]
fn fails_with_status(world: &mut JourneyWorld, which: String, status: u16) {
    let expected_stage = match which.as_str() {
        "initial" => Stage::Initial,
        "follow-up" => Stage::FollowUp,
        other => panic!("unknown request stage {other}"),
    };
    match world.error() {
        ScenarioError::UnexpectedStatus { stage, actual, .. } => {
            assert_eq!(*stage, expected_stage);
            assert_eq!(*actual, status);
        }
        other => panic!("expected an unexpected status, got {other:?}"),
    }
}

#[then("the fastest journey is reported stale")]
fn reported_stale(world: &mut JourneyWorld) {
    assert!(
        matches!(
            world.error(),
            ScenarioError::Validation(ValidationFailure::Stale { .. })
        ),
        "expected a stale journey, got {:?}",
        world.error()
    );
}
