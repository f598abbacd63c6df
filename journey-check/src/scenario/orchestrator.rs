//! Two-phase journey request protocol.
//!
//! A journey query either answers `200 OK` with itineraries, or `300
//! Multiple Choices` with location candidates. In the second case the
//! locations are resolved and the query is issued once more with the
//! canonical names. There is no retry: any other status, or a second `300`,
//! ends the scenario.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::resolve::{Resolution, resolve};
use crate::tfl::{DisambiguationResponse, JourneySetResponse, TflError};
use crate::url_builder::UrlBuilder;
use crate::validate::{ValidatedJourneys, ValidationConfig, ValidationFailure, validate};

use super::context::ScenarioContext;

/// Status signalling a final itinerary response.
pub const STATUS_OK: u16 = 200;

/// Status signalling a disambiguation response.
pub const STATUS_MULTIPLE_CHOICES: u16 = 300;

/// Raw response from the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Trait for issuing journey requests.
///
/// This abstraction allows the orchestrator to be tested with scripted
/// responses.
#[allow(async_fn_in_trait)]
pub trait JourneyTransport {
    /// GET `url` and return its status and JSON body.
    async fn request(&self, url: &str) -> Result<TransportResponse, TflError>;
}

/// Where the request protocol has got to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    /// Initial query issued (or about to be).
    #[default]
    Querying,
    /// A `300` arrived; resolving and re-querying.
    AwaitingDisambiguation,
    /// A `200` arrived.
    Resolved,
}

/// Which request of the protocol a failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The query with the scenario's own location text.
    Initial,
    /// The query with the resolved canonical names.
    FollowUp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Initial => f.write_str("initial request"),
            Stage::FollowUp => f.write_str("follow-up request"),
        }
    }
}

/// Errors that end a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The API answered with a status the protocol does not allow here
    #[error("{stage}: expected status {expected}, got {actual}")]
    UnexpectedStatus {
        stage: Stage,
        expected: &'static str,
        actual: u16,
    },

    /// The response body does not have the expected shape
    #[error("{stage}: malformed response body: {message}")]
    MalformedBody { stage: Stage, message: String },

    /// Origin or destination text was never supplied
    #[error("no {0} given")]
    MissingInput(&'static str),

    /// Validation was attempted before any request was made
    #[error("no journey request has been made")]
    NotRequested,

    /// Transport failure
    #[error(transparent)]
    Transport(#[from] TflError),

    /// The itinerary set failed validation
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

/// Drives the request protocol for one scenario.
pub struct JourneyOrchestrator<'a, T, C> {
    transport: &'a T,
    urls: &'a UrlBuilder,
    clock: &'a C,
}

impl<'a, T: JourneyTransport, C: Clock> JourneyOrchestrator<'a, T, C> {
    /// Create an orchestrator over a transport, URL builder and clock.
    pub fn new(transport: &'a T, urls: &'a UrlBuilder, clock: &'a C) -> Self {
        Self {
            transport,
            urls,
            clock,
        }
    }

    /// Run the request protocol for the context's origin and destination.
    ///
    /// On success the context holds the resolution, the final response and
    /// the time the final request was issued.
    pub async fn plan(
        &self,
        ctx: &mut ScenarioContext,
    ) -> Result<JourneySetResponse, ScenarioError> {
        if ctx.origin.trim().is_empty() {
            return Err(ScenarioError::MissingInput("origin"));
        }
        if ctx.destination.trim().is_empty() {
            return Err(ScenarioError::MissingInput("destination"));
        }

        ctx.reset_attempt();

        let origin = ctx.origin.clone();
        let destination = ctx.destination.clone();
        let first = self.issue(ctx, &origin, &destination).await?;

        let (response, stage) = match first.status {
            STATUS_OK => {
                ctx.resolution = Some(Resolution::identified(&origin, &destination));
                (first, Stage::Initial)
            }
            STATUS_MULTIPLE_CHOICES => {
                ctx.state = RequestState::AwaitingDisambiguation;
                let payload: DisambiguationResponse = parse_body(&first.body, Stage::Initial)?;
                ctx.last_response = Some(first);

                let resolution = resolve(&payload, &destination);
                info!(
                    from = %resolution.origin,
                    to = %resolution.destination,
                    "resolved journey locations"
                );
                ctx.resolution = Some(resolution.clone());

                let second = self
                    .issue(
                        ctx,
                        resolution.origin.canonical_name(),
                        resolution.destination.canonical_name(),
                    )
                    .await?;

                if second.status != STATUS_OK {
                    warn!(status = second.status, "follow-up request not resolved");
                    let actual = second.status;
                    ctx.last_response = Some(second);
                    return Err(ScenarioError::UnexpectedStatus {
                        stage: Stage::FollowUp,
                        expected: "200",
                        actual,
                    });
                }
                (second, Stage::FollowUp)
            }
            actual => {
                warn!(status = actual, "initial request rejected");
                ctx.last_response = Some(first);
                return Err(ScenarioError::UnexpectedStatus {
                    stage: Stage::Initial,
                    expected: "200 or 300",
                    actual,
                });
            }
        };

        ctx.state = RequestState::Resolved;
        let journeys: JourneySetResponse = parse_body(&response.body, stage)?;
        ctx.last_response = Some(response);
        Ok(journeys)
    }

    /// Run the request protocol and validate the final response.
    pub async fn plan_and_validate(
        &self,
        ctx: &mut ScenarioContext,
        config: &ValidationConfig,
    ) -> Result<ValidatedJourneys, ScenarioError> {
        let response = self.plan(ctx).await?;
        let expected = ctx.expectations()?;
        Ok(validate(&response, &expected, config)?)
    }

    async fn issue(
        &self,
        ctx: &mut ScenarioContext,
        origin: &str,
        destination: &str,
    ) -> Result<TransportResponse, ScenarioError> {
        let now = self.clock.now();
        let url = self
            .urls
            .build(origin, destination, Some(&ctx.parameters), now.date());

        ctx.request_time = Some(now);
        ctx.round_trips += 1;
        ctx.requested_urls.push(url.clone());
        info!(%url, attempt = ctx.round_trips, "requesting journey");

        let response = self.transport.request(&url).await?;
        debug!(status = response.status, body = %response.body, "journey response");
        Ok(response)
    }
}

fn parse_body<T: DeserializeOwned + Default>(
    body: &serde_json::Value,
    stage: Stage,
) -> Result<T, ScenarioError> {
    if body.is_null() {
        return Ok(T::default());
    }
    T::deserialize(body).map_err(|e| ScenarioError::MalformedBody {
        stage,
        message: e.to_string(),
    })
}
