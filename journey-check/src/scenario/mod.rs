//! Scenario orchestration: the request protocol and its per-scenario state.

mod context;
mod orchestrator;

pub use context::ScenarioContext;
pub use orchestrator::{
    JourneyOrchestrator, JourneyTransport, RequestState, STATUS_MULTIPLE_CHOICES, STATUS_OK,
    ScenarioError, Stage, TransportResponse,
};
