//! Scripted journey API for testing without network access.
//!
//! Serves canned responses in order and records every URL it is asked for,
//! so tests can assert both on what the orchestrator sent and on how it
//! reacted to each status.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::scenario::{JourneyTransport, TransportResponse};

use super::error::TflError;

/// Base URL mock requests are built against.
pub const MOCK_BASE_URL: &str = "http://tfl.mock";

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<TransportResponse>,
    requests: Vec<String>,
    unavailable: bool,
}

/// Mock journey API that replays scripted responses.
///
/// Requests for the API root (`{base}/`) answer the availability probe and do
/// not consume the script.
#[derive(Debug, Clone, Default)]
pub struct MockTflClient {
    state: Arc<Mutex<MockState>>,
}

impl MockTflClient {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a script from a directory of JSON files.
    ///
    /// Files are served in file-name order. Each file is named
    /// `{order}-{status}.json` (e.g. `01-300.json`, `02-200.json`).
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TflError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| TflError::Fixture(format!("failed to read {}: {e}", dir.display())))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| TflError::Fixture(format!("failed to read directory entry: {e}")))?
                .path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(TflError::Fixture(format!(
                "no fixture files found in {}",
                dir.display()
            )));
        }

        let responses = files
            .iter()
            .map(|path| load_fixture(path))
            .collect::<Result<VecDeque<_>, _>>()?;

        Ok(Self {
            state: Arc::new(Mutex::new(MockState {
                responses,
                ..MockState::default()
            })),
        })
    }

    /// Append a response to the script.
    pub async fn push_response(&self, status: u16, body: serde_json::Value) {
        let mut state = self.state.lock().await;
        state.responses.push_back(TransportResponse { status, body });
    }

    /// Append a response whose body is read from a JSON file.
    pub async fn push_file(&self, status: u16, path: impl AsRef<Path>) -> Result<(), TflError> {
        let body = read_json(path.as_ref())?;
        self.push_response(status, body).await;
        Ok(())
    }

    /// Make the availability probe fail.
    pub async fn set_unavailable(&self) {
        self.state.lock().await.unavailable = true;
    }

    /// URLs requested so far, in order (availability probes excluded).
    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }

    /// Number of scripted responses not yet served.
    pub async fn remaining(&self) -> usize {
        self.state.lock().await.responses.len()
    }

    /// Check that the API root answers with `200 OK`.
    pub async fn is_available(&self) -> Result<bool, TflError> {
        let response = self.request(&format!("{MOCK_BASE_URL}/")).await?;
        Ok(response.status == 200)
    }
}

impl JourneyTransport for MockTflClient {
    async fn request(&self, url: &str) -> Result<TransportResponse, TflError> {
        let mut state = self.state.lock().await;

        if url.trim_end_matches('/') == MOCK_BASE_URL {
            let status = if state.unavailable { 503 } else { 200 };
            return Ok(TransportResponse {
                status,
                body: serde_json::json!({}),
            });
        }

        state.requests.push(url.to_string());
        state
            .responses
            .pop_front()
            .ok_or_else(|| TflError::MockExhausted {
                url: url.to_string(),
            })
    }
}

fn load_fixture(path: &Path) -> Result<TransportResponse, TflError> {
    let status = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.rsplit('-').next())
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| {
            TflError::Fixture(format!("no status code in file name {}", path.display()))
        })?;

    Ok(TransportResponse {
        status,
        body: read_json(path)?,
    })
}

fn read_json(path: &Path) -> Result<serde_json::Value, TflError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| TflError::Fixture(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| TflError::Fixture(format!("failed to parse {}: {e}", path.display())))
}
