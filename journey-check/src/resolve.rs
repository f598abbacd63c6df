//! Location disambiguation.
//!
//! When the journey endpoint cannot match free text to a single place it
//! answers with candidate lists, each candidate carrying a `matchQuality`.
//! This module turns such a payload into one canonical name per side.

use std::fmt;

use tracing::debug;

use crate::tfl::{DisambiguationOption, DisambiguationResponse, LocationDisambiguation};

/// Name used when no usable candidate exists.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// How one side of the journey was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideResolution {
    /// The API matched the input text as-is; the name is that text.
    Identified(String),
    /// The name is the best candidate's, or [`UNKNOWN_LOCATION`].
    Disambiguated(String),
}

impl SideResolution {
    /// The canonical name for this side.
    pub fn canonical_name(&self) -> &str {
        match self {
            SideResolution::Identified(name) | SideResolution::Disambiguated(name) => name,
        }
    }

    /// True when no candidate could be used.
    pub fn is_unknown(&self) -> bool {
        matches!(self, SideResolution::Disambiguated(name) if name == UNKNOWN_LOCATION)
    }
}

impl fmt::Display for SideResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Canonical names for both sides of a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub origin: SideResolution,
    pub destination: SideResolution,
}

impl Resolution {
    /// Both sides taken verbatim from the input (no disambiguation needed).
    pub fn identified(origin: &str, destination: &str) -> Self {
        Self {
            origin: SideResolution::Identified(origin.to_string()),
            destination: SideResolution::Identified(destination.to_string()),
        }
    }
}

/// Resolve a `300 Multiple Choices` payload to canonical names.
///
/// The origin is always chosen from its candidates. The destination keeps
/// `original_destination` verbatim when the API reports it as identified;
/// otherwise it is chosen from its candidates the same way.
pub fn resolve(response: &DisambiguationResponse, original_destination: &str) -> Resolution {
    let origin = SideResolution::Disambiguated(
        best_name(response.from_location_disambiguation.as_ref(), "from"),
    );

    let destination = match response.to_location_disambiguation.as_ref() {
        Some(block) if block.is_identified() => {
            debug!(
                destination = original_destination,
                "destination already identified"
            );
            SideResolution::Identified(original_destination.to_string())
        }
        block => SideResolution::Disambiguated(best_name(block, "to")),
    };

    Resolution {
        origin,
        destination,
    }
}

/// Select the candidate with the highest match quality.
///
/// Ties keep the earliest candidate. Returns `None` for an empty list.
pub fn best_candidate(options: &[DisambiguationOption]) -> Option<&DisambiguationOption> {
    options.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.quality() > current.quality() => Some(candidate),
        Some(current) => Some(current),
        None => Some(candidate),
    })
}

fn best_name(block: Option<&LocationDisambiguation>, side: &str) -> String {
    let options = block.map(LocationDisambiguation::options).unwrap_or(&[]);

    debug!(
        side,
        candidates = ?options
            .iter()
            .map(|o| (o.common_name().unwrap_or("?"), o.quality()))
            .collect::<Vec<_>>(),
        "disambiguation candidates"
    );

    let chosen = best_candidate(options)
        .and_then(DisambiguationOption::common_name)
        .unwrap_or(UNKNOWN_LOCATION)
        .to_string();

    debug!(side, chosen = %chosen, "disambiguation winner");
    chosen
}
