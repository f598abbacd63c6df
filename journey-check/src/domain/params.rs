//! Journey query parameters.
//!
//! A small ordered bag of named options that is turned into the query string
//! of a journey request. Values are kept as the scenario supplied them and
//! only normalized for the wire when the request URL is built.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Literal date token resolved to the upcoming Wednesday.
pub const NEXT_WEDNESDAY: &str = "next wednesday";

/// A parameter name understood by the journey endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Travel date, sent as `YYYYMMDD`.
    Date,
    /// Travel time, sent as `HHMM`.
    Time,
    /// Whether `time` is a departure or arrival time.
    ///
    /// Sent as `timeIs`, the name the journey endpoint reads; `timels` is
    /// only accepted as an input spelling.
    TimeIs,
    /// `leasttime`, `leastinterchange`, `leastwalking`.
    JourneyPreference,
    /// Any other endpoint option, passed through verbatim.
    Other(String),
}

impl ParamKey {
    /// Parse a key name as written in a scenario table.
    ///
    /// Matching is case-insensitive. `timels` and `timeLeavingOrArriving` are
    /// accepted as spellings of `timeIs`.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "date" => ParamKey::Date,
            "time" => ParamKey::Time,
            "timeis" | "timels" | "timeleavingorarriving" => ParamKey::TimeIs,
            "journeypreference" | "preference" => ParamKey::JourneyPreference,
            _ => ParamKey::Other(trimmed.to_string()),
        }
    }

    /// The query-string name sent to the endpoint.
    pub fn as_str(&self) -> &str {
        match self {
            ParamKey::Date => "date",
            ParamKey::Time => "time",
            ParamKey::TimeIs => "timeIs",
            ParamKey::JourneyPreference => "journeyPreference",
            ParamKey::Other(name) => name,
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of journey query parameters.
///
/// Insertion order is preserved and is the order used on the wire. Setting a
/// key that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneyParameters {
    entries: Vec<(ParamKey, String)>,
}

impl JourneyParameters {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`JourneyParameters::set`].
    pub fn with(mut self, key: ParamKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a parameter, replacing any previous value for the same key.
    pub fn set(&mut self, key: ParamKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Build parameters from table rows of `[key, value]`.
    ///
    /// The first row is a header and is skipped. Rows with fewer than two
    /// cells are ignored.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut params = Self::new();
        for row in rows.iter().skip(1) {
            if let [key, value, ..] = row.as_slice() {
                params.set(ParamKey::parse(key), value.trim());
            }
        }
        params
    }

    /// Look up a raw value.
    pub fn get(&self, key: &ParamKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The journey preference, if one was given with a non-empty value.
    pub fn preference(&self) -> Option<&str> {
        self.get(&ParamKey::JourneyPreference)
            .filter(|v| !v.trim().is_empty())
    }

    /// True when no parameter carries a value worth sending.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.trim().is_empty())
    }

    /// Iterate the raw entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Wire-ready `(name, value)` pairs.
    ///
    /// Empty values are dropped. `date` values equal to [`NEXT_WEDNESDAY`] are
    /// resolved against `today`; time values lose their `:` separators.
    pub fn query_pairs(&self, today: NaiveDate) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(key, value)| {
                let value = value.trim();
                let wire = match key {
                    ParamKey::Date => resolve_date(value, today),
                    ParamKey::Time | ParamKey::TimeIs => compact_time(value),
                    _ => value.to_string(),
                };
                (key.as_str().to_string(), wire)
            })
            .collect()
    }
}

/// Resolve a `date` value to the form sent to the endpoint.
pub fn resolve_date(value: &str, today: NaiveDate) -> String {
    if value.trim().eq_ignore_ascii_case(NEXT_WEDNESDAY) {
        next_wednesday(today).format("%Y%m%d").to_string()
    } else {
        value.to_string()
    }
}

/// The upcoming Wednesday, counting `today` itself when it is a Wednesday.
///
/// The offset from `today` is always in `0..=6`.
pub fn next_wednesday(today: NaiveDate) -> NaiveDate {
    let target = Weekday::Wed.num_days_from_monday();
    let current = today.weekday().num_days_from_monday();
    let offset = (target + 7 - current) % 7;
    today + Duration::days(i64::from(offset))
}

/// Strip `:` separators from a time value (`08:30` becomes `0830`).
pub fn compact_time(value: &str) -> String {
    value.chars().filter(|c| *c != ':').collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The resolved date is always a Wednesday within the next six days.
        #[test]
        fn next_wednesday_invariant(days in 0i64..200_000) {
            let today = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days);
            let wed = next_wednesday(today);
            let offset = (wed - today).num_days();

            prop_assert_eq!(wed.weekday(), Weekday::Wed);
            prop_assert!((0..=6).contains(&offset));
            if today.weekday() == Weekday::Wed {
                prop_assert_eq!(offset, 0);
            }
        }

        /// Compacted times never contain a separator.
        #[test]
        fn compact_time_has_no_colon(h in 0u32..24, m in 0u32..60) {
            let compact = compact_time(&format!("{h:02}:{m:02}"));
            prop_assert!(!compact.contains(':'));
            prop_assert_eq!(compact.len(), 4);
        }
    }
}
