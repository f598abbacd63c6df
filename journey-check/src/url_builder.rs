//! Journey request URL generation.
//!
//! Builds `{base}/Journey/JourneyResults/{from}/to/{to}` URLs. Origin and
//! destination are each encoded as a single path segment, so free text such
//! as `"Flat 2/69 Notting Hill Gate"` cannot split the path.

use chrono::NaiveDate;
use url::Url;

use crate::domain::JourneyParameters;

/// Error returned when a base URL cannot carry journey paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid base URL {url:?}: {reason}")]
pub struct InvalidBaseUrl {
    url: String,
    reason: String,
}

/// Builds journey query URLs against a fixed API base.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
}

impl UrlBuilder {
    /// Create a builder for the given API base URL.
    ///
    /// The base may carry a path prefix (e.g. `https://host/tfl`); it must
    /// be a hierarchical URL such as `http` or `https`.
    pub fn new(base_url: &str) -> Result<Self, InvalidBaseUrl> {
        let base = Url::parse(base_url).map_err(|e| InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self { base })
    }

    /// Build the journey URL for `origin` → `destination`.
    ///
    /// Parameters with empty values are left out; when none remain there is
    /// no query string at all. Each name and value is encoded separately as
    /// `application/x-www-form-urlencoded`, so a space in a value becomes
    /// `+` rather than `%20`; the endpoint decodes both. `today` is only
    /// consulted to resolve a `next wednesday` date.
    pub fn build(
        &self,
        origin: &str,
        destination: &str,
        parameters: Option<&JourneyParameters>,
        today: NaiveDate,
    ) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);

        // Checked in `new`: the base can always be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["Journey", "JourneyResults", origin, "to", destination]);
        }

        let pairs = parameters
            .map(|p| p.query_pairs(today))
            .unwrap_or_default();

        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParamKey;

    const BASE: &str = "https://api.tfl.gov.uk";

    fn builder() -> UrlBuilder {
        UrlBuilder::new(BASE).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn basic_url() {
        let url = builder().build("69 Notting Hill Gate", "the Southbank Centre", None, monday());
        assert_eq!(
            url,
            "https://api.tfl.gov.uk/Journey/JourneyResults/69%20Notting%20Hill%20Gate/to/the%20Southbank%20Centre"
        );
    }

    #[test]
    fn slash_stays_inside_segment() {
        let url = builder().build("Flat 2/69 Notting Hill Gate", "SE1", None, monday());
        assert!(url.contains("/JourneyResults/Flat%202%2F69%20Notting%20Hill%20Gate/to/SE1"));
    }

    #[test]
    fn empty_parameters_have_no_query() {
        let params = JourneyParameters::new().with(ParamKey::JourneyPreference, "");
        let url = builder().build("a", "b", Some(&params), monday());
        assert!(!url.contains('?'));

        let url = builder().build("a", "b", Some(&JourneyParameters::new()), monday());
        assert!(!url.contains('?'));
    }

    #[test]
    fn parameters_in_order() {
        let params = JourneyParameters::new()
            .with(ParamKey::JourneyPreference, "leasttime")
            .with(ParamKey::Date, "next wednesday")
            .with(ParamKey::Time, "08:30")
            .with(ParamKey::TimeIs, "");

        let url = builder().build("a", "b", Some(&params), monday());
        assert!(url.ends_with("/a/to/b?journeyPreference=leasttime&date=20260107&time=0830"));
        assert!(!url.contains("timeIs"));
    }

    #[test]
    fn query_values_are_form_encoded() {
        let params = JourneyParameters::new()
            .with(ParamKey::Other("via".into()), "Bank & Monument");
        let url = builder().build("a", "b", Some(&params), monday());
        assert!(url.ends_with("/a/to/b?via=Bank+%26+Monument"));

        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<_> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("via".to_string(), "Bank & Monument".to_string())]);
    }

    #[test]
    fn base_with_path_prefix() {
        let builder = UrlBuilder::new("http://localhost:8080/tfl/").unwrap();
        let url = builder.build("a", "b", None, monday());
        assert_eq!(url, "http://localhost:8080/tfl/Journey/JourneyResults/a/to/b");
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(UrlBuilder::new("not a url").is_err());
        assert!(UrlBuilder::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn building_is_idempotent() {
        let params = JourneyParameters::new().with(ParamKey::Date, "next wednesday");
        let b = builder();
        assert_eq!(
            b.build("x", "y", Some(&params), monday()),
            b.build("x", "y", Some(&params), monday())
        );
    }
}
