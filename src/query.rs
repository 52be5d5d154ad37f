//! Query string assembly for the optional endpoint parameters.
//!
//! Parameters are emitted in the order they are pushed. Absent values emit nothing, lists
//! repeat the parameter name once per element and booleans are written as `true`/`false`.
//! Identifiers and numbers are written verbatim; free text and timestamps are percent-encoded.

use std::fmt::{self, Display};

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A parameter that accepts either one value or several.
#[derive(Clone, Debug, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(values: [T; N]) -> Self {
        OneOrMany::Many(values.into())
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

/// Percent-encodes a free-text value or path segment.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Ordered `name=value` pairs; values are stored already encoded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier or numeric value, written verbatim.
    pub fn param<T: Display>(&mut self, name: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    /// Free text, percent-encoded.
    pub fn text(&mut self, name: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((name, encode_component(value)));
        }
        self
    }

    /// ISO 8601 UTC timestamp, percent-encoded.
    pub fn timestamp(&mut self, name: &'static str, value: Option<&DateTime<Utc>>) -> &mut Self {
        if let Some(value) = value {
            let formatted = value.to_rfc3339_opts(SecondsFormat::Secs, true);
            self.pairs.push((name, encode_component(&formatted)));
        }
        self
    }

    /// Repeated-key encoding: one pair per element, in order.
    pub fn many<T: Display>(&mut self, name: &'static str, values: Option<&OneOrMany<T>>) -> &mut Self {
        for value in values.map(OneOrMany::as_slice).unwrap_or_default() {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    pub fn flag(&mut self, name: &'static str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((name, if value { "true" } else { "false" }.to_owned()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends the query to `endpoint`, choosing `?` or `&` as separator.
    pub fn append_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            return endpoint.to_owned();
        }
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{separator}{self}")
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Implemented by every optional-parameter set of the endpoint catalog.
pub trait ToQuery {
    fn to_query(&self) -> QueryString;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_list_then_text() {
        let route_types = OneOrMany::Many(vec![0, 1]);
        let mut query = QueryString::new();
        query
            .many("route_types", Some(&route_types))
            .text("route_name", Some("Flinders St"));
        assert_eq!(
            query.to_string(),
            "route_types=0&route_types=1&route_name=Flinders%20St"
        );
    }

    #[test]
    fn test_booleans_are_literal() {
        let mut query = QueryString::new();
        query.flag("gtfs", Some(true));
        assert_eq!(query.to_string(), "gtfs=true");

        let mut query = QueryString::new();
        query.flag("gtfs", Some(false));
        assert_eq!(query.to_string(), "gtfs=false");
    }

    #[test]
    fn test_absent_values_skipped() {
        let mut query = QueryString::new();
        query
            .param::<u32>("max_results", None)
            .text("route_name", None)
            .flag("gtfs", None)
            .many::<u32>("route_types", None)
            .many("platform_numbers", Some(&OneOrMany::<u32>::Many(vec![])));
        assert!(query.is_empty());
        assert_eq!(query.append_to("/v3/routes"), "/v3/routes");
    }

    #[test]
    fn test_single_value_list() {
        let mut query = QueryString::new();
        query.many("route_types", Some(&OneOrMany::One(2)));
        assert_eq!(query.to_string(), "route_types=2");
    }

    #[test]
    fn test_identifiers_verbatim() {
        let mut query = QueryString::new();
        query.param("direction_id", Some(14)).param("max_distance", Some(300.5));
        assert_eq!(query.to_string(), "direction_id=14&max_distance=300.5");
    }

    #[test]
    fn test_timestamp_encoded() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let mut query = QueryString::new();
        query.timestamp("date_utc", Some(&date));
        assert_eq!(query.to_string(), "date_utc=2024-05-01T08%3A30%3A00Z");
    }

    #[test]
    fn test_append_separator() {
        let mut query = QueryString::new();
        query.param("max_results", Some(5));
        assert_eq!(query.append_to("/v3/outlets"), "/v3/outlets?max_results=5");
        assert_eq!(
            query.append_to("/v3/outlets?gtfs=true"),
            "/v3/outlets?gtfs=true&max_results=5"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Flinders St"), "Flinders%20St");
        assert_eq!(encode_component("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(encode_component("stop_1-2.3~"), "stop_1-2.3~");
    }
}
