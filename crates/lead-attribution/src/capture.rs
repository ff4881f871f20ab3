//! Attribution capture from the page location

use crate::params::AttributionParams;
use crate::storage::{load_stored_params, store_params, SessionStorage};
use std::borrow::Cow;
use url::{form_urlencoded, Url};

/// Read-only view of the current page location
///
/// Implementations return either a full URL (`https://host/path?a=b`) or just
/// its search part (`?a=b`). `None` means the location could not be read.
pub trait PageLocation: Send + Sync {
    /// Current location
    fn location(&self) -> Option<String>;
}

/// Fixed location, for tests and command-line use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation(String);

impl StaticLocation {
    /// Wrap a URL or query string
    #[inline]
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

impl PageLocation for StaticLocation {
    fn location(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<L: PageLocation + ?Sized> PageLocation for &L {
    fn location(&self) -> Option<String> {
        (**self).location()
    }
}

impl<L: PageLocation + ?Sized> PageLocation for Box<L> {
    fn location(&self) -> Option<String> {
        (**self).location()
    }
}

/// Search part of a location, without `?` and fragment
///
/// Absolute URLs are parsed; otherwise anything after `?` is the query, and
/// a string without `?` is a bare query unless it is a path.
fn query_of(location: &str) -> Cow<'_, str> {
    if let Ok(url) = Url::parse(location) {
        return Cow::Owned(url.query().unwrap_or_default().to_string());
    }

    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => Cow::Borrowed(query),
        None if without_fragment.starts_with('/') => Cow::Borrowed(""),
        None => Cow::Borrowed(without_fragment),
    }
}

/// Extract attribution params from a URL or query string
///
/// Values are form-urlencoded decoded (`+` is a space). When a key repeats,
/// the first occurrence wins. Unrecognized keys are ignored.
#[must_use]
pub fn parse_query(location: &str) -> AttributionParams {
    let mut params = AttributionParams::empty();
    let mut seen = [false; AttributionParams::KEYS.len()];

    for (key, value) in form_urlencoded::parse(query_of(location).as_bytes()) {
        let Some(index) = AttributionParams::KEYS.iter().position(|k| *k == key) else {
            continue;
        };
        if seen[index] {
            continue;
        }
        seen[index] = true;
        if let Some(slot) = params.slot_mut(&key) {
            *slot = value.into_owned();
        }
    }

    params
}

/// Captures attribution params from an injected page location
#[derive(Debug, Clone)]
pub struct AttributionCapture<L> {
    location: L,
}

impl<L: PageLocation> AttributionCapture<L> {
    /// Create capture over a location source
    #[inline]
    #[must_use]
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// Read the five recognized params from the location
    ///
    /// Never fails: an unreadable location yields all-empty params.
    #[must_use]
    pub fn capture(&self) -> AttributionParams {
        match self.location.location() {
            Some(location) => parse_query(&location),
            None => {
                tracing::debug!("page location unavailable, attribution left empty");
                AttributionParams::empty()
            }
        }
    }

    /// Capture, falling back to params stored earlier in the session
    ///
    /// A location carrying any attribution value wins and is stored for
    /// later page loads. Otherwise the stored params are returned, or
    /// all-empty params when nothing was stored.
    pub fn capture_and_persist(&self, storage: &dyn SessionStorage) -> AttributionParams {
        let captured = self.capture();
        if !captured.is_empty() {
            store_params(storage, &captured);
            return captured;
        }

        load_stored_params(storage).unwrap_or(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Unreadable;

    impl PageLocation for Unreadable {
        fn location(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn absent_params_are_empty_strings() {
        let params = parse_query("https://example.com/?utm_source=google&utm_medium=cpc");
        assert_eq!(
            params,
            AttributionParams {
                utm_source: "google".into(),
                utm_medium: "cpc".into(),
                ..AttributionParams::default()
            }
        );
    }

    #[test]
    fn accepts_search_part_and_bare_query() {
        assert_eq!(parse_query("?utm_campaign=spring").utm_campaign, "spring");
        assert_eq!(parse_query("utm_campaign=spring").utm_campaign, "spring");
        assert!(parse_query("https://example.com/landing").is_empty());
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn bare_query_values_may_contain_slashes() {
        let params = parse_query("utm_source=google&utm_content=/promo/spring");
        assert_eq!(params.utm_source, "google");
        assert_eq!(params.utm_content, "/promo/spring");

        let capture = AttributionCapture::new(StaticLocation::new("utm_source=partner.com/ref"));
        assert_eq!(capture.capture().utm_source, "partner.com/ref");
    }

    #[test]
    fn paths_without_query_are_empty() {
        assert!(parse_query("/landing").is_empty());
        assert!(parse_query("/landing#utm_source=google").is_empty());
        assert!(parse_query("https://example.com/a/b#utm_source=google").is_empty());
    }

    #[test]
    fn absolute_url_query_is_read_through_url_parsing() {
        let params = parse_query("https://example.com/p/q?utm_medium=email&utm_term=a%2Fb#top");
        assert_eq!(params.utm_medium, "email");
        assert_eq!(params.utm_term, "a/b");
    }

    #[test]
    fn decodes_and_ignores_fragment() {
        let params = parse_query("/landing?utm_term=back+pain%21&utm_content=hero#lead-form");
        assert_eq!(params.utm_term, "back pain!");
        assert_eq!(params.utm_content, "hero");
    }

    #[test]
    fn first_occurrence_wins() {
        let params = parse_query("?utm_source=a&utm_source=b&utm_source=c");
        assert_eq!(params.utm_source, "a");
    }

    #[test]
    fn unreadable_location_captures_empty() {
        let capture = AttributionCapture::new(Unreadable);
        assert!(capture.capture().is_empty());
    }
}
