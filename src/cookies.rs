//! Cookie header helpers.

use axum::http::{header, HeaderMap};

/// Name of the HubSpot visitor tracking cookie.
pub const HUBSPOT_TRACKING_COOKIE: &str = "hubspotutk";

/// Looks up a cookie by exact name in a raw `Cookie` header value.
///
/// Pairs are separated by `;` and split at the first `=`. The first pair
/// whose trimmed key matches wins. An empty value counts as absent.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Extracts the `hubspotutk` tracking token from a raw `Cookie` header.
pub fn tracking_token(cookie_header: &str) -> Option<String> {
    cookie_value(cookie_header, HUBSPOT_TRACKING_COOKIE).map(str::to_string)
}

/// Scans every `Cookie` header on the request for the tracking token.
pub fn tracking_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(tracking_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_between_other_cookies() {
        assert_eq!(
            tracking_token("foo=bar; hubspotutk=ABC123; other=1"),
            Some("ABC123".to_string())
        );
    }

    #[test]
    fn test_token_at_end_and_start() {
        assert_eq!(
            tracking_token("foo=bar;hubspotutk=xyz"),
            Some("xyz".to_string())
        );
        assert_eq!(
            tracking_token("hubspotutk=first; foo=bar"),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(tracking_token(""), None);
        assert_eq!(tracking_token("foo=bar; other=1"), None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        assert_eq!(tracking_token("hubspotutk=; foo=bar"), None);
        assert_eq!(tracking_token("hubspotutk="), None);
    }

    #[test]
    fn test_overlapping_key_prefixes_do_not_match() {
        assert_eq!(tracking_token("xhubspotutk=nope; foo=bar"), None);
        assert_eq!(tracking_token("hubspotutk_old=nope"), None);
        assert_eq!(
            tracking_token("xhubspotutk=nope; hubspotutk=yes"),
            Some("yes".to_string())
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(
            cookie_value("session=a=b=c; x=1", "session"),
            Some("a=b=c")
        );
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            tracking_token("hubspotutk=one; hubspotutk=two"),
            Some("one".to_string())
        );
    }

    #[test]
    fn test_from_headers_scans_all_cookie_values() {
        let mut headers = HeaderMap::new();
        assert_eq!(tracking_token_from_headers(&headers), None);

        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("hubspotutk=ABC123; other=1"),
        );
        assert_eq!(
            tracking_token_from_headers(&headers),
            Some("ABC123".to_string())
        );
    }
}
