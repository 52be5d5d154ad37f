//! Request signing for the PTV Timetable API.
//!
//! Every authenticated request carries the developer id as a `devid` query parameter, and a
//! `signature` parameter holding the HMAC-SHA1 of the path and query (host excluded), keyed
//! with the developer's API key.

use std::fmt;

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

pub const API_HOST: &str = "https://timetableapi.ptv.vic.gov.au";

/// Developer id and API key issued by PTV.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    dev_id: String,
    api_key: String,
}

impl Credentials {
    /// Both values may be numeric or textual tokens.
    pub fn new(dev_id: impl ToString, api_key: impl ToString) -> Self {
        Self {
            dev_id: dev_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn dev_id(&self) -> &str {
        &self.dev_id
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("dev_id", &self.dev_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Returns the signed URL for `endpoint` against the public API host.
///
/// ```
/// let url = ptvdata::build_signed_url("/v3/routes", 3000123, "9c132d31-6a30-4cac-8d8b-8a1970834799").unwrap();
/// assert!(url.starts_with("https://timetableapi.ptv.vic.gov.au/v3/routes?devid=3000123&signature="));
/// ```
pub fn build_signed_url(
    endpoint: &str,
    dev_id: impl fmt::Display,
    api_key: impl fmt::Display,
) -> Result<String> {
    signed_url(API_HOST, endpoint, &dev_id.to_string(), &api_key.to_string())
}

/// Same as [build_signed_url] against an arbitrary host. The host is not part of the signed
/// string, so the signature only depends on the endpoint, dev id and key.
pub fn signed_url(host: &str, endpoint: &str, dev_id: &str, api_key: &str) -> Result<String> {
    let raw = signed_path(endpoint, dev_id)?;
    let signature = compute_signature(api_key, &raw);
    Ok(format!("{host}{raw}&signature={signature}"))
}

/// The string that gets signed: the endpoint followed by the `devid` parameter.
fn signed_path(endpoint: &str, dev_id: &str) -> Result<String> {
    if !endpoint.starts_with('/') {
        return Err(Error::InvalidEndpoint(endpoint.to_owned()));
    }
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{endpoint}{separator}devid={dev_id}"))
}

/// Lowercase hex HMAC-SHA1 of `data`.
pub fn compute_signature(api_key: &str, data: &str) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha1::new_from_slice(api_key.as_bytes()).expect("HMAC can take any size");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "9c132d31-6a30-4cac-8d8b-8a1970834799";

    #[test]
    fn test_signature_vector() {
        // Wikipedia HMAC-SHA1 example
        let signature = compute_signature("key", "The quick brown fox jumps over the lazy dog");
        assert_eq!(signature, "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9");
    }

    #[test]
    fn test_signed_url_shape() {
        let url = build_signed_url("/v3/route_types", 3000123, KEY).unwrap();
        let expected_sig = compute_signature(KEY, "/v3/route_types?devid=3000123");
        assert_eq!(
            url,
            format!(
                "https://timetableapi.ptv.vic.gov.au/v3/route_types?devid=3000123&signature={expected_sig}"
            )
        );
        assert_eq!(expected_sig.len(), 40);
        assert!(expected_sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_existing_query_uses_ampersand() {
        let url = build_signed_url("/v3/routes?route_types=0", "3000123", KEY).unwrap();
        assert!(url.contains("/v3/routes?route_types=0&devid=3000123&signature="));
        let expected_sig = compute_signature(KEY, "/v3/routes?route_types=0&devid=3000123");
        assert!(url.ends_with(&expected_sig));
    }

    #[test]
    fn test_deterministic_signature() {
        let first = build_signed_url("/v3/routes", 1, KEY).unwrap();
        let second = build_signed_url("/v3/routes", 1, KEY).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_key_change_changes_signature() {
        let first = build_signed_url("/v3/routes", 1, KEY).unwrap();
        let second = build_signed_url("/v3/routes", 1, "8c132d31-6a30-4cac-8d8b-8a1970834799").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_missing_leading_slash() {
        let result = build_signed_url("routes", 1, KEY);
        assert!(matches!(result, Err(Error::InvalidEndpoint(e)) if e == "routes"));
    }

    #[test]
    fn test_host_not_signed() {
        let public = signed_url(API_HOST, "/v3/routes", "1", KEY).unwrap();
        let local = signed_url("http://127.0.0.1:8080", "/v3/routes", "1", KEY).unwrap();
        let sig = |url: &str| url.rsplit_once("signature=").map(|(_, s)| s.to_owned());
        assert_eq!(sig(&public), sig(&local));
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new(3000123, KEY);
        let printed = format!("{creds:?}");
        assert!(printed.contains("3000123"));
        assert!(!printed.contains(KEY));
    }
}
