use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The normalized absolute form of an article URL: `scheme://host[:port]/path`.
///
/// This is the unique key of the node table, so a relative path and an
/// absolute URL pointing at the same article must end up as the same value.
/// Query and fragment are stripped during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// Parses and normalizes `raw`. Rejects anything without an explicit
    /// http(s) scheme and a host, so a schema-less seed never reaches the
    /// network.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed =
            Url::parse(raw).map_err(|e| CrawlError::InvalidUrl(format!("{raw}: {e}")))?;
        Self::from_url(&parsed)
    }

    /// Normalizes an already-parsed URL.
    pub fn from_url(parsed: &Url) -> Result<Self> {
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(CrawlError::InvalidUrl(format!(
                    "{parsed}: unsupported scheme '{other}'"
                )));
            }
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| CrawlError::InvalidUrl(format!("{parsed}: missing host")))?;

        let mut canonical = format!("{}://{}", parsed.scheme(), host);
        if let Some(port) = parsed.port() {
            canonical.push_str(&format!(":{port}"));
        }
        canonical.push_str(parsed.path());
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display fallback for articles whose page was never fetched: the last
    /// path segment with underscores turned back into spaces.
    pub fn label(&self) -> String {
        self.0
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.replace('_', " "))
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_scheme_host_path() {
        let url = CanonicalUrl::parse("https://de.wikipedia.org/wiki/Kaffee").unwrap();
        assert_eq!(url.as_str(), "https://de.wikipedia.org/wiki/Kaffee");
    }

    #[test]
    fn test_parse_strips_query_and_fragment() {
        let url =
            CanonicalUrl::parse("https://de.wikipedia.org/wiki/Kaffee?action=edit#Geschichte")
                .unwrap();
        assert_eq!(url.as_str(), "https://de.wikipedia.org/wiki/Kaffee");
    }

    #[test]
    fn test_parse_keeps_explicit_port() {
        let url = CanonicalUrl::parse("http://127.0.0.1:8080/wiki/Foo").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/wiki/Foo");
    }

    #[test]
    fn test_parse_drops_default_port() {
        let url = CanonicalUrl::parse("https://de.wikipedia.org:443/wiki/Foo").unwrap();
        assert_eq!(url.as_str(), "https://de.wikipedia.org/wiki/Foo");
    }

    #[test]
    fn test_parse_rejects_schemaless_seed() {
        assert!(CanonicalUrl::parse("de.wikipedia.org/wiki/Kaffee").is_err());
    }

    #[test]
    fn test_parse_rejects_non_http_scheme() {
        assert!(CanonicalUrl::parse("ftp://de.wikipedia.org/wiki/Kaffee").is_err());
        assert!(CanonicalUrl::parse("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_bare_host_normalizes_to_root_path() {
        let url = CanonicalUrl::parse("https://de.wikipedia.org").unwrap();
        assert_eq!(url.as_str(), "https://de.wikipedia.org/");
    }

    #[test]
    fn test_label_from_last_segment() {
        let url = CanonicalUrl::parse("https://de.wikipedia.org/wiki/Joanne_K._Rowling").unwrap();
        assert_eq!(url.label(), "Joanne K. Rowling");
    }

    #[test]
    fn test_label_falls_back_to_url() {
        let url = CanonicalUrl::parse("https://de.wikipedia.org/").unwrap();
        assert_eq!(url.label(), "https://de.wikipedia.org/");
    }

    #[test]
    fn test_relative_and_absolute_forms_collapse() {
        let base = Url::parse("https://de.wikipedia.org/wiki/Kaffee").unwrap();
        let relative = CanonicalUrl::from_url(&base.join("/wiki/Tee").unwrap()).unwrap();
        let absolute = CanonicalUrl::parse("https://de.wikipedia.org/wiki/Tee").unwrap();
        assert_eq!(relative, absolute);
    }
}
