use crate::canon::CanonicalUrl;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Strategy turning raw page markup into the set of articles it references.
///
/// One extractor is chosen when a crawl is configured; the graph builder
/// never branches on page origin itself. Supporting another source or
/// locale means providing another implementation, not touching the builder.
pub trait ReferenceExtractor: Send + Sync {
    fn extract(&self, markup: &str) -> BTreeSet<CanonicalUrl>;
}

/// Path prefix of the MediaWiki article namespace.
const ARTICLE_PREFIX: &str = "/wiki/";

/// Non-article namespace prefixes on the German wikipedia.
const GERMAN_NAMESPACES: &[&str] = &[
    "Datei",
    "Spezial",
    "Kategorie",
    "Wikipedia",
    "Hilfe",
    "Portal",
];

/// Same for the English wikipedia.
const ENGLISH_NAMESPACES: &[&str] = &[
    "File",
    "Special",
    "Category",
    "Wikipedia",
    "Help",
    "Portal",
    "Talk",
    "Template",
];

/// Extracts article references from MediaWiki pages.
///
/// Keeps only links into the article namespace of the configured host;
/// relative links are treated as referring to that host. Every surviving
/// link is rewritten to its canonical absolute form, so relative and
/// absolute variants of one target collapse into a single entry.
pub struct MediawikiExtractor {
    base: Url,
    excluded_namespaces: Vec<String>,
}

impl MediawikiExtractor {
    pub fn new(base: Url, excluded_namespaces: Vec<String>) -> Self {
        Self {
            base,
            excluded_namespaces,
        }
    }

    /// Picks the namespace exclusion list from the host locale: `de.` hosts
    /// get the German set, everything else the English one.
    pub fn for_base(base: Url) -> Self {
        let namespaces = match base.host_str() {
            Some(host) if host.starts_with("de.") => GERMAN_NAMESPACES,
            _ => ENGLISH_NAMESPACES,
        };
        Self::new(base, namespaces.iter().map(|ns| ns.to_string()).collect())
    }

    /// Resolves one href against the base and keeps it only if it points at
    /// an article on the configured host. Links carrying a fragment are
    /// internal page referencing and are dropped outright.
    fn canonicalize(&self, href: &str) -> Option<CanonicalUrl> {
        if href.is_empty()
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            return None;
        }

        let mut resolved = self.base.join(href).ok()?;
        if resolved.fragment().is_some() {
            return None;
        }
        if resolved.host_str() != self.base.host_str() || resolved.port() != self.base.port() {
            return None;
        }
        if resolved.scheme() != self.base.scheme() {
            resolved.set_scheme(self.base.scheme()).ok()?;
        }

        let target = resolved.path().strip_prefix(ARTICLE_PREFIX)?;
        if target.is_empty() {
            return None;
        }
        if let Some((prefix, _)) = target.split_once(':')
            && self.excluded_namespaces.iter().any(|ns| ns == prefix)
        {
            return None;
        }

        CanonicalUrl::from_url(&resolved).ok()
    }
}

impl ReferenceExtractor for MediawikiExtractor {
    fn extract(&self, markup: &str) -> BTreeSet<CanonicalUrl> {
        let document = Html::parse_document(markup);
        let link_selector = Selector::parse("a[href]").unwrap();

        // Single pass from the parsed document into a fresh set; the
        // filtered sequence is never the collection being built.
        document
            .select(&link_selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| self.canonicalize(href))
            .collect()
    }
}
