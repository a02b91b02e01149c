use crate::canon::CanonicalUrl;
use crate::error::{CrawlError, Result};
use crate::extract::ReferenceExtractor;
use crate::fetch::FetchContext;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One encyclopedia page.
///
/// Content is fetched lazily and held only long enough to derive the title
/// and the reference set; after that it is released so a long crawl never
/// accumulates page markup. A later `references` call fetches the page
/// again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    url: CanonicalUrl,
    title: Option<String>,
    #[serde(skip)]
    content: Option<String>,
}

impl Article {
    pub fn new(url: CanonicalUrl) -> Self {
        Self {
            url,
            title: None,
            content: None,
        }
    }

    pub fn url(&self) -> &CanonicalUrl {
        &self.url
    }

    /// Title of the article, once it has been derived from fetched markup.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Records a title derived elsewhere, e.g. when a crawl worker hands a
    /// hydrated article back to the graph.
    pub fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    /// Fetches the raw markup via the shared fetch context.
    pub async fn fetch(&self, ctx: &FetchContext) -> Result<String> {
        ctx.get(&self.url).await
    }

    /// The set of articles this page references.
    ///
    /// Triggers a fetch if no content is cached, derives the title as a side
    /// effect, and releases the content before returning.
    pub async fn references(
        &mut self,
        ctx: &FetchContext,
        extractor: &dyn ReferenceExtractor,
    ) -> Result<BTreeSet<CanonicalUrl>> {
        let markup = match self.content.take() {
            Some(cached) => cached,
            None => self.fetch(ctx).await?,
        };

        if self.title.is_none() {
            let title = parse_title(&markup)
                .ok_or_else(|| CrawlError::MissingTitle(self.url.to_string()))?;
            self.title = Some(title);
        }

        Ok(extractor.extract(&markup))
    }
}

/// The MediaWiki heading marker identifying the article title.
fn parse_title(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    let selector = Selector::parse("h1#firstHeading").unwrap();
    let heading = document.select(&selector).next()?;
    let title = heading.text().collect::<String>().trim().to_string();
    (!title.is_empty()).then_some(title)
}
