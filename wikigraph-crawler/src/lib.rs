pub mod article;
pub mod canon;
pub mod error;
pub mod extract;
pub mod fetch;

pub use article::Article;
pub use canon::CanonicalUrl;
pub use error::CrawlError;
pub use extract::{MediawikiExtractor, ReferenceExtractor};
pub use fetch::FetchContext;
