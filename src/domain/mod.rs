pub mod source;
pub mod article;
pub mod outcome;

pub use source::{NewsSource, ProviderKind, SourceStatus};
pub use article::{parse_published, slugify, url_hash, Article, ArticleCandidate, Author, Category};
pub use outcome::FetchOutcome;
