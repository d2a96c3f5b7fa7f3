use chrono::{DateTime, Utc};

use crate::domain::{Article, Author, Category, NewsSource, ProviderKind, SourceStatus};
use crate::errors::AggregatorResult;

#[cfg_attr(test, mockall::automock)]
pub trait SourceRepository: Send + Sync {
    /// Create or update the source for `source.provider`, keeping its sync cursor
    fn upsert(&self, source: &NewsSource) -> AggregatorResult<i64>;
    fn get_all(&self) -> AggregatorResult<Vec<NewsSource>>;
    fn get_enabled(&self) -> AggregatorResult<Vec<NewsSource>>;
    fn get_by_provider(&self, provider: ProviderKind) -> AggregatorResult<Option<NewsSource>>;
    fn set_status(&self, provider: ProviderKind, status: SourceStatus) -> AggregatorResult<bool>;
    fn update_last_fetched(&self, id: i64, at: DateTime<Utc>) -> AggregatorResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ArticleRepository: Send + Sync {
    fn exists(&self, external_id: &str, source_id: i64) -> AggregatorResult<bool>;
    /// Insert an article; `None` when the dedup key is already taken
    fn create(&self, article: &Article) -> AggregatorResult<Option<i64>>;
    fn get(&self, external_id: &str, source_id: i64) -> AggregatorResult<Option<Article>>;
    fn count_by_source(&self, source_id: i64) -> AggregatorResult<usize>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    fn find_or_create(&self, name: &str) -> AggregatorResult<Category>;
}

#[cfg_attr(test, mockall::automock)]
pub trait AuthorRepository: Send + Sync {
    fn find_or_create(&self, name: &str) -> AggregatorResult<Author>;
}
