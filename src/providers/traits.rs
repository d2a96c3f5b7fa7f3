use std::collections::BTreeMap;

use url::Url;

use crate::domain::{ArticleCandidate, NewsSource, ProviderKind};
use crate::errors::{AggregatorError, AggregatorResult};

/// Query string parameters for a provider request
pub type QueryParams = BTreeMap<String, String>;

#[cfg_attr(test, mockall::automock)]
pub trait NewsProvider: Send + Sync {
    /// Identifies the provider this adapter speaks to
    fn kind(&self) -> ProviderKind;

    /// Fetch the latest articles for a source, normalized to candidates
    ///
    /// Transport and HTTP failures are logged and yield an empty list;
    /// an `Err` means the source itself is misconfigured.
    fn fetch(
        &self,
        source: &NewsSource,
        params: &QueryParams,
    ) -> AggregatorResult<Vec<ArticleCandidate>>;
}

/// Overlay caller parameters on a provider's defaults; the caller wins
pub fn merge_params(mut defaults: QueryParams, overrides: &QueryParams) -> QueryParams {
    defaults.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    defaults
}

/// Resolve `path` against a source's base URL
pub fn endpoint(base_url: &str, path: &str) -> AggregatorResult<Url> {
    let base = if base_url.ends_with('/') {
        Url::parse(base_url)?
    } else {
        Url::parse(&format!("{}/", base_url))?
    };

    Ok(base.join(path)?)
}

pub fn require_source_id(source: &NewsSource) -> AggregatorResult<i64> {
    source
        .id
        .ok_or_else(|| AggregatorError::SourceNotFound(format!("{} has no ID", source.name)))
}

/// Treat empty provider strings as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
