use serde::Deserialize;

use crate::domain::{parse_published, url_hash, ArticleCandidate, NewsSource, ProviderKind};
use crate::errors::AggregatorResult;
use crate::providers::http::ApiClient;
use crate::providers::traits::{
    endpoint, merge_params, non_empty, require_source_id, NewsProvider, QueryParams,
};

const TOP_HEADLINES_PATH: &str = "top-headlines";
const FALLBACK_CATEGORY: &str = "General";

/// Outlet name fragments mapped to a category, checked in order
const CATEGORY_MAPPINGS: &[(&str, &str)] = &[
    ("techcrunch", "Technology"),
    ("ars technica", "Technology"),
    ("the verge", "Technology"),
    ("wired", "Technology"),
    ("espn", "Sports"),
    ("bbc sport", "Sports"),
    ("cnn", "News"),
    ("bbc news", "News"),
    ("reuters", "News"),
    ("associated press", "News"),
    ("forbes", "Business"),
    ("bloomberg", "Business"),
    ("wall street journal", "Business"),
    ("financial times", "Business"),
];

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    articles: Option<Vec<NewsApiItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct NewsApiOutlet {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiItem {
    source: Option<NewsApiOutlet>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

pub struct NewsApiProvider {
    client: ApiClient,
}

impl NewsApiProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn default_params(source: &NewsSource) -> QueryParams {
        [
            ("apiKey", source.api_key.as_str()),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", "20"),
            ("page", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn transform(response: NewsApiResponse, source_id: i64) -> Vec<ArticleCandidate> {
        response
            .articles
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                // Removed and placeholder entries come back without a title or URL
                let title = non_empty(item.title)?;
                let url = non_empty(item.url)?;
                let outlet = item.source.unwrap_or_default().name;

                Some(
                    ArticleCandidate::new(source_id, url_hash(&url), title, url)
                        .with_description(item.description)
                        .with_content(item.content)
                        .with_image_url(item.url_to_image)
                        .with_published_at(parse_published(item.published_at.as_deref()))
                        .with_author(non_empty(item.author))
                        .with_category(Some(Self::category_for(outlet.as_deref()).to_string()))
                        .with_locale("en".to_string(), Some("us".to_string())),
                )
            })
            .collect()
    }

    /// Category inferred from the outlet name
    fn category_for(outlet: Option<&str>) -> &'static str {
        let Some(outlet) = outlet else {
            return FALLBACK_CATEGORY;
        };
        let outlet = outlet.to_lowercase();

        CATEGORY_MAPPINGS
            .iter()
            .find(|(fragment, _)| outlet.contains(fragment))
            .map(|(_, category)| *category)
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

impl Default for NewsApiProvider {
    fn default() -> Self {
        Self::new(ApiClient::new())
    }
}

impl NewsProvider for NewsApiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NewsApi
    }

    fn fetch(
        &self,
        source: &NewsSource,
        params: &QueryParams,
    ) -> AggregatorResult<Vec<ArticleCandidate>> {
        let source_id = require_source_id(source)?;
        let url = endpoint(&source.base_url, TOP_HEADLINES_PATH)?;
        let query = merge_params(Self::default_params(source), params);

        let response = self
            .client
            .get_json_or_log::<NewsApiResponse>(self.kind(), source_id, url, &query);

        Ok(response
            .map(|r| Self::transform(r, source_id))
            .unwrap_or_default())
    }
}
