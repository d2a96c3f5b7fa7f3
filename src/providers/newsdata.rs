use serde::Deserialize;

use crate::domain::{parse_published, url_hash, ArticleCandidate, NewsSource, ProviderKind};
use crate::errors::AggregatorResult;
use crate::providers::http::ApiClient;
use crate::providers::traits::{
    endpoint, merge_params, non_empty, require_source_id, NewsProvider, QueryParams,
};

const LATEST_PATH: &str = "latest";

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    results: Option<Vec<NewsDataItem>>,
}

/// NewsData.io sends several fields either as a string or as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn first(self) -> Option<String> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }

    fn joined(self) -> String {
        match self {
            OneOrMany::One(value) => value,
            OneOrMany::Many(values) => values.join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsDataItem {
    article_id: Option<String>,
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    content: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
    language: Option<String>,
    creator: Option<OneOrMany>,
    category: Option<OneOrMany>,
    country: Option<OneOrMany>,
}

pub struct NewsDataProvider {
    client: ApiClient,
}

impl NewsDataProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn default_params(source: &NewsSource) -> QueryParams {
        [
            ("apikey", source.api_key.as_str()),
            ("language", "en"),
            ("prioritydomain", "top"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn transform(response: NewsDataResponse, source_id: i64) -> Vec<ArticleCandidate> {
        response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let url = item.link.unwrap_or_default();
                let external_id = non_empty(item.article_id).unwrap_or_else(|| url_hash(&url));
                let author = Self::extract_author(item.creator, item.source_id);
                let category = non_empty(item.category.and_then(OneOrMany::first));
                let country = item.country.and_then(OneOrMany::first);
                let language = item.language.unwrap_or_else(|| "en".to_string());

                ArticleCandidate::new(source_id, external_id, item.title.unwrap_or_default(), url)
                    .with_description(item.description)
                    .with_content(item.content)
                    .with_image_url(item.image_url)
                    .with_published_at(parse_published(item.pub_date.as_deref()))
                    .with_author(author)
                    .with_category(category)
                    .with_locale(language, country)
            })
            .collect()
    }

    /// Creator list, else the outlet's own NewsData.io id
    fn extract_author(creator: Option<OneOrMany>, outlet_id: Option<String>) -> Option<String> {
        non_empty(creator.map(OneOrMany::joined)).or(outlet_id)
    }
}

impl Default for NewsDataProvider {
    fn default() -> Self {
        Self::new(ApiClient::new())
    }
}

impl NewsProvider for NewsDataProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NewsdataIo
    }

    fn fetch(
        &self,
        source: &NewsSource,
        params: &QueryParams,
    ) -> AggregatorResult<Vec<ArticleCandidate>> {
        let source_id = require_source_id(source)?;
        let url = endpoint(&source.base_url, LATEST_PATH)?;
        let query = merge_params(Self::default_params(source), params);

        let response = self
            .client
            .get_json_or_log::<NewsDataResponse>(self.kind(), source_id, url, &query);

        Ok(response
            .map(|r| Self::transform(r, source_id))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockito::{Matcher, Server};

    const SAMPLE_RESPONSE: &str = r#"{
      "status": "success",
      "totalResults": 3,
      "results": [
        {
          "article_id": "f3c1a2b4",
          "title": "Markets rally on rate cut hopes",
          "link": "https://example.com/markets-rally",
          "creator": ["Jane Doe", "John Roe"],
          "description": "Stocks climbed.",
          "content": "Full text",
          "pubDate": "2024-02-01 08:15:00",
          "image_url": "https://example.com/img.jpg",
          "source_id": "example_news",
          "country": ["united states of america"],
          "category": ["business", "top"],
          "language": "english"
        },
        {
          "title": "No creator here",
          "link": "https://example.com/no-creator",
          "creator": null,
          "category": "science",
          "source_id": "science_daily"
        },
        {
          "creator": []
        }
      ],
      "nextPage": "1706775300"
    }"#;

    fn transform_sample() -> Vec<ArticleCandidate> {
        let response: NewsDataResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        NewsDataProvider::transform(response, 3)
    }

    #[test]
    fn test_source_type() {
        let provider = NewsDataProvider::default();
        assert_eq!(provider.kind(), ProviderKind::NewsdataIo);
    }

    #[test]
    fn test_transform_full_entry() {
        let articles = transform_sample();
        let first = &articles[0];

        assert_eq!(first.external_id, "f3c1a2b4");
        assert_eq!(first.title, "Markets rally on rate cut hopes");
        assert_eq!(first.url, "https://example.com/markets-rally");
        assert_eq!(first.author.as_deref(), Some("Jane Doe, John Roe"));
        assert_eq!(first.category.as_deref(), Some("business"));
        assert_eq!(first.country.as_deref(), Some("united states of america"));
        assert_eq!(first.language, "english");
        assert_eq!(
            first.published_at,
            Utc.with_ymd_and_hms(2024, 2, 1, 8, 15, 0).unwrap()
        );
        assert_eq!(first.source_id, 3);
    }

    #[test]
    fn test_author_falls_back_to_outlet_id() {
        let articles = transform_sample();
        let second = &articles[1];

        assert_eq!(second.author.as_deref(), Some("science_daily"));
        assert_eq!(second.category.as_deref(), Some("science"));
        assert_eq!(second.external_id, url_hash("https://example.com/no-creator"));
        assert_eq!(second.language, "en");
        assert!(second.country.is_none());
    }

    #[test]
    fn test_empty_entries_are_kept() {
        let articles = transform_sample();
        assert_eq!(articles.len(), 3);

        let third = &articles[2];
        assert_eq!(third.title, "");
        assert_eq!(third.url, "");
        assert_eq!(third.external_id, url_hash(""));
        assert!(third.author.is_none());
        assert!(third.category.is_none());
    }

    #[test]
    fn test_default_params() {
        let source = NewsSource::new(ProviderKind::NewsdataIo, "nd-key".to_string());
        let params = NewsDataProvider::default_params(&source);

        assert_eq!(params["apikey"], "nd-key");
        assert_eq!(params["language"], "en");
        assert_eq!(params["prioritydomain"], "top");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_fetch_from_server() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(SAMPLE_RESPONSE)
            .create();
        let mut source = NewsSource::new(ProviderKind::NewsdataIo, "key".to_string())
            .with_base_url(server.url());
        source.id = Some(3);

        let articles = NewsDataProvider::default()
            .fetch(&source, &QueryParams::new())
            .unwrap();

        mock.assert();
        assert!(!articles.is_empty());
    }

    #[test]
    fn test_fetch_error_status_yields_no_articles() {
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"status": "error"}"#)
            .create();
        let mut source = NewsSource::new(ProviderKind::NewsdataIo, "key".to_string())
            .with_base_url(server.url());
        source.id = Some(3);

        let articles = NewsDataProvider::default()
            .fetch(&source, &QueryParams::new())
            .unwrap();
        assert!(articles.is_empty());
    }
}
