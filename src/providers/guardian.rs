use scraper::Html;
use serde::Deserialize;

use crate::domain::{parse_published, url_hash, ArticleCandidate, NewsSource, ProviderKind};
use crate::errors::AggregatorResult;
use crate::providers::http::ApiClient;
use crate::providers::traits::{endpoint, merge_params, require_source_id, NewsProvider, QueryParams};

const SEARCH_PATH: &str = "search";
const DESCRIPTION_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct GuardianEnvelope {
    response: Option<GuardianResponse>,
}

#[derive(Debug, Deserialize)]
struct GuardianResponse {
    results: Option<Vec<GuardianItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuardianItem {
    id: Option<String>,
    web_title: Option<String>,
    web_url: Option<String>,
    web_publication_date: Option<String>,
    section_name: Option<String>,
    pillar_name: Option<String>,
    fields: Option<GuardianFields>,
}

#[derive(Debug, Default, Deserialize)]
struct GuardianFields {
    headline: Option<String>,
    byline: Option<String>,
    body: Option<String>,
    thumbnail: Option<String>,
}

pub struct GuardianProvider {
    client: ApiClient,
}

impl GuardianProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn default_params(source: &NewsSource) -> QueryParams {
        [
            ("api-key", source.api_key.as_str()),
            ("show-fields", "headline,byline,body,thumbnail"),
            ("page-size", "20"),
            ("order-by", "newest"),
            ("page", "1"),
            ("format", "json"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn transform(envelope: GuardianEnvelope, source_id: i64) -> Vec<ArticleCandidate> {
        envelope
            .response
            .and_then(|r| r.results)
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let fields = item.fields.unwrap_or_default();
                let url = item.web_url.unwrap_or_default();
                let external_id = item.id.unwrap_or_else(|| url_hash(&url));
                let title = fields.headline.or(item.web_title).unwrap_or_default();
                let body = fields.body;

                ArticleCandidate::new(source_id, external_id, title, url)
                    .with_description(body.as_deref().and_then(Self::extract_description))
                    .with_content(body)
                    .with_image_url(fields.thumbnail)
                    .with_published_at(parse_published(item.web_publication_date.as_deref()))
                    .with_author(fields.byline)
                    .with_category(item.section_name.or(item.pillar_name))
                    .with_locale("en".to_string(), Some("gb".to_string()))
            })
            .collect()
    }

    /// Plain-text summary of the article body
    fn extract_description(body: &str) -> Option<String> {
        if body.is_empty() {
            return None;
        }

        let text = Self::html_to_text(body);
        if text.chars().count() > DESCRIPTION_MAX_CHARS {
            let truncated: String = text.chars().take(DESCRIPTION_MAX_CHARS).collect();
            Some(format!("{}...", truncated))
        } else {
            Some(text)
        }
    }

    /// Extract plain text from HTML content, preserving some structure
    fn html_to_text(html: &str) -> String {
        let document = Html::parse_fragment(html);
        let mut text = String::new();

        for node in document.root_element().descendants() {
            if let Some(text_node) = node.value().as_text() {
                text.push_str(text_node);
            }
            // Add space after block elements to preserve word boundaries
            if let Some(element) = node.value().as_element() {
                match element.name() {
                    "p" | "br" | "div" | "li" | "h2" | "h3" => text.push(' '),
                    _ => {}
                }
            }
        }

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for GuardianProvider {
    fn default() -> Self {
        Self::new(ApiClient::new())
    }
}

impl NewsProvider for GuardianProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Guardian
    }

    fn fetch(
        &self,
        source: &NewsSource,
        params: &QueryParams,
    ) -> AggregatorResult<Vec<ArticleCandidate>> {
        let source_id = require_source_id(source)?;
        let url = endpoint(&source.base_url, SEARCH_PATH)?;
        let query = merge_params(Self::default_params(source), params);

        let envelope = self
            .client
            .get_json_or_log::<GuardianEnvelope>(self.kind(), source_id, url, &query);

        Ok(envelope
            .map(|e| Self::transform(e, source_id))
            .unwrap_or_default())
    }
}
