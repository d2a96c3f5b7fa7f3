use serde::{Deserialize, Serialize};

/// Result of one source's fetch, reported back to the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub success: bool,
    pub message: String,
    pub articles_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fetched: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

impl FetchOutcome {
    pub fn no_articles() -> Self {
        Self {
            success: true,
            message: "No new articles found".to_string(),
            articles_count: 0,
            total_fetched: None,
            date_range: None,
        }
    }

    pub fn processed(saved: usize, total_fetched: usize, date_range: String) -> Self {
        Self {
            success: true,
            message: format!("Successfully processed {} articles", saved),
            articles_count: saved,
            total_fetched: Some(total_fetched),
            date_range: Some(date_range),
        }
    }

    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("Failed to fetch articles: {}", error),
            articles_count: 0,
            total_fetched: None,
            date_range: None,
        }
    }
}
