use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    NewsdataIo,
    Guardian,
    NewYorkTimes,
    #[serde(rename = "newsapi")]
    NewsApi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::NewsdataIo,
        ProviderKind::Guardian,
        ProviderKind::NewYorkTimes,
        ProviderKind::NewsApi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::NewsdataIo => "newsdata_io",
            ProviderKind::Guardian => "guardian",
            ProviderKind::NewYorkTimes => "new_york_times",
            ProviderKind::NewsApi => "newsapi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::NewsdataIo => "NewsData.io",
            ProviderKind::Guardian => "The Guardian",
            ProviderKind::NewYorkTimes => "New York Times",
            ProviderKind::NewsApi => "NewsAPI",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::NewsdataIo => "https://newsdata.io/api/1/",
            ProviderKind::Guardian => "https://content.guardianapis.com/",
            ProviderKind::NewYorkTimes => "https://api.nytimes.com/svc/",
            ProviderKind::NewsApi => "https://newsapi.org/v2/",
        }
    }

    pub fn default_rate_limit(&self) -> u32 {
        match self {
            ProviderKind::NewsdataIo => 200,
            ProviderKind::Guardian => 500,
            ProviderKind::NewYorkTimes => 1000,
            ProviderKind::NewsApi => 1000,
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newsdata_io" | "newsdata" => Ok(ProviderKind::NewsdataIo),
            "guardian" => Ok(ProviderKind::Guardian),
            "new_york_times" | "nyt" => Ok(ProviderKind::NewYorkTimes),
            "newsapi" => Ok(ProviderKind::NewsApi),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Enabled,
    Disabled,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceStatus::Enabled => "enabled",
            SourceStatus::Disabled => "disabled",
        }
    }
}

impl std::str::FromStr for SourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enabled" => Ok(SourceStatus::Enabled),
            "disabled" => Ok(SourceStatus::Disabled),
            _ => Err(format!("Unknown source status: {}", s)),
        }
    }
}

/// A configured news provider and its sync cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: Option<i64>,
    pub provider: ProviderKind,
    pub name: String,
    pub api_key: String,
    pub status: SourceStatus,
    pub base_url: String,
    pub rate_limit_per_hour: u32,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl NewsSource {
    /// New enabled source using the provider's catalogue defaults
    pub fn new(provider: ProviderKind, api_key: String) -> Self {
        Self {
            id: None,
            provider,
            name: provider.display_name().to_string(),
            api_key,
            status: SourceStatus::Enabled,
            base_url: provider.default_base_url().to_string(),
            rate_limit_per_hour: provider.default_rate_limit(),
            last_fetched_at: None,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_last_fetched_at(mut self, last_fetched_at: Option<DateTime<Utc>>) -> Self {
        self.last_fetched_at = last_fetched_at;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.status == SourceStatus::Enabled
    }
}
