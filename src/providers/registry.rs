use crate::domain::{ArticleCandidate, NewsSource, ProviderKind};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::providers::http::ApiClient;
use crate::providers::traits::{NewsProvider, QueryParams};
use crate::providers::{
    guardian::GuardianProvider, newsapi::NewsApiProvider, newsdata::NewsDataProvider,
};

/// One adapter per supported provider kind
pub struct ProviderRegistry {
    newsdata: Box<dyn NewsProvider>,
    guardian: Box<dyn NewsProvider>,
    newsapi: Box<dyn NewsProvider>,
}

impl ProviderRegistry {
    /// Built-in adapters sharing one HTTP client
    pub fn new() -> Self {
        let client = ApiClient::new();

        Self::with_providers(
            Box::new(NewsDataProvider::new(client.clone())),
            Box::new(GuardianProvider::new(client.clone())),
            Box::new(NewsApiProvider::new(client)),
        )
    }

    pub fn with_providers(
        newsdata: Box<dyn NewsProvider>,
        guardian: Box<dyn NewsProvider>,
        newsapi: Box<dyn NewsProvider>,
    ) -> Self {
        Self {
            newsdata,
            guardian,
            newsapi,
        }
    }

    /// New York Times is catalogued but has no adapter
    pub fn provider_for(&self, kind: ProviderKind) -> AggregatorResult<&dyn NewsProvider> {
        match kind {
            ProviderKind::NewsdataIo => Ok(self.newsdata.as_ref()),
            ProviderKind::Guardian => Ok(self.guardian.as_ref()),
            ProviderKind::NewsApi => Ok(self.newsapi.as_ref()),
            ProviderKind::NewYorkTimes => {
                Err(AggregatorError::UnsupportedProvider(kind.to_string()))
            }
        }
    }

    /// Fetch a source through the adapter for its provider
    pub fn fetch(
        &self,
        source: &NewsSource,
        params: &QueryParams,
    ) -> AggregatorResult<Vec<ArticleCandidate>> {
        self.provider_for(source.provider)?.fetch(source, params)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
