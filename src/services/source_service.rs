use tracing::info;

use crate::config::Config;
use crate::domain::{NewsSource, ProviderKind, SourceStatus};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::storage::traits::SourceRepository;

pub struct SourceService<R: SourceRepository> {
    repository: R,
}

impl<R: SourceRepository> SourceService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Create or refresh an enabled source for every provider with an API key
    pub fn seed(&self, config: &Config) -> AggregatorResult<Vec<NewsSource>> {
        let mut seeded = Vec::new();

        for provider in ProviderKind::ALL {
            let Some(api_key) = config.api_key(provider) else {
                continue;
            };

            // Keep a custom base URL across reseeds
            let base_url = self
                .repository
                .get_by_provider(provider)?
                .map(|existing| existing.base_url)
                .unwrap_or_else(|| provider.default_base_url().to_string());

            let source = NewsSource::new(provider, api_key.to_string()).with_base_url(base_url);
            let id = self.repository.upsert(&source)?;
            info!(provider = %provider, id, "seeded news source");

            seeded.push(NewsSource {
                id: Some(id),
                ..source
            });
        }

        if seeded.is_empty() {
            return Err(AggregatorError::MissingEnvVar(
                "NEWSDATA_API_KEY, GUARDIAN_API_KEY or NEWSAPI_API_KEY".to_string(),
            ));
        }

        Ok(seeded)
    }

    pub fn list(&self) -> AggregatorResult<Vec<NewsSource>> {
        self.repository.get_all()
    }

    pub fn enable(&self, provider: ProviderKind) -> AggregatorResult<()> {
        self.set_status(provider, SourceStatus::Enabled)
    }

    pub fn disable(&self, provider: ProviderKind) -> AggregatorResult<()> {
        self.set_status(provider, SourceStatus::Disabled)
    }

    fn set_status(&self, provider: ProviderKind, status: SourceStatus) -> AggregatorResult<()> {
        if !self.repository.set_status(provider, status)? {
            return Err(AggregatorError::SourceNotFound(provider.to_string()));
        }
        info!(provider = %provider, status = status.as_str(), "source status changed");
        Ok(())
    }
}
