use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::domain::{FetchOutcome, NewsSource, ProviderKind};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::providers::ProviderRegistry;
use crate::services::fetch_planner::FetchPlanner;
use crate::services::persistence_service::ArticleGateway;
use crate::storage::traits::SourceRepository;

/// Outcomes keyed by provider identifier
pub type RunResults = BTreeMap<String, FetchOutcome>;

pub struct AggregationService<S: SourceRepository, G: ArticleGateway> {
    source_repository: S,
    gateway: G,
    registry: ProviderRegistry,
    planner: FetchPlanner,
}

impl<S: SourceRepository, G: ArticleGateway> AggregationService<S, G> {
    pub fn new(source_repository: S, gateway: G, registry: ProviderRegistry) -> Self {
        Self {
            source_repository,
            gateway,
            registry,
            planner: FetchPlanner::new(),
        }
    }

    /// Fetch every enabled source
    pub fn run_all(&self) -> AggregatorResult<RunResults> {
        self.run_all_at(Utc::now())
    }

    /// Fetch every enabled source, planning against `now`
    ///
    /// Only listing the sources can fail; each source's own failure is
    /// reported in its outcome.
    pub fn run_all_at(&self, now: DateTime<Utc>) -> AggregatorResult<RunResults> {
        let sources = self.source_repository.get_enabled()?;
        let mut results = RunResults::new();

        for source in sources {
            let outcome = self.process_source(&source, now);
            results.insert(source.provider.to_string(), outcome);
        }

        Ok(results)
    }

    /// Fetch a single source on demand, whether or not it is enabled
    pub fn fetch_source(&self, provider: ProviderKind) -> AggregatorResult<FetchOutcome> {
        let source = self
            .source_repository
            .get_by_provider(provider)?
            .ok_or_else(|| AggregatorError::SourceNotFound(provider.to_string()))?;

        Ok(self.process_source(&source, Utc::now()))
    }

    fn process_source(&self, source: &NewsSource, now: DateTime<Utc>) -> FetchOutcome {
        let outcome = match self.fetch_and_save(source, now) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(provider = %source.provider, error = %e, "failed to fetch from source");
                FetchOutcome::failed(e)
            }
        };

        if outcome.success {
            self.advance_cursor(source, now);
        }

        outcome
    }

    fn fetch_and_save(&self, source: &NewsSource, now: DateTime<Utc>) -> AggregatorResult<FetchOutcome> {
        let plan = self.planner.plan(source, now);
        info!(
            provider = %source.provider,
            tier = plan.tier.as_str(),
            window_start = %plan.window_start,
            "fetching source"
        );

        let candidates = self.registry.fetch(source, &plan.params)?;
        if candidates.is_empty() {
            return Ok(FetchOutcome::no_articles());
        }

        let saved = candidates.iter().filter(|c| self.gateway.save(c)).count();
        info!(
            provider = %source.provider,
            saved,
            fetched = candidates.len(),
            "source processed"
        );

        Ok(FetchOutcome::processed(
            saved,
            candidates.len(),
            plan.date_range_description(),
        ))
    }

    fn advance_cursor(&self, source: &NewsSource, now: DateTime<Utc>) {
        let result = match source.id {
            Some(id) => self.source_repository.update_last_fetched(id, now),
            None => Err(AggregatorError::SourceNotFound(format!(
                "{} has no ID",
                source.name
            ))),
        };

        if let Err(e) = result {
            warn!(provider = %source.provider, error = %e, "failed to update last fetched time");
        }
    }
}
