use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::AggregatorResult;
use crate::services::aggregation_service::{AggregationService, RunResults};
use crate::services::persistence_service::ArticleGateway;
use crate::storage::traits::SourceRepository;

pub const MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub total_articles_saved: usize,
    pub sources_processed: usize,
    pub results: RunResults,
}

impl JobSummary {
    pub fn from_results(results: RunResults) -> Self {
        Self {
            total_articles_saved: results.values().map(|o| o.articles_count).sum(),
            sources_processed: results.len(),
            results,
        }
    }
}

/// One scheduled aggregation run, retried as a whole when it cannot start
pub struct FetchJob<S: SourceRepository, G: ArticleGateway> {
    service: AggregationService<S, G>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<S: SourceRepository, G: ArticleGateway> FetchJob<S, G> {
    pub fn new(service: AggregationService<S, G>) -> Self {
        Self {
            service,
            max_attempts: MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn service(&self) -> &AggregationService<S, G> {
        &self.service
    }

    pub fn run(&self) -> AggregatorResult<JobSummary> {
        let mut attempt = 1;

        loop {
            info!(attempt, "starting news fetch job");

            match self.service.run_all() {
                Ok(results) => {
                    let summary = JobSummary::from_results(results);
                    let results_json = serde_json::to_string(&summary.results)?;
                    info!(
                        total_articles_saved = summary.total_articles_saved,
                        sources_processed = summary.sources_processed,
                        results = %results_json,
                        "news fetch job completed"
                    );
                    return Ok(summary);
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(attempt, error = %e, "news fetch job failed, retrying");
                    thread::sleep(self.retry_delay);
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "news fetch job failed permanently");
                    return Err(e);
                }
            }
        }
    }
}
