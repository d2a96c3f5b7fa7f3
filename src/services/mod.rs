pub mod fetch_planner;
pub mod persistence_service;
pub mod aggregation_service;
pub mod fetch_job;
pub mod source_service;

pub use fetch_planner::{FetchPlan, FetchPlanner, PageSizeTier};
pub use persistence_service::{ArticleGateway, PersistenceService};
pub use aggregation_service::{AggregationService, RunResults};
pub use fetch_job::{FetchJob, JobSummary};
pub use source_service::SourceService;
