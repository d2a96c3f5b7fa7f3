use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aggregator::cli::{Cli, Commands};
use aggregator::config::Config;
use aggregator::domain::{FetchOutcome, ProviderKind};
use aggregator::errors::{AggregatorError, AggregatorResult};
use aggregator::providers::ProviderRegistry;
use aggregator::services::{
    AggregationService, FetchJob, JobSummary, PersistenceService, SourceService,
};
use aggregator::storage::sqlite::{
    SqliteArticleRepository, SqliteAuthorRepository, SqliteCategoryRepository,
    SqliteSourceRepository, SqliteStorage,
};
use aggregator::storage::SourceRepository;

type SqlitePersistence =
    PersistenceService<SqliteArticleRepository, SqliteCategoryRepository, SqliteAuthorRepository>;
type SqliteFetchJob = FetchJob<SqliteSourceRepository, SqlitePersistence>;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> AggregatorResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;

    match cli.command {
        Commands::Run { provider } => cmd_run(&storage, provider.as_deref()),
        Commands::Watch {
            interval_minutes,
            max_runs,
        } => cmd_watch(
            &storage,
            interval_minutes.unwrap_or(config.fetch_interval_minutes),
            max_runs,
        ),
        Commands::Sources => cmd_sources(&storage),
        Commands::Seed => cmd_seed(&storage, &config),
        Commands::Enable { provider } => cmd_set_enabled(&storage, &provider, true),
        Commands::Disable { provider } => cmd_set_enabled(&storage, &provider, false),
    }
}

fn parse_provider(raw: &str) -> AggregatorResult<ProviderKind> {
    raw.parse().map_err(AggregatorError::InvalidInput)
}

fn build_job(storage: &SqliteStorage) -> SqliteFetchJob {
    let gateway = PersistenceService::new(
        SqliteArticleRepository::new(storage.clone()),
        SqliteCategoryRepository::new(storage.clone()),
        SqliteAuthorRepository::new(storage.clone()),
    );
    let service = AggregationService::new(
        SqliteSourceRepository::new(storage.clone()),
        gateway,
        ProviderRegistry::new(),
    );

    FetchJob::new(service)
}

fn print_outcome(provider: &str, outcome: &FetchOutcome) {
    let marker = if outcome.success { "ok" } else { "FAILED" };
    println!("  {} [{}]: {}", provider, marker, outcome.message);

    if let Some(total) = outcome.total_fetched {
        println!("    Fetched: {}, saved: {}", total, outcome.articles_count);
    }
    if let Some(ref range) = outcome.date_range {
        println!("    Window: {}", range);
    }
}

fn print_summary(summary: &JobSummary) {
    for (provider, outcome) in &summary.results {
        print_outcome(provider, outcome);
    }
    println!();
    println!(
        "Saved {} new articles from {} sources.",
        summary.total_articles_saved, summary.sources_processed
    );
}

fn cmd_run(storage: &SqliteStorage, provider: Option<&str>) -> AggregatorResult<()> {
    let job = build_job(storage);

    if let Some(raw) = provider {
        let kind = parse_provider(raw)?;
        println!("Fetching {}...\n", kind.display_name());

        let outcome = job.service().fetch_source(kind)?;
        print_outcome(kind.as_str(), &outcome);
        return Ok(());
    }

    let sources = SqliteSourceRepository::new(storage.clone());
    if sources.get_all()?.is_empty() {
        println!("No news sources configured. Run `aggregator seed` first.");
        return Ok(());
    }
    if sources.get_enabled()?.is_empty() {
        println!("No enabled sources.");
        return Ok(());
    }

    println!("Fetching news...\n");
    let summary = job.run()?;
    print_summary(&summary);

    Ok(())
}

fn cmd_watch(
    storage: &SqliteStorage,
    interval_minutes: u64,
    max_runs: Option<u32>,
) -> AggregatorResult<()> {
    if interval_minutes == 0 {
        return Err(AggregatorError::InvalidInput(
            "Interval must be at least one minute".to_string(),
        ));
    }

    let job = build_job(storage);
    let interval = Duration::from_secs(interval_minutes * 60);
    let mut runs = 0;

    info!(interval_minutes, "starting scheduler");

    loop {
        runs += 1;

        // A failed run must not stop the schedule
        match job.run() {
            Ok(summary) => print_summary(&summary),
            Err(e) => error!(run = runs, error = %e, "scheduled run failed"),
        }

        if max_runs.is_some_and(|max| runs >= max) {
            break;
        }

        println!("\nNext run in {} minutes.\n", interval_minutes);
        thread::sleep(interval);
    }

    Ok(())
}

fn cmd_sources(storage: &SqliteStorage) -> AggregatorResult<()> {
    let service = SourceService::new(SqliteSourceRepository::new(storage.clone()));
    let sources = service.list()?;

    if sources.is_empty() {
        println!("No news sources configured.");
        return Ok(());
    }

    println!("Configured sources:\n");
    for source in sources {
        println!("  {} [{}] ({})", source.name, source.provider, source.status.as_str());
        println!("    URL: {}", source.base_url);
        println!("    Rate limit: {}/hour", source.rate_limit_per_hour);
        match source.last_fetched_at {
            Some(at) => println!("    Last fetched: {}", at.to_rfc3339()),
            None => println!("    Last fetched: never"),
        }
        println!();
    }

    Ok(())
}

fn cmd_seed(storage: &SqliteStorage, config: &Config) -> AggregatorResult<()> {
    let service = SourceService::new(SqliteSourceRepository::new(storage.clone()));
    let seeded = service.seed(config)?;

    println!("Seeded {} sources:", seeded.len());
    for source in &seeded {
        println!("  + {} [{}]", source.name, source.provider);
    }

    Ok(())
}

fn cmd_set_enabled(storage: &SqliteStorage, raw: &str, enabled: bool) -> AggregatorResult<()> {
    let kind = parse_provider(raw)?;
    let service = SourceService::new(SqliteSourceRepository::new(storage.clone()));

    if enabled {
        service.enable(kind)?;
        println!("Enabled: {}", kind.display_name());
    } else {
        service.disable(kind)?;
        println!("Disabled: {}", kind.display_name());
    }

    Ok(())
}
