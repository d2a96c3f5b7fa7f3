use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aggregator")]
#[command(about = "News aggregator for NewsData.io, The Guardian and NewsAPI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all enabled sources once and store new articles
    Run {
        /// Fetch only this provider (newsdata_io, guardian, newsapi, new_york_times)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Run the fetch job repeatedly on a fixed interval
    Watch {
        /// Minutes between runs (defaults to FETCH_INTERVAL_MINUTES, or 60)
        #[arg(short, long)]
        interval_minutes: Option<u64>,

        /// Stop after this many runs
        #[arg(long)]
        max_runs: Option<u32>,
    },

    /// List configured news sources
    Sources,

    /// Create or update a source for every provider with an API key
    Seed,

    /// Enable a news source
    Enable {
        /// Provider identifier
        provider: String,
    },

    /// Disable a news source
    Disable {
        /// Provider identifier
        provider: String,
    },
}
