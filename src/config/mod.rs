use crate::domain::ProviderKind;
use crate::errors::{AggregatorError, AggregatorResult};

const DEFAULT_FETCH_INTERVAL_MINUTES: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub newsdata_api_key: Option<String>,
    pub guardian_api_key: Option<String>,
    pub newsapi_api_key: Option<String>,
    pub fetch_interval_minutes: u64,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> AggregatorResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default db_path is relative to executable directory
        let db_path = std::env::var("AGGREGATOR_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("aggregator.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./aggregator.db".to_string())
        });

        let fetch_interval_minutes = match std::env::var("FETCH_INTERVAL_MINUTES") {
            Ok(raw) => parse_interval(&raw)?,
            Err(_) => DEFAULT_FETCH_INTERVAL_MINUTES,
        };

        Ok(Self {
            db_path,
            newsdata_api_key: non_empty_var("NEWSDATA_API_KEY"),
            guardian_api_key: non_empty_var("GUARDIAN_API_KEY"),
            newsapi_api_key: non_empty_var("NEWSAPI_API_KEY"),
            fetch_interval_minutes,
        })
    }

    /// API key configured for a provider, if any
    pub fn api_key(&self, provider: ProviderKind) -> Option<&str> {
        match provider {
            ProviderKind::NewsdataIo => self.newsdata_api_key.as_deref(),
            ProviderKind::Guardian => self.guardian_api_key.as_deref(),
            ProviderKind::NewsApi => self.newsapi_api_key.as_deref(),
            ProviderKind::NewYorkTimes => None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_interval(raw: &str) -> AggregatorResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(AggregatorError::Config(
            "FETCH_INTERVAL_MINUTES must be greater than zero".to_string(),
        )),
        Ok(minutes) => Ok(minutes),
        Err(_) => Err(AggregatorError::Config(format!(
            "FETCH_INTERVAL_MINUTES is not a number: {}",
            raw
        ))),
    }
}
