use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY_VARS: [&str; 3] = ["NEWSDATA_API_KEY", "GUARDIAN_API_KEY", "NEWSAPI_API_KEY"];

/// Command against a throwaway database with no provider keys from the host
fn aggregator_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("test.db");
    let mut cmd = Command::cargo_bin("aggregator").unwrap();
    cmd.env("AGGREGATOR_DB_PATH", db_path.to_str().unwrap());
    for var in KEY_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_run_help_shows_provider_flag() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--provider"));
}

#[test]
fn test_watch_help_shows_schedule_flags() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("watch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--interval-minutes"))
        .stdout(predicate::str::contains("--max-runs"));
}

#[test]
fn test_run_without_sources() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("No news sources configured"));
}

#[test]
fn test_sources_empty() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("No news sources configured."));
}

#[test]
fn test_seed_without_keys_fails() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing environment variable"));
}

#[test]
fn test_invalid_interval_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("sources")
        .env("FETCH_INTERVAL_MINUTES", "hourly")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FETCH_INTERVAL_MINUTES"));
}

#[test]
fn test_unknown_provider_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    aggregator_cmd(&temp_dir)
        .arg("enable")
        .arg("bbc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider: bbc"));
}

mod seeded_sources {
    use super::*;

    #[test]
    fn test_seed_lists_configured_provider() {
        let temp_dir = TempDir::new().unwrap();

        aggregator_cmd(&temp_dir)
            .arg("seed")
            .env("GUARDIAN_API_KEY", "test-key")
            .assert()
            .success()
            .stdout(predicate::str::contains("Seeded 1 sources"))
            .stdout(predicate::str::contains("The Guardian [guardian]"));

        aggregator_cmd(&temp_dir)
            .arg("sources")
            .assert()
            .success()
            .stdout(predicate::str::contains("(enabled)"))
            .stdout(predicate::str::contains("Last fetched: never"));
    }

    #[test]
    fn test_run_with_all_sources_disabled() {
        let temp_dir = TempDir::new().unwrap();

        aggregator_cmd(&temp_dir)
            .arg("seed")
            .env("GUARDIAN_API_KEY", "test-key")
            .assert()
            .success();

        aggregator_cmd(&temp_dir)
            .arg("disable")
            .arg("guardian")
            .assert()
            .success()
            .stdout(predicate::str::contains("Disabled: The Guardian"));

        aggregator_cmd(&temp_dir)
            .arg("run")
            .assert()
            .success()
            .stdout(predicate::str::contains("No enabled sources."));
    }

    #[test]
    fn test_fetch_unseeded_provider_fails() {
        let temp_dir = TempDir::new().unwrap();

        aggregator_cmd(&temp_dir)
            .arg("seed")
            .env("GUARDIAN_API_KEY", "test-key")
            .assert()
            .success();

        aggregator_cmd(&temp_dir)
            .arg("run")
            .arg("--provider")
            .arg("newsapi")
            .assert()
            .failure()
            .stderr(predicate::str::contains("News source not found: newsapi"));
    }

    #[test]
    fn test_toggle_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();

        aggregator_cmd(&temp_dir)
            .arg("enable")
            .arg("newsapi")
            .assert()
            .failure()
            .stderr(predicate::str::contains("News source not found"));
    }
}
