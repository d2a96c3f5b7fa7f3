use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row};

use crate::domain::{NewsSource, ProviderKind, SourceStatus};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::SourceRepository;

const SELECT_SOURCE: &str = "SELECT id, provider, name, api_key, status, base_url, rate_limit_per_hour, last_fetched_at FROM news_sources";

pub struct SqliteSourceRepository {
    storage: SqliteStorage,
}

impl SqliteSourceRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> AggregatorResult<Vec<NewsSource>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(sql)?;
        let sources = stmt.query_map(params, row_to_source)?;

        sources.collect::<Result<Vec<_>, _>>().map_err(AggregatorError::from)
    }
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn row_to_source(row: &Row<'_>) -> rusqlite::Result<NewsSource> {
    Ok(NewsSource {
        id: Some(row.get(0)?),
        provider: parse_column(row, 1)?,
        name: row.get(2)?,
        api_key: row.get(3)?,
        status: parse_column(row, 4)?,
        base_url: row.get(5)?,
        rate_limit_per_hour: row.get(6)?,
        last_fetched_at: row.get(7)?,
    })
}

impl SourceRepository for SqliteSourceRepository {
    fn upsert(&self, source: &NewsSource) -> AggregatorResult<i64> {
        let conn = self.storage.connection()?;

        conn.execute(
            "INSERT INTO news_sources (provider, name, api_key, status, base_url, rate_limit_per_hour, last_fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(provider) DO UPDATE SET
                name = excluded.name,
                api_key = excluded.api_key,
                status = excluded.status,
                base_url = excluded.base_url,
                rate_limit_per_hour = excluded.rate_limit_per_hour",
            (
                source.provider.as_str(),
                &source.name,
                &source.api_key,
                source.status.as_str(),
                &source.base_url,
                source.rate_limit_per_hour,
                source.last_fetched_at,
            ),
        )?;

        // last_insert_rowid is stale when the conflict branch ran
        let id = conn.query_row(
            "SELECT id FROM news_sources WHERE provider = ?1",
            [source.provider.as_str()],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    fn get_all(&self) -> AggregatorResult<Vec<NewsSource>> {
        self.query(&format!("{} ORDER BY id", SELECT_SOURCE), [])
    }

    fn get_enabled(&self) -> AggregatorResult<Vec<NewsSource>> {
        self.query(
            &format!("{} WHERE status = ?1 ORDER BY id", SELECT_SOURCE),
            [SourceStatus::Enabled.as_str()],
        )
    }

    fn get_by_provider(&self, provider: ProviderKind) -> AggregatorResult<Option<NewsSource>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("{} WHERE provider = ?1", SELECT_SOURCE))?;

        stmt.query_row([provider.as_str()], row_to_source)
            .optional()
            .map_err(AggregatorError::from)
    }

    fn set_status(&self, provider: ProviderKind, status: SourceStatus) -> AggregatorResult<bool> {
        let conn = self.storage.connection()?;
        let changed = conn.execute(
            "UPDATE news_sources SET status = ?1 WHERE provider = ?2",
            (status.as_str(), provider.as_str()),
        )?;
        Ok(changed > 0)
    }

    fn update_last_fetched(&self, id: i64, at: DateTime<Utc>) -> AggregatorResult<()> {
        let conn = self.storage.connection()?;
        let changed = conn.execute(
            "UPDATE news_sources SET last_fetched_at = ?1 WHERE id = ?2",
            (at, id),
        )?;

        if changed == 0 {
            return Err(AggregatorError::SourceNotFound(format!("id {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn setup_repo() -> SqliteSourceRepository {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteSourceRepository::new(storage)
    }

    #[test]
    fn test_upsert_and_get_source() {
        let repo = setup_repo();
        let source = NewsSource::new(ProviderKind::Guardian, "secret".to_string());

        let id = repo.upsert(&source).unwrap();
        assert!(id > 0);

        let retrieved = repo.get_by_provider(ProviderKind::Guardian).unwrap().unwrap();
        assert_eq!(retrieved.id, Some(id));
        assert_eq!(retrieved.name, "The Guardian");
        assert_eq!(retrieved.api_key, "secret");
        assert_eq!(retrieved.status, SourceStatus::Enabled);
        assert!(retrieved.last_fetched_at.is_none());
    }

    #[test]
    fn test_upsert_updates_existing_and_keeps_cursor() {
        let repo = setup_repo();
        let id = repo
            .upsert(&NewsSource::new(ProviderKind::NewsApi, "old-key".to_string()))
            .unwrap();

        let fetched_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        repo.update_last_fetched(id, fetched_at).unwrap();

        let second_id = repo
            .upsert(&NewsSource::new(ProviderKind::NewsApi, "new-key".to_string()))
            .unwrap();
        assert_eq!(second_id, id);

        let retrieved = repo.get_by_provider(ProviderKind::NewsApi).unwrap().unwrap();
        assert_eq!(retrieved.api_key, "new-key");
        assert_eq!(retrieved.last_fetched_at, Some(fetched_at));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_get_enabled_skips_disabled_sources() {
        let repo = setup_repo();
        repo.upsert(&NewsSource::new(ProviderKind::Guardian, "a".to_string()))
            .unwrap();
        repo.upsert(&NewsSource::new(ProviderKind::NewsApi, "b".to_string()))
            .unwrap();

        assert!(repo
            .set_status(ProviderKind::NewsApi, SourceStatus::Disabled)
            .unwrap());

        let enabled = repo.get_enabled().unwrap();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].provider, ProviderKind::Guardian);
        assert_eq!(repo.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_set_status_unknown_provider() {
        let repo = setup_repo();
        assert!(!repo
            .set_status(ProviderKind::NewYorkTimes, SourceStatus::Disabled)
            .unwrap());
    }

    #[test]
    fn test_update_last_fetched_unknown_id() {
        let repo = setup_repo();
        let result = repo.update_last_fetched(42, Utc::now());
        assert!(matches!(result, Err(AggregatorError::SourceNotFound(_))));
    }
}
