use rusqlite::OptionalExtension;

use crate::domain::Article;
use crate::errors::{AggregatorError, AggregatorResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::ArticleRepository;

pub struct SqliteArticleRepository {
    storage: SqliteStorage,
}

impl SqliteArticleRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl ArticleRepository for SqliteArticleRepository {
    fn exists(&self, external_id: &str, source_id: i64) -> AggregatorResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE external_id = ?1 AND source_id = ?2)",
        )?;
        let exists: bool = stmt.query_row((external_id, source_id), |row| row.get(0))?;
        Ok(exists)
    }

    fn create(&self, article: &Article) -> AggregatorResult<Option<i64>> {
        let conn = self.storage.connection()?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO articles (
                title, description, content, url, image_url, published_at,
                source_id, external_id, author_id, category_id, language, country
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            (
                &article.title,
                &article.description,
                &article.content,
                &article.url,
                &article.image_url,
                article.published_at,
                article.source_id,
                &article.external_id,
                article.author_id,
                article.category_id,
                &article.language,
                &article.country,
            ),
        )?;

        if inserted == 0 {
            return Ok(None);
        }

        Ok(Some(conn.last_insert_rowid()))
    }

    fn get(&self, external_id: &str, source_id: i64) -> AggregatorResult<Option<Article>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, content, url, image_url, published_at,
                    source_id, external_id, author_id, category_id, language, country
             FROM articles WHERE external_id = ?1 AND source_id = ?2",
        )?;

        stmt.query_row((external_id, source_id), |row| {
            Ok(Article {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                description: row.get(2)?,
                content: row.get(3)?,
                url: row.get(4)?,
                image_url: row.get(5)?,
                published_at: row.get(6)?,
                source_id: row.get(7)?,
                external_id: row.get(8)?,
                author_id: row.get(9)?,
                category_id: row.get(10)?,
                language: row.get(11)?,
                country: row.get(12)?,
            })
        })
        .optional()
        .map_err(AggregatorError::from)
    }

    fn count_by_source(&self, source_id: i64) -> AggregatorResult<usize> {
        let conn = self.storage.connection()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE source_id = ?1",
            [source_id],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleCandidate, NewsSource, ProviderKind};
    use crate::storage::sqlite::SqliteSourceRepository;
    use crate::storage::traits::SourceRepository;

    fn setup() -> (SqliteArticleRepository, i64) {
        let storage = SqliteStorage::in_memory().unwrap();
        let sources = SqliteSourceRepository::new(storage.clone());
        let source_id = sources
            .upsert(&NewsSource::new(ProviderKind::Guardian, "key".to_string()))
            .unwrap();
        (SqliteArticleRepository::new(storage), source_id)
    }

    fn article(source_id: i64, external_id: &str) -> Article {
        let candidate = ArticleCandidate::new(
            source_id,
            external_id.to_string(),
            "Headline".to_string(),
            "https://example.com/story".to_string(),
        );
        Article::from_candidate(&candidate, None, None)
    }

    #[test]
    fn test_create_and_get_article() {
        let (repo, source_id) = setup();
        let id = repo.create(&article(source_id, "world/2024/a")).unwrap();
        assert!(id.is_some());

        let stored = repo.get("world/2024/a", source_id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, "Headline");
        assert_eq!(stored.language.as_deref(), Some("en"));
        assert!(repo.exists("world/2024/a", source_id).unwrap());
    }

    #[test]
    fn test_create_duplicate_key_is_ignored() {
        let (repo, source_id) = setup();
        assert!(repo.create(&article(source_id, "dup")).unwrap().is_some());
        assert!(repo.create(&article(source_id, "dup")).unwrap().is_none());
        assert_eq!(repo.count_by_source(source_id).unwrap(), 1);
    }

    #[test]
    fn test_missing_article() {
        let (repo, source_id) = setup();
        assert!(!repo.exists("nope", source_id).unwrap());
        assert!(repo.get("nope", source_id).unwrap().is_none());
        assert_eq!(repo.count_by_source(source_id).unwrap(), 0);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let (repo, source_id) = setup();
        let result = repo.create(&article(source_id + 100, "orphan"));
        assert!(matches!(result, Err(AggregatorError::Database(_))));
    }
}
