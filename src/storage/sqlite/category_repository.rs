use crate::domain::{slugify, Category};
use crate::errors::AggregatorResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::CategoryRepository;

pub struct SqliteCategoryRepository {
    storage: SqliteStorage,
}

impl SqliteCategoryRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn find_or_create(&self, name: &str) -> AggregatorResult<Category> {
        let conn = self.storage.connection()?;

        // The unique index on name arbitrates concurrent creators
        conn.execute(
            "INSERT INTO categories (name, slug) VALUES (?1, ?2) ON CONFLICT(name) DO NOTHING",
            (name, slugify(name)),
        )?;

        let category = conn.query_row(
            "SELECT id, name, slug FROM categories WHERE name = ?1",
            [name],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    slug: row.get(2)?,
                })
            },
        )?;

        Ok(category)
    }
}
