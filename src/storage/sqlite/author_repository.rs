use crate::domain::Author;
use crate::errors::AggregatorResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::AuthorRepository;

pub struct SqliteAuthorRepository {
    storage: SqliteStorage,
}

impl SqliteAuthorRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl AuthorRepository for SqliteAuthorRepository {
    fn find_or_create(&self, name: &str) -> AggregatorResult<Author> {
        let conn = self.storage.connection()?;

        conn.execute(
            "INSERT INTO authors (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            [name],
        )?;

        let author = conn.query_row("SELECT id, name FROM authors WHERE name = ?1", [name], |row| {
            Ok(Author {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        Ok(author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_or_create_author() {
        let repo = SqliteAuthorRepository::new(SqliteStorage::in_memory().unwrap());

        let created = repo.find_or_create("Jane Doe").unwrap();
        let again = repo.find_or_create("Jane Doe").unwrap();
        let other = repo.find_or_create("John Roe").unwrap();

        assert_eq!(created.id, again.id);
        assert_ne!(created.id, other.id);
        assert_eq!(other.name, "John Roe");
    }
}
