pub mod traits;
pub mod sqlite;

pub use traits::{ArticleRepository, AuthorRepository, CategoryRepository, SourceRepository};
pub use sqlite::{
    SqliteArticleRepository, SqliteAuthorRepository, SqliteCategoryRepository,
    SqliteSourceRepository, SqliteStorage,
};
