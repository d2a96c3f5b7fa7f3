mod connection;
mod source_repository;
mod article_repository;
mod category_repository;
mod author_repository;

pub use connection::SqliteStorage;
pub use source_repository::SqliteSourceRepository;
pub use article_repository::SqliteArticleRepository;
pub use category_repository::SqliteCategoryRepository;
pub use author_repository::SqliteAuthorRepository;
