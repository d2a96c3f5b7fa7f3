use tracing::{debug, error};

use crate::domain::{Article, ArticleCandidate};
use crate::errors::AggregatorResult;
use crate::providers::traits::non_empty;
use crate::storage::traits::{ArticleRepository, AuthorRepository, CategoryRepository};

/// Where normalized candidates end up
#[cfg_attr(test, mockall::automock)]
pub trait ArticleGateway: Send + Sync {
    /// Store a candidate; `true` only when a new article row was written
    fn save(&self, candidate: &ArticleCandidate) -> bool;
}

pub struct PersistenceService<A: ArticleRepository, C: CategoryRepository, W: AuthorRepository> {
    article_repository: A,
    category_repository: C,
    author_repository: W,
}

impl<A: ArticleRepository, C: CategoryRepository, W: AuthorRepository> PersistenceService<A, C, W> {
    pub fn new(article_repository: A, category_repository: C, author_repository: W) -> Self {
        Self {
            article_repository,
            category_repository,
            author_repository,
        }
    }

    fn try_save(&self, candidate: &ArticleCandidate) -> AggregatorResult<bool> {
        if self
            .article_repository
            .exists(&candidate.external_id, candidate.source_id)?
        {
            return Ok(false);
        }

        let category_id = match non_empty(candidate.category.clone()) {
            Some(name) => Some(self.category_repository.find_or_create(&name)?.id),
            None => None,
        };

        let author_id = match non_empty(candidate.author.clone()) {
            Some(name) => Some(self.author_repository.find_or_create(&name)?.id),
            None => None,
        };

        let article = Article::from_candidate(candidate, category_id, author_id);

        // A concurrent writer may have taken the key since the exists check
        Ok(self.article_repository.create(&article)?.is_some())
    }
}

impl<A: ArticleRepository, C: CategoryRepository, W: AuthorRepository> ArticleGateway
    for PersistenceService<A, C, W>
{
    fn save(&self, candidate: &ArticleCandidate) -> bool {
        match self.try_save(candidate) {
            Ok(saved) => {
                if !saved {
                    debug!(
                        external_id = %candidate.external_id,
                        source_id = candidate.source_id,
                        "article already stored"
                    );
                }
                saved
            }
            Err(e) => {
                error!(title = %candidate.title, error = %e, "failed to save article");
                false
            }
        }
    }
}
