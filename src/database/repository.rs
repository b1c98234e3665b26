//! Repository abstraction for tutorial persistence.
//!
//! Handlers only see [`TutorialRepository`]; the storage engine behind it is
//! chosen at startup (PostgreSQL or in-memory).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::tutorial::{Tutorial, TutorialDraft};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No record with the given id exists
    #[error("tutorial {0} does not exist")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Capability set consumed by the tutorial handlers.
///
/// Every listing is ordered by ascending id.
#[async_trait]
pub trait TutorialRepository: Send + Sync {
    /// Find a tutorial by id
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Tutorial>>;

    /// All tutorials whose published flag equals `published`
    async fn find_by_published(&self, published: bool) -> RepositoryResult<Vec<Tutorial>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Tutorial>>;

    /// Case-sensitive substring match on the title
    async fn find_by_title_containing(&self, fragment: &str) -> RepositoryResult<Vec<Tutorial>>;

    /// Insert a new tutorial; the store assigns the id
    async fn create(&self, draft: TutorialDraft) -> RepositoryResult<Tutorial>;

    /// Replace title, description and published flag of an existing tutorial.
    ///
    /// Fails with [`RepositoryError::NotFound`] when `id` is absent.
    async fn update(&self, id: i64, draft: TutorialDraft) -> RepositoryResult<Tutorial>;

    /// Fails with [`RepositoryError::NotFound`] when `id` is absent.
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    /// Remove every tutorial, returning how many were removed
    async fn delete_all(&self) -> RepositoryResult<u64>;

    async fn count(&self) -> RepositoryResult<i64>;
}
