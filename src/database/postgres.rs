//! PostgreSQL-backed tutorial repository.

use async_trait::async_trait;
use std::future::Future;
use std::time::Instant;
use tracing::debug;

use super::repository::{RepositoryError, RepositoryResult, TutorialRepository};
use super::DatabasePool;
use crate::middleware::metrics::track_repository_operation;
use crate::models::tutorial::{Tutorial, TutorialDraft};

const SELECT_COLUMNS: &str = "SELECT id, title, description, published FROM tutorials";

#[derive(Clone)]
pub struct PgTutorialRepository {
    pool: DatabasePool,
}

impl PgTutorialRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Run a query and record its duration and outcome.
async fn timed<T, F>(operation: &'static str, query: F) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    let start = Instant::now();
    let result = query.await;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    // A missing row is a normal outcome, not a failed query
    let success = !matches!(result, Err(RepositoryError::Database(_)));
    track_repository_operation(operation, duration_ms, success);
    debug!(operation, duration_ms, success, "Repository operation finished");

    result
}

#[async_trait]
impl TutorialRepository for PgTutorialRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Tutorial>> {
        timed("find_by_id", async {
            sqlx::query_as::<_, Tutorial>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn find_by_published(&self, published: bool) -> RepositoryResult<Vec<Tutorial>> {
        timed("find_by_published", async {
            sqlx::query_as::<_, Tutorial>(&format!(
                "{SELECT_COLUMNS} WHERE published = $1 ORDER BY id"
            ))
            .bind(published)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)
        })
        .await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Tutorial>> {
        timed("find_all", async {
            sqlx::query_as::<_, Tutorial>(&format!("{SELECT_COLUMNS} ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn find_by_title_containing(&self, fragment: &str) -> RepositoryResult<Vec<Tutorial>> {
        // strpos avoids treating % and _ in the fragment as LIKE wildcards
        timed("find_by_title_containing", async {
            sqlx::query_as::<_, Tutorial>(&format!(
                "{SELECT_COLUMNS} WHERE strpos(title, $1) > 0 ORDER BY id"
            ))
            .bind(fragment)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)
        })
        .await
    }

    async fn create(&self, draft: TutorialDraft) -> RepositoryResult<Tutorial> {
        timed("create", async {
            sqlx::query_as::<_, Tutorial>(
                r#"
                INSERT INTO tutorials (title, description, published)
                VALUES ($1, $2, $3)
                RETURNING id, title, description, published
                "#,
            )
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.published)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)
        })
        .await
    }

    async fn update(&self, id: i64, draft: TutorialDraft) -> RepositoryResult<Tutorial> {
        timed("update", async {
            sqlx::query_as::<_, Tutorial>(
                r#"
                UPDATE tutorials
                SET title = $1, description = $2, published = $3
                WHERE id = $4
                RETURNING id, title, description, published
                "#,
            )
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.published)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(id))
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        timed("delete_by_id", async {
            let result = sqlx::query("DELETE FROM tutorials WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_all(&self) -> RepositoryResult<u64> {
        timed("delete_all", async {
            sqlx::query("DELETE FROM tutorials")
                .execute(&self.pool)
                .await
                .map(|result| result.rows_affected())
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn count(&self) -> RepositoryResult<i64> {
        timed("count", async {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tutorials")
                .fetch_one(&self.pool)
                .await
                .map_err(RepositoryError::from)
        })
        .await
    }
}
