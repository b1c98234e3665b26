//! Tutorials Handler
//!
//! CRUD endpoints over the tutorial collection. Payloads are validated
//! before the repository is touched.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::app_state::AppState;
use crate::database::TutorialRepository;
use crate::error::{ApiError, ErrorResponse, Result};
use crate::handlers::extractors::{AppJson, AppPath, AppQuery, TitleFilter};
use crate::handlers::response::{Created, NoContent};
use crate::models::tutorial::{Tutorial, TutorialRequest};

type Repository = Arc<dyn TutorialRepository>;

/// Routes mounted under `/api/tutorials`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_tutorials)
                .post(create_tutorial)
                .delete(delete_all_tutorials),
        )
        .route("/published", get(list_published_tutorials))
        .route(
            "/{id}",
            get(get_tutorial)
                .put(update_tutorial)
                .delete(delete_tutorial),
        )
}

/// Create a tutorial
/// POST /api/tutorials
#[utoipa::path(
    post,
    path = "/api/tutorials",
    tag = "tutorials",
    request_body = TutorialRequest,
    responses(
        (status = 201, description = "Tutorial created", body = Tutorial),
        (status = 400, description = "Title missing, blank or too long", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_tutorial(
    State(repository): State<Repository>,
    AppJson(payload): AppJson<TutorialRequest>,
) -> Result<Created<Tutorial>> {
    let draft = payload.into_draft()?;
    let tutorial = repository.create(draft).await?;

    info!(tutorial_id = tutorial.id, "Tutorial created");
    Ok(Created(tutorial))
}

/// List tutorials, optionally filtered by title fragment
/// GET /api/tutorials?title=
#[utoipa::path(
    get,
    path = "/api/tutorials",
    tag = "tutorials",
    params(TitleFilter),
    responses(
        (status = 200, description = "Tutorials ordered by id", body = [Tutorial]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_tutorials(
    State(repository): State<Repository>,
    AppQuery(filter): AppQuery<TitleFilter>,
) -> Result<Json<Vec<Tutorial>>> {
    let tutorials = match filter.fragment() {
        Some(fragment) => repository.find_by_title_containing(fragment).await?,
        None => repository.find_all().await?,
    };

    debug!(count = tutorials.len(), "Listed tutorials");
    Ok(Json(tutorials))
}

/// Get a tutorial by id
/// GET /api/tutorials/{id}
#[utoipa::path(
    get,
    path = "/api/tutorials/{id}",
    tag = "tutorials",
    params(("id" = i64, Path, description = "Tutorial id")),
    responses(
        (status = 200, description = "Tutorial found", body = Tutorial),
        (status = 404, description = "No tutorial with that id"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_tutorial(
    State(repository): State<Repository>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Tutorial>> {
    repository
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&format!("Tutorial {}", id)))
}

/// List published tutorials
/// GET /api/tutorials/published
#[utoipa::path(
    get,
    path = "/api/tutorials/published",
    tag = "tutorials",
    responses(
        (status = 200, description = "Published tutorials ordered by id", body = [Tutorial]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_published_tutorials(
    State(repository): State<Repository>,
) -> Result<Json<Vec<Tutorial>>> {
    let tutorials = repository.find_by_published(true).await?;
    Ok(Json(tutorials))
}

/// Replace a tutorial's title, description and published flag
/// PUT /api/tutorials/{id}
#[utoipa::path(
    put,
    path = "/api/tutorials/{id}",
    tag = "tutorials",
    params(("id" = i64, Path, description = "Tutorial id")),
    request_body = TutorialRequest,
    responses(
        (status = 200, description = "Tutorial updated", body = Tutorial),
        (status = 400, description = "Title missing, blank or too long", body = ErrorResponse),
        (status = 404, description = "No tutorial with that id"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_tutorial(
    State(repository): State<Repository>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<TutorialRequest>,
) -> Result<Json<Tutorial>> {
    let draft = payload.into_draft()?;
    let tutorial = repository.update(id, draft).await?;

    info!(tutorial_id = id, "Tutorial updated");
    Ok(Json(tutorial))
}

/// Delete a tutorial by id
/// DELETE /api/tutorials/{id}
#[utoipa::path(
    delete,
    path = "/api/tutorials/{id}",
    tag = "tutorials",
    params(("id" = i64, Path, description = "Tutorial id")),
    responses(
        (status = 204, description = "Tutorial deleted"),
        (status = 404, description = "No tutorial with that id"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_tutorial(
    State(repository): State<Repository>,
    AppPath(id): AppPath<i64>,
) -> Result<NoContent> {
    repository.delete_by_id(id).await?;

    info!(tutorial_id = id, "Tutorial deleted");
    Ok(NoContent)
}

/// Delete every tutorial
/// DELETE /api/tutorials
#[utoipa::path(
    delete,
    path = "/api/tutorials",
    tag = "tutorials",
    responses(
        (status = 204, description = "All tutorials deleted"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_all_tutorials(State(repository): State<Repository>) -> Result<NoContent> {
    let removed = repository.delete_all().await?;

    info!(removed, "All tutorials deleted");
    Ok(NoContent)
}
