// src/server/routes.rs
// =============================================================================
// HTTP routes.
//
// GET /api/repo-info?owner=..&repo=..   -> RepositoryRecord JSON
// GET /api/deploy-button?url=..         -> record + deploy artifact JSON
// GET /health                           -> "OK"
//
// Handlers are stateless apart from the shared Resolver. Two overlapping
// requests for the same repository are answered independently.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use crate::deploy::DeployArtifact;
use crate::github::{parse_repo_url, RepositoryRecord, Resolver};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/repo-info", get(repo_info))
        .route("/api/deploy-button", get(deploy_button))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct RepoInfoParams {
    owner: Option<String>,
    repo: Option<String>,
}

// Treats `?owner=` the same as a missing owner
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[tracing::instrument(skip(state))]
async fn repo_info(
    State(state): State<AppState>,
    Query(params): Query<RepoInfoParams>,
) -> Result<Json<RepositoryRecord>, ApiError> {
    let (Some(owner), Some(repo)) = (non_empty(params.owner), non_empty(params.repo)) else {
        return Err(ApiError::MissingRepository);
    };

    let record = state.resolver.lookup(&owner, &repo).await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct DeployButtonParams {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeployButtonResponse {
    repository: RepositoryRecord,
    artifact: DeployArtifact,
}

// Runs the whole pipeline server-side: validate, resolve, render
#[tracing::instrument(skip(state))]
async fn deploy_button(
    State(state): State<AppState>,
    Query(params): Query<DeployButtonParams>,
) -> Result<Json<DeployButtonResponse>, ApiError> {
    let raw_url = non_empty(params.url).ok_or(ApiError::MissingUrl)?;

    let reference = parse_repo_url(&raw_url).map_err(|e| {
        tracing::debug!(error = ?e, "Rejected repository URL");
        e
    })?;

    let repository = state
        .resolver
        .lookup(&reference.owner, &reference.repo)
        .await?;
    let artifact = DeployArtifact::new(&raw_url, &repository);

    Ok(Json(DeployButtonResponse {
        repository,
        artifact,
    }))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
