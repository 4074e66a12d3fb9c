//! `/cats` handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::errors::{parse_id, ApiError};
use super::state::AppState;
use crate::domain::models::{Cat, CatUpdate, NewCat, Page, PageRequest};

pub async fn create_cat(
    State(state): State<AppState>,
    payload: Result<Json<NewCat>, JsonRejection>,
) -> Result<(StatusCode, Json<Cat>), ApiError> {
    let Json(cat) = payload?;
    let created = state.cats.add(cat).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cat>, ApiError> {
    let cat = state.cats.get(parse_id(&id)?).await?;
    Ok(Json(cat))
}

pub async fn list_cats(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Page<Cat>>, ApiError> {
    let Query(request) = query?;
    Ok(Json(state.cats.list(&request).await?))
}

pub async fn update_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CatUpdate>, JsonRejection>,
) -> Result<Json<Cat>, ApiError> {
    let id = parse_id(&id)?;
    let Json(update) = payload?;
    Ok(Json(state.cats.update(id, update).await?))
}

pub async fn delete_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.cats.delete(parse_id(&id)?).await?;
    Ok(StatusCode::OK)
}
