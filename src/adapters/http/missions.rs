//! `/missions` handlers, including target sub-resources.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::errors::{parse_id, ApiError};
use super::state::AppState;
use crate::domain::models::{
    Mission, NewMission, NewTarget, Page, PageRequest, Target, TargetUpdate, MAX_TARGETS,
    MIN_TARGETS,
};

pub async fn create_mission(
    State(state): State<AppState>,
    payload: Result<Json<NewMission>, JsonRejection>,
) -> Result<(StatusCode, Json<Mission>), ApiError> {
    let Json(mission) = payload?;
    if !(MIN_TARGETS..=MAX_TARGETS).contains(&mission.targets.len()) {
        return Err(ApiError::bad_request(format!(
            "mission must have between {MIN_TARGETS} and {MAX_TARGETS} targets"
        )));
    }
    let created = state.missions.create(mission).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_mission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Mission>, ApiError> {
    Ok(Json(state.missions.get(parse_id(&id)?).await?))
}

pub async fn list_missions(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Page<Mission>>, ApiError> {
    let Query(request) = query?;
    Ok(Json(state.missions.list(&request).await?))
}

pub async fn assign_mission(
    State(state): State<AppState>,
    Path((id, cat_id)): Path<(String, String)>,
) -> Result<Json<Mission>, ApiError> {
    let mission = state.missions.assign(parse_id(&id)?, parse_id(&cat_id)?).await?;
    Ok(Json(mission))
}

pub async fn complete_mission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Mission>, ApiError> {
    Ok(Json(state.missions.complete(parse_id(&id)?).await?))
}

pub async fn delete_mission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.missions.delete(parse_id(&id)?).await?;
    Ok(StatusCode::OK)
}

pub async fn add_target(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewTarget>, JsonRejection>,
) -> Result<Json<Mission>, ApiError> {
    let id = parse_id(&id)?;
    let Json(target) = payload?;
    Ok(Json(state.missions.add_target(id, target).await?))
}

pub async fn complete_target(
    State(state): State<AppState>,
    Path((id, target_id)): Path<(String, String)>,
) -> Result<Json<Target>, ApiError> {
    let target = state
        .missions
        .complete_target(parse_id(&id)?, parse_id(&target_id)?)
        .await?;
    Ok(Json(target))
}

pub async fn update_target(
    State(state): State<AppState>,
    Path((id, target_id)): Path<(String, String)>,
    payload: Result<Json<TargetUpdate>, JsonRejection>,
) -> Result<Json<Target>, ApiError> {
    let (id, target_id) = (parse_id(&id)?, parse_id(&target_id)?);
    let Json(update) = payload?;
    Ok(Json(state.missions.update_target(id, target_id, update).await?))
}

pub async fn delete_target(
    State(state): State<AppState>,
    Path((id, target_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .missions
        .delete_target(parse_id(&id)?, parse_id(&target_id)?)
        .await?;
    Ok(StatusCode::OK)
}
