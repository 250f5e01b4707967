use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{
    api::state::AppState,
    domain::{CreateNoticeRequest, Notice, UpdateNoticeRequest},
    error::Result,
};

#[derive(Debug, Serialize)]
pub struct DeletedNotice {
    pub message: String,
    pub notice: Notice,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Notice>>> {
    let notices = state.notice_service.list().await?;

    Ok(Json(notices))
}

pub async fn get(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Notice>> {
    let Path(id) = id?;
    let notice = state.notice_service.get(&id).await?;

    Ok(Json(notice))
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateNoticeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Notice>)> {
    let Json(request) = payload?;
    let notice = state.notice_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(notice)))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<UpdateNoticeRequest>, JsonRejection>,
) -> Result<Json<Notice>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let notice = state.notice_service.update(&id, request).await?;

    Ok(Json(notice))
}

pub async fn delete(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedNotice>> {
    let Path(id) = id?;
    let notice = state.notice_service.delete(&id).await?;

    Ok(Json(DeletedNotice {
        message: "Notice deleted successfully.".to_string(),
        notice,
    }))
}
