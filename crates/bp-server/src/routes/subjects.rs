use axum::Json;
use axum::extract::State;
use bp_core::requests::{NewSubject, TeacherSubjectLink};
use bp_db::updates::SubjectUpdate;
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::extract::{ApiJson, ApiPath};

pub async fn add_subject(
    State(state): State<AppState>,
    ApiJson(subject): ApiJson<NewSubject>,
) -> ApiResult {
    let subject = state.service.create_subject(&subject).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Subject added!",
        "data": subject,
    })))
}

pub async fn get_subjects(State(state): State<AppState>) -> ApiResult {
    let subjects = state.service.list_subjects().await?;
    Ok(Json(json!({ "success": true, "subjects": subjects })))
}

pub async fn update_subject(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<SubjectUpdate>,
) -> ApiResult {
    let subject = state.service.update_subject(id, changes).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Subject with ID {id} updated!"),
        "data": subject,
    })))
}

pub async fn delete_subject(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    state.service.delete_subject(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Subject with ID {id} deleted."),
    })))
}

pub async fn assign_subject(
    State(state): State<AppState>,
    ApiJson(link): ApiJson<TeacherSubjectLink>,
) -> ApiResult {
    state.service.assign_subject(link).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Subject assigned to teacher!",
        "data": link,
    })))
}

pub async fn get_assignments(State(state): State<AppState>) -> ApiResult {
    let assignments = state.service.list_assignments().await?;
    Ok(Json(json!({ "success": true, "assignments": assignments })))
}
