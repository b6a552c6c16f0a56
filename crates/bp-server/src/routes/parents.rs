use axum::Json;
use axum::extract::State;
use bp_core::requests::{NewParent, ParentSignup, validate_email};
use bp_db::updates::ParentUpdate;
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::extract::{ApiJson, ApiPath};

/// Admin-created parent: a `users` login plus the linked `parents` row.
pub async fn add_parent(
    State(state): State<AppState>,
    ApiJson(parent): ApiJson<NewParent>,
) -> ApiResult {
    validate_email(&parent.email)?;
    let (user, parent) = state.service.add_parent(&parent).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Parent added successfully and linked to user login!",
        "data": { "user": user, "parent": parent },
    })))
}

pub async fn parent_signup(
    State(state): State<AppState>,
    ApiJson(signup): ApiJson<ParentSignup>,
) -> ApiResult {
    validate_email(&signup.email)?;
    let (parent, student_id) = state.service.signup_parent(&signup).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Parent registered and linked to student successfully.",
        "data": { "parent_id": parent.id, "student_id": student_id },
    })))
}

pub async fn get_parents(State(state): State<AppState>) -> ApiResult {
    let parents = state.service.list_parents_with_children().await?;
    Ok(Json(json!({ "success": true, "parents": parents })))
}

pub async fn parent_students(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    let students = state.service.children_of_parent(id).await?;
    Ok(Json(json!({
        "success": true,
        "parent_id": id,
        "students": students,
    })))
}

pub async fn update_parent(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<ParentUpdate>,
) -> ApiResult {
    if let Some(email) = &changes.email {
        validate_email(email)?;
    }
    let parent = state.service.update_parent(id, changes).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Parent with ID {id} updated!"),
        "data": parent,
    })))
}

pub async fn delete_parent(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    state.service.delete_parent(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Parent deleted successfully",
    })))
}
