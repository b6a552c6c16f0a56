use axum::Json;
use axum::extract::State;
use bp_core::requests::{NewStudent, StudentSubjectLink};
use bp_db::updates::StudentUpdate;
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::extract::{ApiJson, ApiPath};

pub async fn add_student(
    State(state): State<AppState>,
    ApiJson(student): ApiJson<NewStudent>,
) -> ApiResult {
    let student = state.service.create_student(&student).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Student added successfully",
        "data": student,
    })))
}

pub async fn get_students(State(state): State<AppState>) -> ApiResult {
    let students = state.service.list_students_with_subjects().await?;
    Ok(Json(json!({ "success": true, "students": students })))
}

pub async fn update_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<StudentUpdate>,
) -> ApiResult {
    let student = state.service.update_student(id, changes).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Student with ID {id} updated!"),
        "data": student,
    })))
}

pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    state.service.delete_student(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Student with ID {id} deleted."),
    })))
}

pub async fn enroll_student(
    State(state): State<AppState>,
    ApiJson(link): ApiJson<StudentSubjectLink>,
) -> ApiResult {
    state.service.enroll_student(link).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Student enrolled in subject!",
        "data": link,
    })))
}

/// Released results only. An empty listing says why it is empty.
pub async fn student_performance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    let performance = state.service.student_performance(id).await?;
    let mut body = json!({
        "success": true,
        "performance": performance.entries,
    });
    if let Some(message) = performance.outcome.message() {
        body["message"] = json!(message);
    }
    Ok(Json(body))
}
