//! Login plus admin and teacher accounts (`users` rows).

use axum::Json;
use axum::extract::State;
use bp_core::enums::Role;
use bp_core::requests::{LoginRequest, NewAccount, TeacherSignup, validate_email};
use bp_core::responses::LoginResponse;
use bp_db::updates::UserUpdate;
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};

const fn label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Teacher => "Teacher",
        Role::Parent => "Parent",
    }
}

/// `users` first, then self-registered parents. Both failures look the same.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .service
        .authenticate(&credentials.email, &credentials.password)
        .await?
        .map(Json)
        .ok_or(ApiError::Unauthorized)
}

async fn create(state: &AppState, role: Role, account: &NewAccount) -> ApiResult {
    validate_email(&account.email)?;
    let user = state.service.create_account(role, account).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("{} added successfully!", label(role)),
        "data": user,
    })))
}

async fn update(state: &AppState, role: Role, id: i64, update: UserUpdate) -> ApiResult {
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    let user = state.service.update_user(id, role, update).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("{} with ID {id} updated!", label(role)),
        "data": user,
    })))
}

async fn remove(state: &AppState, role: Role, id: i64) -> ApiResult {
    state.service.delete_user(id, role).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("{} with ID {id} deleted.", label(role)),
    })))
}

// ── Admins ─────────────────────────────────────────────────────────

pub async fn add_admin(
    State(state): State<AppState>,
    ApiJson(account): ApiJson<NewAccount>,
) -> ApiResult {
    create(&state, Role::Admin, &account).await
}

pub async fn get_admins(State(state): State<AppState>) -> ApiResult {
    let admins = state.service.list_users(Role::Admin).await?;
    Ok(Json(json!({ "success": true, "admins": admins })))
}

pub async fn update_admin(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<UserUpdate>,
) -> ApiResult {
    update(&state, Role::Admin, id, changes).await
}

pub async fn delete_admin(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult {
    remove(&state, Role::Admin, id).await
}

// ── Teachers ───────────────────────────────────────────────────────

pub async fn add_teacher(
    State(state): State<AppState>,
    ApiJson(account): ApiJson<NewAccount>,
) -> ApiResult {
    create(&state, Role::Teacher, &account).await
}

pub async fn signup_teacher(
    State(state): State<AppState>,
    ApiJson(signup): ApiJson<TeacherSignup>,
) -> ApiResult {
    signup.validate()?;
    let teacher = state.service.signup_teacher(&signup).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Teacher '{}' created successfully", teacher.name),
        "teacher_id": teacher.id,
        "subjects_assigned": signup.subjects,
        "grades": signup.grades,
    })))
}

pub async fn get_teachers(State(state): State<AppState>) -> ApiResult {
    let teachers = state.service.list_teachers_with_subjects().await?;
    Ok(Json(json!({ "success": true, "teachers": teachers })))
}

pub async fn update_teacher(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<UserUpdate>,
) -> ApiResult {
    update(&state, Role::Teacher, id, changes).await
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    remove(&state, Role::Teacher, id).await
}
